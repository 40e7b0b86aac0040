//! Error types for the search crate.
//!
//! Parsing a query and evaluating it never fail; errors only come from
//! turning untrusted JSON into recipes.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while loading recipes for search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Recipe payload was not valid JSON or did not have the recipe shape
    #[error("Invalid recipe data: {0}")]
    InvalidRecipes(#[from] serde_json::Error),

    /// Payload was JSON but neither an array nor an object with `recipes`
    #[error("Unexpected recipe payload: {0}")]
    UnexpectedPayload(String),
}

/// Error code for integration with larder-core error handling.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Malformed recipe JSON
    InvalidRecipes = 11001,
    /// Unexpected top-level payload
    UnexpectedPayload = 11002,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidRecipes(_) => SearchErrorCode::InvalidRecipes,
            SearchError::UnexpectedPayload(_) => SearchErrorCode::UnexpectedPayload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = SearchError::UnexpectedPayload("number".to_string());
        assert_eq!(err.code(), SearchErrorCode::UnexpectedPayload);
        assert_eq!(err.code() as u32, 11002);
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SearchError = json_err.into();
        assert_eq!(err.code(), SearchErrorCode::InvalidRecipes);
        assert!(err.to_string().starts_with("Invalid recipe data"));
    }
}
