//! Recipe records consumed by the search engine.
//!
//! Optional fields are defaulted while deserializing, so the engine never has
//! to deal with a missing author or tag list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, SearchError};

/// A recipe as seen by search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe id
    pub id: i64,
    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Author credit, empty when unknown
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    /// Free-form tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Ingredients in recipe order
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<Ingredient>,
    /// Set once the recipe has been archived
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
}

/// A single ingredient line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Amount, e.g. "2 cups"
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: String,
    /// Ingredient name, e.g. "flour"
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Ingredient {
    /// Creates a new ingredient.
    pub fn new(quantity: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            quantity: quantity.into(),
            name: name.into(),
        }
    }
}

impl Recipe {
    /// Creates a recipe with only an id and a name.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            author: String::new(),
            tags: Vec::new(),
            ingredients: Vec::new(),
            archived_at: None,
        }
    }

    /// Sets the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Replaces the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Appends an ingredient.
    pub fn with_ingredient(mut self, quantity: impl Into<String>, name: impl Into<String>) -> Self {
        self.ingredients.push(Ingredient::new(quantity, name));
        self
    }

    /// Marks the recipe as archived at the given time.
    pub fn archived_at(mut self, at: DateTime<Utc>) -> Self {
        self.archived_at = Some(at);
        self
    }

    /// Returns true if the recipe has been archived.
    #[inline]
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

/// Parse a recipe export.
///
/// Accepts either a bare JSON array of recipes or an object carrying the
/// array under `recipes`.
///
/// # Example
/// ```
/// use larder_search::parse_recipes;
///
/// let recipes = parse_recipes(r#"[{"id": 1, "name": "Soup", "author": null}]"#).unwrap();
/// assert_eq!(recipes[0].author, "");
/// ```
pub fn parse_recipes(json: &str) -> Result<Vec<Recipe>> {
    let value: Value = serde_json::from_str(json)?;
    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map.remove("recipes").ok_or_else(|| {
            SearchError::UnexpectedPayload("object without a `recipes` field".to_string())
        })?,
        other => {
            return Err(SearchError::UnexpectedPayload(format!(
                "expected an array or object, found {}",
                json_kind(&other)
            )));
        }
    };
    Ok(serde_json::from_value(list)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_fields_default() {
        let recipes = parse_recipes(r#"[{"id": 7, "name": "Toast"}]"#).unwrap();
        let recipe = &recipes[0];
        assert_eq!(recipe.id, 7);
        assert_eq!(recipe.author, "");
        assert!(recipe.tags.is_empty());
        assert!(recipe.ingredients.is_empty());
        assert!(!recipe.is_archived());
    }

    #[test]
    fn test_null_fields_default() {
        let json = r#"[{
            "id": 1,
            "name": "Stew",
            "author": null,
            "tags": null,
            "ingredients": [{"quantity": null, "name": "beef"}],
            "archived_at": null
        }]"#;
        let recipe = &parse_recipes(json).unwrap()[0];
        assert_eq!(recipe.author, "");
        assert!(recipe.tags.is_empty());
        assert_eq!(recipe.ingredients[0], Ingredient::new("", "beef"));
    }

    #[test]
    fn test_archived_at_parsed() {
        let json = r#"{"recipes": [{"id": 2, "name": "Pie", "archived_at": "2019-03-04T12:30:00.123456Z"}]}"#;
        let recipe = &parse_recipes(json).unwrap()[0];
        assert!(recipe.is_archived());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"[{"id": 3, "name": "Tea", "servings": "2", "steps": [{"text": "boil"}]}]"#;
        assert_eq!(parse_recipes(json).unwrap().len(), 1);
    }

    #[test]
    fn test_object_without_recipes_rejected() {
        let err = parse_recipes(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, SearchError::UnexpectedPayload(_)));
    }

    #[test]
    fn test_scalar_payload_rejected() {
        let err = parse_recipes("42").unwrap_err();
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_missing_id_rejected() {
        let err = parse_recipes(r#"[{"name": "No id"}]"#).unwrap_err();
        assert!(matches!(err, SearchError::InvalidRecipes(_)));
    }

    #[test]
    fn test_builder() {
        let recipe = Recipe::new(5, "Salad")
            .with_author("Ann")
            .with_tags(["green", "quick"])
            .with_ingredient("1 head", "lettuce");
        assert_eq!(recipe.tags, vec!["green", "quick"]);
        assert_eq!(recipe.ingredients.len(), 1);
    }
}
