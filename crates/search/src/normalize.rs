//! Text normalization used for every comparison the engine makes.
//!
//! Haystack and needle go through the same [`normalize`] fold, and a match is
//! plain substring containment of the folded forms.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").unwrap());

/// Normalize text for matching.
///
/// Lowercases, strips diacritics (NFD decomposition, then combining marks
/// removed) and removes every non-word character.
///
/// # Example
/// ```
/// use larder_search::normalize;
///
/// assert_eq!(normalize("Crème Brûlée!"), "cremebrulee");
/// ```
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    NON_WORD.replace_all(&stripped, "").into_owned()
}

/// Check if the normalized haystack contains the normalized needle.
pub fn normalized_includes(haystack: &str, needle: &str) -> bool {
    Needle::new(needle).found_in(haystack)
}

/// A search term normalized once and matched against many haystacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Needle(String);

impl Needle {
    /// Normalizes `term` for repeated matching.
    pub fn new(term: &str) -> Self {
        Self(normalize(term))
    }

    /// Returns true if `haystack` contains this needle after normalization.
    pub fn found_in(&self, haystack: &str) -> bool {
        normalize(haystack).contains(self.as_str())
    }

    /// The normalized form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
