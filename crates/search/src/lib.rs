//! Recipe search for Larder.
//!
//! This crate provides:
//! - A small query language (`author:`, `name:`, `id:`, `tag:`, `ingredient:`,
//!   negation and quoting)
//! - Accent, case and punctuation insensitive matching
//! - Search over an in-memory recipe list with per-field match evidence
//! - Archived-last, alphabetical ordering
//! - WASM bindings for the browser client
//!
//! # Example
//!
//! ```
//! use larder_search::{search_recipes, Recipe, SearchParams};
//!
//! let recipes = vec![
//!     Recipe::new(1, "Crème brûlée").with_tags(["dessert"]),
//!     Recipe::new(2, "Tomato Soup").with_author("Jane"),
//! ];
//!
//! let results = search_recipes(&SearchParams::new(&recipes, "creme -tag:soup"));
//! assert_eq!(results.ids(), vec![1]);
//! ```

mod engine;
mod error;
mod model;
mod normalize;
mod query;
mod sort;

#[cfg(feature = "wasm")]
mod wasm;

pub use engine::{
    query_matches_recipe, search_recipes, Match, MatchKind, RecipeMatch, SearchParams,
    SearchResults,
};
pub use error::{Result, SearchError, SearchErrorCode};
pub use model::{parse_recipes, Ingredient, Recipe};
pub use normalize::{normalize, normalized_includes, Needle};
pub use query::{parse_query, QueryField, QueryNode};
pub use sort::{by_name_alphabetical, sort_archived_name};
