//! WASM bindings for recipe search.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{Match, SearchParams};

/// Search a JSON recipe list and return the matches as JSON.
///
/// # Arguments
/// * `recipes_json` - JSON array of recipes (or `{"recipes": [...]}`)
/// * `query` - Raw search query
/// * `include_archived` - Keep archived recipes, sorted last
///
/// # Returns
/// JSON array of `{id, match}` in result order, `[]` if the input is malformed
#[wasm_bindgen]
pub fn search_recipes_json(recipes_json: &str, query: &str, include_archived: bool) -> String {
    #[derive(Serialize)]
    struct Hit<'a> {
        id: i64,
        #[serde(rename = "match")]
        matches: &'a [Match],
    }

    let recipes = match crate::parse_recipes(recipes_json) {
        Ok(recipes) => recipes,
        Err(_) => return "[]".to_string(),
    };

    let params = SearchParams::new(&recipes, query).include_archived(include_archived);
    let results = crate::search_recipes(&params);
    let hits: Vec<Hit<'_>> = results
        .recipes
        .iter()
        .map(|m| Hit {
            id: m.recipe.id,
            matches: &m.matches,
        })
        .collect();

    serde_json::to_string(&hits).unwrap_or_else(|_| "[]".to_string())
}

/// Parse a query and return its nodes as JSON.
#[wasm_bindgen]
pub fn parse_query_json(query: &str) -> String {
    serde_json::to_string(&crate::parse_query(query)).unwrap_or_else(|_| "[]".to_string())
}

/// Normalize text the way search compares it.
#[wasm_bindgen]
pub fn normalize_text(text: &str) -> String {
    crate::normalize(text)
}
