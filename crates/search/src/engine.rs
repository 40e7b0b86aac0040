//! Evaluation of parsed queries against a recipe collection.
//!
//! All nodes of a query must hold for a recipe to be kept. A positive node
//! contributes match evidence, a negative node only rejects.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::Recipe;
use crate::normalize::Needle;
use crate::query::{parse_query, QueryField, QueryNode};
use crate::sort::sort_archived_name;

/// Which part of a recipe satisfied a query term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    /// Author credit
    Author,
    /// Recipe id
    RecipeId,
    /// An ingredient line
    Ingredient,
    /// Recipe name
    Name,
    /// A tag
    Tag,
}

/// Evidence that a recipe satisfied a positive query term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Field that matched
    pub kind: MatchKind,
    /// Verbatim text of the matching field
    pub value: String,
}

impl Match {
    fn new(kind: MatchKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Input of a search call.
#[derive(Debug, Clone, Copy)]
pub struct SearchParams<'a> {
    /// Recipes to search, left untouched
    pub recipes: &'a [Recipe],
    /// Raw query string
    pub query: &'a str,
    /// `Some(false)` drops archived recipes; anything else keeps them, sorted last
    pub include_archived: Option<bool>,
}

impl<'a> SearchParams<'a> {
    /// Creates search parameters that keep archived recipes.
    pub fn new(recipes: &'a [Recipe], query: &'a str) -> Self {
        Self {
            recipes,
            query,
            include_archived: None,
        }
    }

    /// Sets whether archived recipes are part of the result.
    pub fn include_archived(mut self, include: bool) -> Self {
        self.include_archived = Some(include);
        self
    }
}

/// A recipe kept by a search, with the evidence for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeMatch<'a> {
    /// The matching recipe
    pub recipe: &'a Recipe,
    /// One entry per satisfied positive term
    #[serde(rename = "match")]
    pub matches: Vec<Match>,
}

/// Ordered search output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults<'a> {
    /// Non-archived first, then by name
    pub recipes: Vec<RecipeMatch<'a>>,
}

impl SearchResults<'_> {
    /// Number of matching recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Returns true if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Ids of the matching recipes, in result order.
    pub fn ids(&self) -> Vec<i64> {
        self.recipes.iter().map(|m| m.recipe.id).collect()
    }
}

/// A query node with its needle normalized up front.
struct Predicate<'q> {
    node: &'q QueryNode,
    needle: Needle,
}

impl<'q> Predicate<'q> {
    fn new(node: &'q QueryNode) -> Self {
        Self {
            node,
            needle: Needle::new(&node.value),
        }
    }

    /// Match evidence for this node, `None` if the recipe does not match.
    fn evaluate(&self, recipe: &Recipe) -> Option<Vec<Match>> {
        match self.node.field {
            Some(field) => eval_field(field, &self.needle, recipe).map(|m| vec![m]),
            None => {
                let matches: Vec<Match> = [QueryField::Author, QueryField::Name]
                    .into_iter()
                    .filter_map(|field| eval_field(field, &self.needle, recipe))
                    .collect();
                (!matches.is_empty()).then_some(matches)
            }
        }
    }
}

fn eval_field(field: QueryField, needle: &Needle, recipe: &Recipe) -> Option<Match> {
    match field {
        QueryField::Author => needle
            .found_in(&recipe.author)
            .then(|| Match::new(MatchKind::Author, recipe.author.as_str())),
        QueryField::Name => needle
            .found_in(&recipe.name)
            .then(|| Match::new(MatchKind::Name, recipe.name.as_str())),
        QueryField::RecipeId => {
            let id = recipe.id.to_string();
            needle.found_in(&id).then(|| Match::new(MatchKind::RecipeId, id))
        }
        QueryField::Tag => recipe
            .tags
            .iter()
            .find(|tag| needle.found_in(tag))
            .map(|tag| Match::new(MatchKind::Tag, tag.as_str())),
        QueryField::Ingredient => recipe
            .ingredients
            .iter()
            .find(|ingredient| needle.found_in(&ingredient.name))
            .map(|ingredient| {
                Match::new(
                    MatchKind::Ingredient,
                    format!("{} {}", ingredient.quantity, ingredient.name),
                )
            }),
    }
}

fn eval_predicates(predicates: &[Predicate<'_>], recipe: &Recipe) -> Option<Vec<Match>> {
    let mut all_matches = Vec::new();
    for predicate in predicates {
        let matches = predicate.evaluate(recipe);
        if predicate.node.negative {
            if matches.is_some() {
                return None;
            }
        } else {
            all_matches.extend(matches?);
        }
    }
    Some(all_matches)
}

/// Evaluate already parsed nodes against one recipe.
///
/// Returns the collected match evidence, or `None` if the recipe is
/// rejected by any node. An empty node list accepts every recipe.
pub fn query_matches_recipe(nodes: &[QueryNode], recipe: &Recipe) -> Option<Vec<Match>> {
    let predicates: Vec<Predicate<'_>> = nodes.iter().map(Predicate::new).collect();
    eval_predicates(&predicates, recipe)
}

/// Search recipes with a raw query string.
///
/// # Example
/// ```
/// use larder_search::{search_recipes, MatchKind, Recipe, SearchParams};
///
/// let recipes = vec![
///     Recipe::new(1, "Tomato Soup").with_author("Jane"),
///     Recipe::new(2, "Pancakes").with_author("Sam"),
/// ];
/// let results = search_recipes(&SearchParams::new(&recipes, "soup"));
/// assert_eq!(results.ids(), vec![1]);
/// assert_eq!(results.recipes[0].matches[0].kind, MatchKind::Name);
/// ```
pub fn search_recipes<'a>(params: &SearchParams<'a>) -> SearchResults<'a> {
    let nodes = parse_query(params.query);
    let predicates: Vec<Predicate<'_>> = nodes.iter().map(Predicate::new).collect();
    let include_archived = params.include_archived.unwrap_or(true);

    let keep = |recipe: &&'a Recipe| include_archived || !recipe.is_archived();
    let evaluate = |recipe: &'a Recipe| {
        eval_predicates(&predicates, recipe).map(|matches| RecipeMatch { recipe, matches })
    };

    #[cfg(feature = "parallel")]
    let mut recipes: Vec<RecipeMatch<'a>> = {
        use rayon::prelude::*;
        params.recipes.par_iter().filter(keep).filter_map(evaluate).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let mut recipes: Vec<RecipeMatch<'a>> = params.recipes.iter().filter(keep).filter_map(evaluate).collect();

    recipes.sort_by(|a, b| sort_archived_name(a.recipe, b.recipe));

    debug!(
        nodes = predicates.len(),
        candidates = params.recipes.len(),
        results = recipes.len(),
        include_archived,
        "Recipe search evaluated"
    );

    SearchResults { recipes }
}
