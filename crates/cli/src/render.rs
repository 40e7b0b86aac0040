//! Rendering of search results and parsed queries for the terminal

use larder_search::{MatchKind, QueryNode, RecipeMatch};
use owo_colors::OwoColorize;

/// Label printed in front of a piece of match evidence
pub fn match_label(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Author => "author",
        MatchKind::RecipeId => "id",
        MatchKind::Ingredient => "ingredient",
        MatchKind::Name => "name",
        MatchKind::Tag => "tag",
    }
}

/// Render one search hit as text lines
///
/// The first line carries id, name, author and archived state; each match
/// follows on its own indented line when `show_matches` is set.
pub fn render_recipe_match(hit: &RecipeMatch<'_>, show_matches: bool, color: bool) -> String {
    let recipe = hit.recipe;
    let id = format!("#{}", recipe.id);
    let mut line = if color {
        format!("{:>6}  {}", id.dimmed(), recipe.name.bold())
    } else {
        format!("{:>6}  {}", id, recipe.name)
    };

    if !recipe.author.is_empty() {
        line.push_str(&format!(" by {}", recipe.author));
    }
    if recipe.is_archived() {
        let marker = "[archived]";
        if color {
            line.push_str(&format!(" {}", marker.yellow()));
        } else {
            line.push_str(&format!(" {}", marker));
        }
    }

    if show_matches {
        for m in &hit.matches {
            let label = format!("{}:", match_label(m.kind));
            if color {
                line.push_str(&format!("\n        {} {}", label.cyan(), m.value));
            } else {
                line.push_str(&format!("\n        {} {}", label, m.value));
            }
        }
    }

    line
}

/// Render a parsed query node as a one-line description
pub fn render_query_node(node: &QueryNode) -> String {
    let field = node.field.map_or("author|name", |f| f.as_str());
    let polarity = if node.negative { "exclude" } else { "include" };
    format!("{polarity} {field} ~ {:?}", node.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_search::{search_recipes, parse_query, Recipe, SearchParams};

    #[test]
    fn test_render_plain_line() {
        let recipes = vec![Recipe::new(7, "Leek Soup").with_author("Jane").with_ingredient("2", "leeks")];
        let results = search_recipes(&SearchParams::new(&recipes, "ingredient:leek"));
        let text = render_recipe_match(&results.recipes[0], true, false);
        assert_eq!(text, "    #7  Leek Soup by Jane\n        ingredient: 2 leeks");
    }

    #[test]
    fn test_render_without_matches() {
        let recipes = vec![Recipe::new(1, "Toast")];
        let results = search_recipes(&SearchParams::new(&recipes, "toast"));
        let text = render_recipe_match(&results.recipes[0], false, false);
        assert_eq!(text, "    #1  Toast");
    }

    #[test]
    fn test_render_archived_marker() {
        let archived_at = "2020-01-01T00:00:00Z".parse().unwrap();
        let recipes = vec![Recipe::new(3, "Old Pie").archived_at(archived_at)];
        let results = search_recipes(&SearchParams::new(&recipes, ""));
        assert!(render_recipe_match(&results.recipes[0], true, false).ends_with("[archived]"));
    }

    #[test]
    fn test_render_query_node() {
        let nodes = parse_query("-tag:spicy jane");
        assert_eq!(render_query_node(&nodes[0]), "exclude tag ~ \"spicy\"");
        assert_eq!(render_query_node(&nodes[1]), "include author|name ~ \"jane\"");
    }
}
