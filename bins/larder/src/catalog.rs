//! Loading recipe exports from disk or stdin

use larder_core::{Error, ErrorCode, Result};
use larder_search::{parse_recipes, Recipe, SearchError, SearchErrorCode};
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where a recipe export is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Stdin,
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            Source::Stdin
        } else {
            Source::File(path)
        }
    }
}

/// Read and parse a recipe export
pub fn load(source: &Source) -> Result<Vec<Recipe>> {
    let raw = match source {
        Source::File(path) => read_file(path)?,
        Source::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| Error::catalog(format!("Failed to read stdin: {}", e)).with_source(e))?;
            buf
        }
    };

    let recipes = parse_recipes(&raw).map_err(|e| from_search_error(e, source))?;

    let duplicates = duplicate_ids(&recipes);
    if !duplicates.is_empty() {
        warn!(ids = ?duplicates, "Recipe export contains duplicate ids");
    }
    info!(count = recipes.len(), "Recipes loaded");

    Ok(recipes)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        let err = Error::catalog(format!("Failed to read {}: {}", path.display(), e));
        let err = if e.kind() == std::io::ErrorKind::NotFound {
            err.with_suggestion("Check the path, or pass - to read the export from stdin")
        } else {
            err
        };
        err.with_source(e)
    })
}

fn from_search_error(err: SearchError, source: &Source) -> Error {
    let context = match source {
        Source::File(path) => format!("While parsing {}", path.display()),
        Source::Stdin => "While parsing stdin".to_string(),
    };
    let base = match err.code() {
        SearchErrorCode::InvalidRecipes => Error::catalog_parse(err.to_string()),
        SearchErrorCode::UnexpectedPayload => Error::new(ErrorCode::UnexpectedPayload, err.to_string())
            .with_suggestion("Export recipes as a JSON array or as {\"recipes\": [...]}"),
    };
    base.with_context(context).with_source(err)
}

/// Ids that occur more than once, ascending
fn duplicate_ids(recipes: &[Recipe]) -> Vec<i64> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<i64> = recipes
        .iter()
        .map(|r| r.id)
        .filter(|id| !seen.insert(*id))
        .collect();
    duplicates.sort_unstable();
    duplicates.dedup();
    duplicates
}
