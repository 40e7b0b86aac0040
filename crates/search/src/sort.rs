//! Recipe orderings.

use std::cmp::Ordering;

use crate::model::Recipe;

/// Order recipes alphabetically by name.
///
/// Names are compared case-insensitively first; names that only differ in
/// case fall back to plain string order so the ordering stays total.
pub fn by_name_alphabetical(a: &Recipe, b: &Recipe) -> Ordering {
    let folded = |name: &str| name.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(&a.name)
        .cmp(&folded(&b.name))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort archived recipes last, then sort alphabetically.
pub fn sort_archived_name(a: &Recipe, b: &Recipe) -> Ordering {
    a.is_archived()
        .cmp(&b.is_archived())
        .then_with(|| by_name_alphabetical(a, b))
}
