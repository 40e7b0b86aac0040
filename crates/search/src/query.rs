//! Query language for recipe search.
//!
//! A query is a whitespace separated list of terms. Each term may be negated
//! with a leading `-` and scoped to a field with one of the prefixes
//! `author:`, `name:`, `id:`, `tag:` or `ingredient:`. Terms without a known
//! prefix match the author or the name.
//!
//! Double quotes keep whitespace inside a term: `name:"pot pie"`. Inside
//! quotes `\"` and `\\` are escapes. Prefixes and the negation marker are
//! only recognised before the first quote, so `"tag:x"` searches for the
//! literal text `tag:x`.
//!
//! Parsing is total. Terms that end up with an empty value are dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field a query term is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryField {
    /// `author:`
    Author,
    /// `name:`
    Name,
    /// `id:`
    RecipeId,
    /// `tag:`
    Tag,
    /// `ingredient:`
    Ingredient,
}

impl QueryField {
    /// Every field, in prefix lookup order.
    pub const ALL: [QueryField; 5] = [
        QueryField::Author,
        QueryField::Name,
        QueryField::RecipeId,
        QueryField::Tag,
        QueryField::Ingredient,
    ];

    /// The literal prefix that selects this field in a query.
    pub fn prefix(self) -> &'static str {
        match self {
            QueryField::Author => "author:",
            QueryField::Name => "name:",
            QueryField::RecipeId => "id:",
            QueryField::Tag => "tag:",
            QueryField::Ingredient => "ingredient:",
        }
    }

    /// Field name as used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            QueryField::Author => "author",
            QueryField::Name => "name",
            QueryField::RecipeId => "recipeId",
            QueryField::Tag => "tag",
            QueryField::Ingredient => "ingredient",
        }
    }

    fn from_prefix_of(text: &str) -> Option<QueryField> {
        Self::ALL.into_iter().find(|field| text.starts_with(field.prefix()))
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed query term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryNode {
    /// Scoped field, `None` for a bare term
    pub field: Option<QueryField>,
    /// Text to look for, never empty
    pub value: String,
    /// True when the term was prefixed with `-`
    pub negative: bool,
}

impl QueryNode {
    /// Creates a positive node.
    pub fn new(field: Option<QueryField>, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            negative: false,
        }
    }

    /// Creates a negated node.
    pub fn negated(field: Option<QueryField>, value: impl Into<String>) -> Self {
        Self {
            negative: true,
            ..Self::new(field, value)
        }
    }

    fn needs_quotes(&self) -> bool {
        let value = self.value.as_str();
        value.chars().any(|c| c.is_whitespace() || c == '"' || c == '\\')
            || (self.field.is_none()
                && (value.starts_with('-') || QueryField::from_prefix_of(value).is_some()))
    }
}

/// Renders the node back into query syntax.
impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        if let Some(field) = self.field {
            f.write_str(field.prefix())?;
        }
        if self.needs_quotes() {
            f.write_str("\"")?;
            for c in self.value.chars() {
                if c == '"' || c == '\\' {
                    f.write_str("\\")?;
                }
                write!(f, "{c}")?;
            }
            f.write_str("\"")
        } else {
            f.write_str(&self.value)
        }
    }
}

/// A raw token before prefix handling.
#[derive(Debug, Default)]
struct Token {
    text: String,
    /// Byte offset in `text` where the first quoted run begins
    quote_start: Option<usize>,
}

fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = Token::default();
    let mut started = false;
    let mut in_quote = false;
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if in_quote {
            match c {
                '"' => in_quote = false,
                '\\' => match chars.next() {
                    Some(escaped @ ('"' | '\\')) => current.text.push(escaped),
                    Some(other) => {
                        current.text.push('\\');
                        current.text.push(other);
                    }
                    None => current.text.push('\\'),
                },
                _ => current.text.push(c),
            }
        } else if c.is_whitespace() {
            if started {
                tokens.push(std::mem::take(&mut current));
                started = false;
            }
        } else if c == '"' {
            in_quote = true;
            started = true;
            current.quote_start.get_or_insert(current.text.len());
        } else {
            current.text.push(c);
            started = true;
        }
    }
    if started {
        tokens.push(current);
    }

    tokens
}

fn parse_token(token: &Token) -> Option<QueryNode> {
    let mut rest = token.text.as_str();
    let mut unquoted = token.quote_start.unwrap_or(rest.len());

    let negative = unquoted > 0 && rest.starts_with('-');
    if negative {
        rest = &rest[1..];
        unquoted -= 1;
    }

    let (field, value) = match QueryField::from_prefix_of(&rest[..unquoted]) {
        Some(field) => (Some(field), &rest[field.prefix().len()..]),
        None => (None, rest),
    };

    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    Some(QueryNode {
        field,
        value: value.to_string(),
        negative,
    })
}

/// Parse a raw search string into query nodes, in input order.
///
/// # Example
/// ```
/// use larder_search::{parse_query, QueryField};
///
/// let nodes = parse_query(r#"-tag:dessert ingredient:"brown sugar" jane"#);
/// assert_eq!(nodes.len(), 3);
/// assert!(nodes[0].negative);
/// assert_eq!(nodes[1].field, Some(QueryField::Ingredient));
/// assert_eq!(nodes[1].value, "brown sugar");
/// assert_eq!(nodes[2].field, None);
/// ```
pub fn parse_query(raw: &str) -> Vec<QueryNode> {
    tokenize(raw).iter().filter_map(parse_token).collect()
}
