//! Identifier sanitizer
//!
//! Every table, column and view name that ends up in generated SQL goes through
//! [`render`]. Names that look like plain SQL identifiers are emitted bare, anything
//! else is emitted as a double-quoted identifier. Trailing `--` comments are cut off
//! before classification so comment text never reaches the output.

use std::fmt;

/// Marker that starts an SQL line comment
const COMMENT_MARKER: &str = "--";

/// An identifier rendered for direct inclusion in SQL text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlIdentifier {
    /// Emitted verbatim, matches `[A-Za-z_][A-Za-z0-9_]*`
    Bare(String),
    /// Emitted inside double quotes
    Quoted(String),
}

impl SqlIdentifier {
    /// Classify an identifier after stripping any trailing comment
    pub fn parse(name: &str) -> Self {
        let stripped = strip_comment(name);
        if is_bare_identifier(stripped) {
            SqlIdentifier::Bare(stripped.to_string())
        } else {
            SqlIdentifier::Quoted(stripped.to_string())
        }
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, SqlIdentifier::Quoted(_))
    }

    /// Render into SQL text, optionally doubling embedded quote characters
    pub fn to_sql(&self, escape_embedded_quotes: bool) -> String {
        match self {
            SqlIdentifier::Bare(name) => name.clone(),
            SqlIdentifier::Quoted(name) if escape_embedded_quotes => quote(name),
            SqlIdentifier::Quoted(name) => format!("\"{}\"", name),
        }
    }
}

impl fmt::Display for SqlIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql(true))
    }
}

/// Render an identifier as SQL text.
///
/// ```
/// use view_query::identifier::render;
///
/// assert_eq!(render("parents"), "parents");
/// assert_eq!(render("parents.id"), "\"parents.id\"");
/// assert_eq!(render("users --"), "users");
/// assert_eq!(render("users; DROP TABLE users;"), "\"users; DROP TABLE users;\"");
/// ```
pub fn render(name: &str) -> String {
    SqlIdentifier::parse(name).to_sql(true)
}

/// Same as [`render`] but leaves embedded double quotes untouched
pub fn render_unescaped(name: &str) -> String {
    SqlIdentifier::parse(name).to_sql(false)
}

/// Cut the name at the first `--` and trim what is left. Names without a
/// comment are returned untouched.
pub fn strip_comment(name: &str) -> &str {
    match name.find(COMMENT_MARKER) {
        Some(index) => name[..index].trim(),
        None => name,
    }
}

/// Check whether a name can be emitted without quotes
pub fn is_bare_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Wrap a name in double quotes, doubling any embedded double quote
pub fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Flatten a dotted column reference into an alias (`parents.id` -> `parents_id`)
pub fn normalize_column_name(name: &str) -> String {
    name.replace('.', "_")
}
