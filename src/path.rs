//! Property path normalization and expression parsing.
//!
//! A property expression is a property name optionally prefixed and/or
//! suffixed with bracketed array indexes. The prefix form is used for
//! tabular input (`[0]content` names the `content` property of the first
//! row), the suffix form for array-typed properties (`dates[0]`).

use crate::error::ExpressionError;
use regex::Regex;
use std::sync::LazyLock;

// Optional leading bracket groups, one run of word characters (plus dots,
// `+`, `-` and `_`) as the name, optional trailing bracket groups.
static PROPERTY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(.*\])?([\w.+\-_]+)(\[.*)?$").expect("PROPERTY_REGEX: invalid regex pattern")
});

/// Normalizes a property path into its segments.
///
/// Bracket syntax is folded into dot syntax before splitting, so
/// `a[b][c]` and `a.b.c` describe the same path. No escaping is
/// supported; a literal `.`, `[` or `]` inside a segment name cannot be
/// represented. The result always has at least one element, so callers
/// must make sure the input is non-empty.
///
/// # Examples
///
/// ```
/// use formbind::path::normalize;
///
/// assert_eq!(normalize("a[b][c]"), vec!["a", "b", "c"]);
/// assert_eq!(normalize("a.b.c"), vec!["a", "b", "c"]);
/// assert_eq!(normalize("letters[0]"), vec!["letters", "0"]);
/// ```
pub fn normalize(path: &str) -> Vec<String> {
	let path = path.strip_suffix(']').unwrap_or(path);
	let path = path.replace("][", ".").replace('[', ".");
	path.split('.').map(str::to_string).collect()
}

/// A parsed property expression.
///
/// Holds the raw expression, the base property name, the tabular prefix,
/// the array-index suffix and the normalized path of `name + suffix`.
///
/// # Examples
///
/// ```
/// use formbind::path::ParsedProperty;
///
/// let parsed = ParsedProperty::parse("coordinates[latitude]").unwrap();
/// assert_eq!(parsed.name, "coordinates");
/// assert_eq!(parsed.prefix, "");
/// assert_eq!(parsed.suffix, "[latitude]");
/// assert_eq!(parsed.path, vec!["coordinates", "latitude"]);
///
/// let tabular = ParsedProperty::parse("[0]content").unwrap();
/// assert_eq!(tabular.prefix, "[0]");
/// assert_eq!(tabular.name, "content");
///
/// assert!(ParsedProperty::parse("new age").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProperty {
	/// The expression as given.
	pub raw: String,
	/// The base property name.
	pub name: String,
	/// Leading bracket groups for tabular input, empty when absent.
	pub prefix: String,
	/// Trailing bracket groups, empty when absent.
	pub suffix: String,
	/// Normalized path of `name + suffix`, never empty.
	pub path: Vec<String>,
}

impl ParsedProperty {
	/// Parses a property expression.
	///
	/// Fails with [`ExpressionError`] when the expression contains
	/// characters outside the allowed name alphabet. Expressions are
	/// programmer-supplied, so this is a hard error rather than a
	/// recoverable condition.
	pub fn parse(property: &str) -> Result<Self, ExpressionError> {
		let captures = PROPERTY_REGEX.captures(property).ok_or(ExpressionError)?;
		let name = captures.get(2).map(|m| m.as_str()).unwrap_or("").to_string();
		let prefix = captures.get(1).map(|m| m.as_str()).unwrap_or("").to_string();
		let suffix = captures.get(3).map(|m| m.as_str()).unwrap_or("").to_string();
		let path = normalize(&format!("{name}{suffix}"));
		Ok(Self {
			raw: property.to_string(),
			name,
			prefix,
			suffix,
			path,
		})
	}
}
