//! Validation rule declarations and validation results.
//!
//! Rules are plain data. Evaluating them is the job of
//! [`RuleValidator`](crate::validator::RuleValidator); deriving hydration
//! maps from them is the job of the [`map`](crate::map) module.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A map from property keys to their declared rules.
///
/// Keys may be dotted (`"author.bio"`) to address a nested property.
pub type RuleMap = BTreeMap<String, Vec<Rule>>;

/// A single validation rule declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
	/// The value must be present and non-empty.
	Required,
	/// The value must be a string.
	StringValue,
	/// String length bounds with optional custom messages.
	Length {
		min: Option<usize>,
		max: Option<usize>,
		less_message: Option<String>,
		greater_message: Option<String>,
	},
	/// Integer value with optional bounds.
	Integer { min: Option<i64>, max: Option<i64> },
	/// Numeric value with optional bounds.
	Number { min: Option<f64>, max: Option<f64> },
	/// The value must look like an email address.
	Email,
	/// The value must match the pattern.
	Regex {
		pattern: String,
		message: Option<String>,
	},
	/// Marker rule. The property may be populated but no check runs.
	Safe,
	/// Nested rules for a structured property.
	///
	/// `Some(map)` declares the sub-rules inline. `None` means the rules
	/// are derived from the nested form model stored in the property.
	Nested(Option<RuleMap>),
}

impl Rule {
	/// A [`Rule::Length`] with a minimum only.
	pub fn length_min(min: usize) -> Self {
		Self::Length {
			min: Some(min),
			max: None,
			less_message: None,
			greater_message: None,
		}
	}

	/// A [`Rule::Length`] with both bounds.
	pub fn length_between(min: usize, max: usize) -> Self {
		Self::Length {
			min: Some(min),
			max: Some(max),
			less_message: None,
			greater_message: None,
		}
	}

	/// A [`Rule::Integer`] with a minimum only.
	pub fn integer_min(min: i64) -> Self {
		Self::Integer {
			min: Some(min),
			max: None,
		}
	}

	/// A [`Rule::Integer`] with both bounds.
	pub fn integer_between(min: i64, max: i64) -> Self {
		Self::Integer {
			min: Some(min),
			max: Some(max),
		}
	}

	/// A [`Rule::Number`] with a minimum only.
	pub fn number_min(min: f64) -> Self {
		Self::Number {
			min: Some(min),
			max: None,
		}
	}

	/// A [`Rule::Regex`] with a custom failure message.
	pub fn regex(pattern: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Regex {
			pattern: pattern.into(),
			message: Some(message.into()),
		}
	}
}

/// A single validation failure with the path of the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
	pub message: String,
	pub value_path: Vec<String>,
}

/// The outcome of a validation pass.
///
/// Errors are keyed by value path. Lookup by a dotted path matches the
/// path itself and everything nested below it.
///
/// # Examples
///
/// ```
/// use formbind::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid());
///
/// result.add_error("Name cannot be blank.", ["user", "name"]);
/// assert!(!result.is_valid());
/// assert_eq!(result.error_messages_by_path("user"), vec!["Name cannot be blank."]);
/// assert_eq!(result.error_messages_by_path("user.name"), vec!["Name cannot be blank."]);
/// assert!(result.error_messages_by_path("user.email").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
	errors: Vec<ValidationError>,
}

impl ValidationResult {
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether the pass produced no errors.
	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn errors(&self) -> &[ValidationError] {
		&self.errors
	}

	/// Records an error for the value at `value_path`. An empty path
	/// addresses the form as a whole.
	pub fn add_error<I, S>(&mut self, message: impl Into<String>, value_path: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.errors.push(ValidationError {
			message: message.into(),
			value_path: value_path.into_iter().map(Into::into).collect(),
		});
	}

	/// Messages recorded at the dotted `path` or anywhere below it.
	pub fn error_messages_by_path(&self, path: &str) -> Vec<String> {
		let segments: Vec<&str> = if path.is_empty() {
			Vec::new()
		} else {
			path.split('.').collect()
		};
		self.errors
			.iter()
			.filter(|error| {
				error.value_path.len() >= segments.len()
					&& error.value_path.iter().zip(&segments).all(|(a, b)| a == b)
			})
			.map(|error| error.message.clone())
			.collect()
	}

	/// All messages grouped by their dotted value path.
	pub fn error_messages_indexed_by_path(&self) -> BTreeMap<String, Vec<String>> {
		let mut indexed: BTreeMap<String, Vec<String>> = BTreeMap::new();
		for error in &self.errors {
			indexed
				.entry(error.value_path.join("."))
				.or_default()
				.push(error.message.clone());
		}
		indexed
	}
}
