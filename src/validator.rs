//! Rule evaluation against form models.
//!
//! [`RuleValidator`] is the default validator: it evaluates the model's
//! merged rules, descends into nested rule maps by value path and
//! validates nested form models recursively. Every model visited gets
//! its own validation result; parents accumulate child errors with the
//! property path prefixed.

use crate::cast::{cast_f64, cast_i64};
use crate::model::{FormModel, FormModelExt, generate_label};
use crate::rules::{Rule, RuleMap, ValidationResult};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

/// Validates a form model and stores the result on it.
pub trait ModelValidator {
	fn validate(&self, model: &mut dyn FormModel) -> ValidationResult;
}

/// The default rule evaluator.
///
/// Rules other than [`Rule::Required`] skip missing and `null` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleValidator;

impl RuleValidator {
	pub fn new() -> Self {
		Self
	}

	fn validate_model(&self, model: &mut dyn FormModel) -> ValidationResult {
		let mut result = ValidationResult::new();
		let rules = merged_rules(&*model);
		for (key, rule_list) in &rules {
			let segments: Vec<&str> = key.split('.').collect();
			let value = model.get_property_value(key).ok().flatten();
			let label = generate_label(segments.last().copied().unwrap_or(key.as_str()));
			for rule in rule_list {
				match rule {
					Rule::Nested(Some(sub)) => {
						self.validate_nested(value.as_ref(), sub, &segments, &mut result);
					}
					Rule::Nested(None) => {}
					leaf => self.check_leaf(leaf, value.as_ref(), &segments, &label, &mut result),
				}
			}
			// A nested rule without an inline map validates the form model
			// stored in the property, recursively.
			if rule_list.iter().any(|rule| matches!(rule, Rule::Nested(None))) {
				if let Some(child) = model.nested_mut(key) {
					let child_result = self.validate_model(child);
					for error in child_result.errors() {
						let mut path: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
						path.extend(error.value_path.iter().cloned());
						result.add_error(error.message.clone(), path);
					}
				}
			}
		}
		model.process_validation_result(result.clone());
		result
	}

	fn validate_nested(
		&self,
		parent: Option<&Value>,
		rules: &RuleMap,
		parent_path: &[&str],
		result: &mut ValidationResult,
	) {
		for (key, rule_list) in rules {
			let segments: Vec<&str> = key.split('.').collect();
			let value = descend(parent, &segments);
			let mut path = parent_path.to_vec();
			path.extend(&segments);
			let label = generate_label(segments.last().copied().unwrap_or(key.as_str()));
			for rule in rule_list {
				match rule {
					Rule::Nested(Some(sub)) => self.validate_nested(value, sub, &path, result),
					Rule::Nested(None) => {}
					leaf => self.check_leaf(leaf, value, &path, &label, result),
				}
			}
		}
	}

	fn check_leaf(
		&self,
		rule: &Rule,
		value: Option<&Value>,
		path: &[&str],
		label: &str,
		result: &mut ValidationResult,
	) {
		let present = value.is_some_and(|value| !value.is_null());
		match rule {
			Rule::Required => {
				let blank = match value {
					None | Some(Value::Null) => true,
					Some(Value::String(text)) => text.is_empty(),
					Some(Value::Array(items)) => items.is_empty(),
					_ => false,
				};
				if blank {
					result.add_error(format!("{label} cannot be blank."), path.iter().copied());
				}
			}
			_ if !present => {}
			Rule::StringValue => {
				if !value.is_some_and(Value::is_string) {
					result.add_error(format!("{label} must be a string."), path.iter().copied());
				}
			}
			Rule::Length {
				min,
				max,
				less_message,
				greater_message,
			} => {
				let Some(text) = value.and_then(Value::as_str) else {
					result.add_error(format!("{label} must be a string."), path.iter().copied());
					return;
				};
				let count = text.chars().count();
				if let Some(min) = min {
					if count < *min {
						let message = less_message.clone().unwrap_or_else(|| {
							format!("{label} must contain at least {min} characters.")
						});
						result.add_error(message, path.iter().copied());
					}
				}
				if let Some(max) = max {
					if count > *max {
						let message = greater_message.clone().unwrap_or_else(|| {
							format!("{label} must contain at most {max} characters.")
						});
						result.add_error(message, path.iter().copied());
					}
				}
			}
			Rule::Integer { min, max } => {
				let Some(number) = value.and_then(cast_i64) else {
					result.add_error(format!("{label} must be an integer."), path.iter().copied());
					return;
				};
				if let Some(min) = min {
					if number < *min {
						result.add_error(
							format!("{label} must be no less than {min}."),
							path.iter().copied(),
						);
					}
				}
				if let Some(max) = max {
					if number > *max {
						result.add_error(
							format!("{label} must be no greater than {max}."),
							path.iter().copied(),
						);
					}
				}
			}
			Rule::Number { min, max } => {
				let Some(number) = value.and_then(cast_f64) else {
					result.add_error(format!("{label} must be a number."), path.iter().copied());
					return;
				};
				if let Some(min) = min {
					if number < *min {
						result.add_error(
							format!("{label} must be no less than {min}."),
							path.iter().copied(),
						);
					}
				}
				if let Some(max) = max {
					if number > *max {
						result.add_error(
							format!("{label} must be no greater than {max}."),
							path.iter().copied(),
						);
					}
				}
			}
			Rule::Email => {
				let valid = value
					.and_then(Value::as_str)
					.is_some_and(|text| EMAIL_REGEX.is_match(text));
				if !valid {
					result.add_error(
						format!("{label} is not a valid email address."),
						path.iter().copied(),
					);
				}
			}
			Rule::Regex { pattern, message } => {
				let regex = match Regex::new(pattern) {
					Ok(regex) => regex,
					Err(error) => {
						debug!(pattern = %pattern, %error, "skipping unparsable regex rule");
						return;
					}
				};
				let valid = value.and_then(Value::as_str).is_some_and(|text| regex.is_match(text));
				if !valid {
					let message = message
						.clone()
						.unwrap_or_else(|| format!("{label} is invalid."));
					result.add_error(message, path.iter().copied());
				}
			}
			Rule::Safe | Rule::Nested(_) => {}
		}
	}
}

impl ModelValidator for RuleValidator {
	fn validate(&self, model: &mut dyn FormModel) -> ValidationResult {
		let result = self.validate_model(model);
		debug!(errors = result.errors().len(), "validated form model");
		result
	}
}

/// The model's schema-declared rules merged with its provided rules,
/// concatenated per property key.
pub(crate) fn merged_rules(model: &dyn FormModel) -> RuleMap {
	let mut merged = RuleMap::new();
	for field in model.schema().fields() {
		if !field.rules.is_empty() {
			merged.insert(field.name.to_string(), field.rules.clone());
		}
	}
	if let Some(provided) = model.provided_rules() {
		for (key, rules) in provided {
			merged.entry(key).or_default().extend(rules);
		}
	}
	merged
}

fn descend<'a>(value: Option<&'a Value>, segments: &[&str]) -> Option<&'a Value> {
	let mut cursor = value?;
	for segment in segments {
		match cursor {
			Value::Object(map) => cursor = map.get(*segment)?,
			Value::Array(items) => cursor = items.get(segment.parse::<usize>().ok()?)?,
			_ => return None,
		}
	}
	Some(cursor)
}
