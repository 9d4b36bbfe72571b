//! The form model contract and the property resolver.
//!
//! A form model represents one HTML form: its data, validation state and
//! presentation metadata. Models describe themselves through a
//! [`ModelSchema`] instead of runtime reflection; the resolver walks a
//! graph of models and plain JSON values following a normalized property
//! path.

use crate::error::{PropertyError, ValidationResultNotSet};
use crate::path::normalize;
use crate::rules::{RuleMap, ValidationResult};
use crate::schema::ModelSchema;
use serde_json::Value;
use std::collections::HashMap;

/// A property value as seen by the resolver: either plain data or a
/// nested form model to descend into.
pub enum PropertyValue<'a> {
	Plain(Value),
	Model(&'a dyn FormModel),
}

impl std::fmt::Debug for PropertyValue<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Plain(value) => f.debug_tuple("Plain").field(value).finish(),
			Self::Model(model) => f.debug_tuple("Model").field(&model.schema().model()).finish(),
		}
	}
}

/// A form model: data, validation and presentation for one HTML form.
///
/// Implementations must provide the schema, property reads and the
/// validation-result slot. Everything else has a default: the write side
/// rejects all values, there are no nested models, no provided rules and
/// no instance metadata, and the form name derives from the type name.
pub trait FormModel {
	/// The schema describing this model's properties. Built once per
	/// model type, typically in a `LazyLock` static.
	fn schema(&self) -> &'static ModelSchema;

	/// Reads one declared property. `None` means the property is unset,
	/// which the resolver reads as JSON `null`.
	fn property(&self, name: &str) -> Option<PropertyValue<'_>>;

	/// Assigns a coerced value to a declared property. Returns whether
	/// the assignment took place. The default rejects every value.
	fn set_value(&mut self, name: &str, value: &Value) -> bool {
		let _ = (name, value);
		false
	}

	/// Mutable access to a nested form-model property.
	fn nested_mut(&mut self, name: &str) -> Option<&mut dyn FormModel> {
		let _ = name;
		None
	}

	/// Instance-supplied validation rules, merged with the rules declared
	/// on the schema.
	fn provided_rules(&self) -> Option<RuleMap> {
		None
	}

	/// Explicit property labels keyed by dotted property path.
	fn labels(&self) -> HashMap<String, String> {
		HashMap::new()
	}

	/// Explicit property hints keyed by dotted property path.
	fn hints(&self) -> HashMap<String, String> {
		HashMap::new()
	}

	/// Explicit property placeholders keyed by dotted property path.
	fn placeholders(&self) -> HashMap<String, String> {
		HashMap::new()
	}

	/// The form name used to scope submitted data and to build input
	/// names. Defaults to the short type name; empty for types without a
	/// plain identifier name.
	fn form_name(&self) -> String {
		derive_form_name(std::any::type_name_of_val(self))
	}

	/// The result of the last validation pass, if any ran.
	fn validation_result(&self) -> Option<&ValidationResult>;

	fn validation_result_mut(&mut self) -> Option<&mut ValidationResult>;

	/// Stores the result of a validation pass.
	fn process_validation_result(&mut self, result: ValidationResult);

	/// Whether a validation pass has run.
	fn is_validated(&self) -> bool {
		self.validation_result().is_some()
	}

	/// Whether a validation pass has run and found no errors.
	fn is_valid(&self) -> bool {
		self.validation_result().is_some_and(ValidationResult::is_valid)
	}

	/// Appends an error to the stored validation result. Fails when no
	/// validation pass has run yet.
	fn add_error(&mut self, message: &str, value_path: &[&str]) -> Result<(), ValidationResultNotSet> {
		match self.validation_result_mut() {
			Some(result) => {
				result.add_error(message, value_path.iter().copied());
				Ok(())
			}
			None => Err(ValidationResultNotSet),
		}
	}
}

/// Path-based property access for any form model.
///
/// The raw resolver raises typed failures; these methods downgrade the
/// "value absent" subset. [`get_property_value`](Self::get_property_value)
/// turns an undefined array element, or nesting into a `null` leaf, into
/// `Ok(None)`; structural failures (an undefined or static property, or
/// nesting into a non-null scalar) still propagate. The metadata lookups
/// never fail, since missing metadata is an expected case.
pub trait FormModelExt {
	/// View of the model as a trait object for the resolver.
	fn as_form_model(&self) -> &dyn FormModel;

	/// The value at a property path, `Ok(None)` when absent.
	fn get_property_value(&self, property: &str) -> Result<Option<Value>, PropertyError> {
		let path = normalize(property);
		match resolve_value(self.as_form_model(), &path) {
			Ok(PropertyValue::Plain(value)) => Ok(Some(value)),
			Ok(PropertyValue::Model(nested)) => Ok(Some(model_to_value(nested))),
			Err(PropertyError::UndefinedArrayElement { .. }) => Ok(None),
			Err(PropertyError::NotNestable { value: Value::Null, .. }) => Ok(None),
			Err(error) => Err(error),
		}
	}

	/// Whether the path resolves to a value.
	fn has_property(&self, property: &str) -> bool {
		let path = normalize(property);
		resolve_value(self.as_form_model(), &path).is_ok()
	}

	/// The label for a property, generated from the property name when no
	/// explicit label is declared anywhere along the path.
	fn property_label(&self, property: &str) -> String {
		let path = normalize(property);
		resolve_meta(self.as_form_model(), &path, MetaKind::Label)
			.unwrap_or_else(|| generate_label(property))
	}

	/// The hint for a property, empty when none is declared.
	fn property_hint(&self, property: &str) -> String {
		let path = normalize(property);
		resolve_meta(self.as_form_model(), &path, MetaKind::Hint).unwrap_or_default()
	}

	/// The placeholder for a property, empty when none is declared.
	fn property_placeholder(&self, property: &str) -> String {
		let path = normalize(property);
		resolve_meta(self.as_form_model(), &path, MetaKind::Placeholder).unwrap_or_default()
	}
}

impl<T: FormModel> FormModelExt for T {
	fn as_form_model(&self) -> &dyn FormModel {
		self
	}
}

impl<'a> FormModelExt for dyn FormModel + 'a {
	fn as_form_model(&self) -> &dyn FormModel {
		self
	}
}

/// Walks the model graph along `path`, raising a typed failure per
/// failure mode. The rendered diagnostic path distinguishes model member
/// steps (`::name`) from array and map steps (`[name]`).
pub(crate) fn resolve_value<'a>(
	model: &'a dyn FormModel,
	path: &[String],
) -> Result<PropertyValue<'a>, PropertyError> {
	let mut rendered = model.schema().model().to_string();
	let mut cursor = PropertyValue::Model(model);
	for key in path {
		cursor = match cursor {
			PropertyValue::Model(current) => {
				rendered.push_str("::");
				rendered.push_str(key);
				let Some(field) = current.schema().field(key) else {
					return Err(PropertyError::UndefinedObjectProperty { path: rendered });
				};
				if field.static_field {
					return Err(PropertyError::StaticProperty { path: rendered });
				}
				current
					.property(key)
					.unwrap_or(PropertyValue::Plain(Value::Null))
			}
			PropertyValue::Plain(value) => match value {
				Value::Object(mut map) => {
					rendered.push('[');
					rendered.push_str(key);
					rendered.push(']');
					match map.remove(key.as_str()) {
						Some(next) => PropertyValue::Plain(next),
						None => return Err(PropertyError::UndefinedArrayElement { path: rendered }),
					}
				}
				Value::Array(mut items) => {
					rendered.push('[');
					rendered.push_str(key);
					rendered.push(']');
					match key.parse::<usize>().ok().filter(|index| *index < items.len()) {
						Some(index) => PropertyValue::Plain(items.swap_remove(index)),
						None => return Err(PropertyError::UndefinedArrayElement { path: rendered }),
					}
				}
				// The failing segment is not part of the rendered path here:
				// the path names the scalar itself.
				other => {
					return Err(PropertyError::NotNestable {
						path: rendered,
						value: other,
					});
				}
			},
		};
	}
	Ok(cursor)
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum MetaKind {
	Label,
	Hint,
	Placeholder,
}

/// Walks the model graph along `path` looking for metadata.
///
/// At each model boundary the model's own instance map is consulted
/// first, keyed by the remaining dotted path, then the schema descriptor
/// of the current segment. The walk only continues through nested model
/// values and never fails; a missing or static property reads as "not
/// found".
pub(crate) fn resolve_meta(model: &dyn FormModel, path: &[String], kind: MetaKind) -> Option<String> {
	let mut cursor = model;
	for (n, key) in path.iter().enumerate() {
		let remaining = path[n..].join(".");
		let instance_map = match kind {
			MetaKind::Label => cursor.labels(),
			MetaKind::Hint => cursor.hints(),
			MetaKind::Placeholder => cursor.placeholders(),
		};
		if let Some(text) = instance_map.get(&remaining) {
			return Some(text.clone());
		}
		let field = cursor.schema().field(key)?;
		if field.static_field {
			return None;
		}
		let declared = match kind {
			MetaKind::Label => field.label,
			MetaKind::Hint => field.hint,
			MetaKind::Placeholder => field.placeholder,
		};
		if let Some(text) = declared {
			return Some(text.to_string());
		}
		match cursor.property(key) {
			Some(PropertyValue::Model(nested)) => cursor = nested,
			_ => return None,
		}
	}
	None
}

/// Renders a model as a JSON object of its non-static properties.
pub(crate) fn model_to_value(model: &dyn FormModel) -> Value {
	let mut object = serde_json::Map::new();
	for field in model.schema().fields() {
		if field.static_field {
			continue;
		}
		let value = match model.property(field.name) {
			Some(PropertyValue::Plain(value)) => value,
			Some(PropertyValue::Model(nested)) => model_to_value(nested),
			None => Value::Null,
		};
		object.insert(field.name.to_string(), value);
	}
	Value::Object(object)
}

/// Generates a user-friendly label from a property name.
///
/// Underscores, dashes and dots become blanks, camel-case boundaries
/// split into words, and the first letter of each word is uppercased.
///
/// # Examples
///
/// ```
/// use formbind::generate_label;
///
/// assert_eq!(generate_label("department_name"), "Department Name");
/// assert_eq!(generate_label("DepartmentName"), "Department Name");
/// assert_eq!(generate_label("user.login"), "User Login");
/// ```
pub fn generate_label(property: &str) -> String {
	let mut words: Vec<String> = Vec::new();
	let mut current = String::new();
	let mut previous_lower = false;
	for ch in property.chars() {
		if matches!(ch, '_' | '-' | '.') {
			if !current.is_empty() {
				words.push(std::mem::take(&mut current));
			}
			previous_lower = false;
			continue;
		}
		if ch.is_uppercase() && previous_lower && !current.is_empty() {
			words.push(std::mem::take(&mut current));
		}
		previous_lower = ch.is_lowercase() || ch.is_numeric();
		current.push(ch);
	}
	if !current.is_empty() {
		words.push(current);
	}
	words
		.iter()
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect(),
				None => String::new(),
			}
		})
		.collect::<Vec<String>>()
		.join(" ")
}

/// Derives a form name from a fully qualified type name: the last path
/// segment when it is a plain identifier, empty otherwise (closures and
/// other unnameable types).
pub(crate) fn derive_form_name(type_name: &str) -> String {
	let short = type_name.rsplit("::").next().unwrap_or(type_name);
	let is_identifier = !short.is_empty()
		&& short.chars().all(|c| c.is_alphanumeric() || c == '_')
		&& !short.starts_with(|c: char| c.is_ascii_digit());
	if is_identifier {
		short.to_string()
	} else {
		String::new()
	}
}
