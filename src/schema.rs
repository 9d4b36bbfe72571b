//! Per-model schema descriptors.
//!
//! The binding layer never reflects over model types at runtime. Instead
//! every model publishes a [`ModelSchema`] describing its properties:
//! names, static/readonly flags, declarative metadata and declared
//! validation rules. Models build the schema once per type, typically in
//! a `LazyLock` static.

use crate::rules::Rule;

/// One declared model property.
#[derive(Debug, Clone, Default)]
pub struct FieldDescriptor {
	pub name: &'static str,
	/// Static properties are never readable or writable through the
	/// property resolver.
	pub static_field: bool,
	/// Readonly properties are skipped during hydration and nested-form
	/// scans.
	pub readonly: bool,
	pub label: Option<&'static str>,
	pub hint: Option<&'static str>,
	pub placeholder: Option<&'static str>,
	/// Rules declared on the property itself.
	pub rules: Vec<Rule>,
}

impl FieldDescriptor {
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			..Self::default()
		}
	}

	pub fn static_field(mut self) -> Self {
		self.static_field = true;
		self
	}

	pub fn readonly(mut self) -> Self {
		self.readonly = true;
		self
	}

	pub fn with_label(mut self, label: &'static str) -> Self {
		self.label = Some(label);
		self
	}

	pub fn with_hint(mut self, hint: &'static str) -> Self {
		self.hint = Some(hint);
		self
	}

	pub fn with_placeholder(mut self, placeholder: &'static str) -> Self {
		self.placeholder = Some(placeholder);
		self
	}

	pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
		self.rules = rules;
		self
	}
}

/// The schema of one model type.
///
/// # Examples
///
/// ```
/// use formbind::{FieldDescriptor, ModelSchema, Rule};
///
/// let schema = ModelSchema::new("CarForm")
///     .with_field(FieldDescriptor::new("name").with_rules(vec![Rule::length_min(3)]));
///
/// assert_eq!(schema.model(), "CarForm");
/// assert!(schema.field("name").is_some());
/// assert!(schema.field("color").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelSchema {
	model: &'static str,
	fields: Vec<FieldDescriptor>,
}

impl ModelSchema {
	/// Creates an empty schema. `model` is the short type name used as
	/// the root of diagnostic property paths.
	pub fn new(model: &'static str) -> Self {
		Self {
			model,
			fields: Vec::new(),
		}
	}

	pub fn with_field(mut self, field: FieldDescriptor) -> Self {
		self.fields.push(field);
		self
	}

	/// The short type name of the model.
	pub fn model(&self) -> &'static str {
		self.model
	}

	/// All declared properties in declaration order.
	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	/// Looks up a property descriptor by name.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|field| field.name == name)
	}
}
