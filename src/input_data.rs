//! The per-input adapter consumed by a rendering layer.
//!
//! [`InputData`] is the seam between the binding layer and whatever
//! renders HTML: one instance exposes the name, id, value, metadata and
//! validation errors of a single property expression.

use crate::error::{ExpressionError, PropertyError};
use crate::model::{FormModel, FormModelExt};
use crate::path::ParsedProperty;
use crate::rules::Rule;
use crate::validator::merged_rules;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputDataError {
	#[error(transparent)]
	Expression(#[from] ExpressionError),
	#[error(transparent)]
	Property(#[from] PropertyError),
	/// Tabular input names need a form name to attach the row index to.
	#[error("Form name cannot be empty for tabular inputs.")]
	EmptyFormName,
	/// Metadata was requested for a property the model does not have.
	#[error("Property \"{0}\" does not exist.")]
	PropertyDoesNotExist(String),
}

/// Everything a rendering layer needs to draw one input.
pub trait InputData {
	/// The HTML input name.
	fn name(&self) -> Result<String, InputDataError>;
	/// The HTML input id, derived from the name.
	fn id(&self) -> Result<String, InputDataError>;
	/// The current value, `None` when absent.
	fn value(&self) -> Result<Option<Value>, InputDataError>;
	/// The label, generated from the property name when none is declared.
	fn label(&self) -> Result<String, InputDataError>;
	/// The hint, empty when none is declared.
	fn hint(&self) -> Result<String, InputDataError>;
	/// The placeholder, `None` when none is declared.
	fn placeholder(&self) -> Result<Option<String>, InputDataError>;
	/// The merged rules declared for the base property.
	fn validation_rules(&self) -> Vec<Rule>;
	/// Whether the model has been validated.
	fn is_validated(&self) -> bool;
	/// Error messages recorded at the property's path, empty when the
	/// model was never validated.
	fn validation_errors(&self) -> Vec<String>;
}

/// [`InputData`] over a form model and a property expression.
///
/// # Examples
///
/// ```
/// use formbind::{
///     FieldDescriptor, FormModel, FormModelInputData, InputData, ModelSchema, PropertyValue,
///     ValidationResult,
/// };
/// use serde_json::json;
/// use std::sync::LazyLock;
///
/// struct PostForm {
///     content: String,
///     validation: Option<ValidationResult>,
/// }
///
/// impl FormModel for PostForm {
///     fn schema(&self) -> &'static ModelSchema {
///         static SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
///             ModelSchema::new("PostForm").with_field(FieldDescriptor::new("content"))
///         });
///         &SCHEMA
///     }
///     fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
///         match name {
///             "content" => Some(PropertyValue::Plain(json!(self.content))),
///             _ => None,
///         }
///     }
///     fn validation_result(&self) -> Option<&ValidationResult> {
///         self.validation.as_ref()
///     }
///     fn validation_result_mut(&mut self) -> Option<&mut ValidationResult> {
///         self.validation.as_mut()
///     }
///     fn process_validation_result(&mut self, result: ValidationResult) {
///         self.validation = Some(result);
///     }
/// }
///
/// let form = PostForm { content: "hello".into(), validation: None };
/// let input = FormModelInputData::new(&form, "content");
///
/// assert_eq!(input.name().unwrap(), "PostForm[content]");
/// assert_eq!(input.id().unwrap(), "postform-content");
/// assert_eq!(input.value().unwrap(), Some(json!("hello")));
/// assert_eq!(input.label().unwrap(), "Content");
/// assert!(!input.is_validated());
/// ```
pub struct FormModelInputData<'a> {
	model: &'a dyn FormModel,
	property: String,
}

impl<'a> FormModelInputData<'a> {
	pub fn new(model: &'a dyn FormModel, property: impl Into<String>) -> Self {
		Self {
			model,
			property: property.into(),
		}
	}

	fn parsed(&self) -> Result<ParsedProperty, ExpressionError> {
		ParsedProperty::parse(&self.property)
	}

	/// The parsed base property name, checked for existence eagerly so
	/// metadata accessors fail fast on a property the model lacks.
	fn property_name(&self) -> Result<String, InputDataError> {
		let parsed = self.parsed()?;
		if !self.model.has_property(&parsed.name) {
			return Err(InputDataError::PropertyDoesNotExist(parsed.name));
		}
		Ok(parsed.name)
	}
}

impl InputData for FormModelInputData<'_> {
	fn name(&self) -> Result<String, InputDataError> {
		let parsed = self.parsed()?;
		let form_name = self.model.form_name();

		if form_name.is_empty() && parsed.prefix.is_empty() {
			return Ok(self.property.clone());
		}
		if !form_name.is_empty() {
			return Ok(format!(
				"{form_name}{}[{}]{}",
				parsed.prefix, parsed.name, parsed.suffix
			));
		}
		Err(InputDataError::EmptyFormName)
	}

	fn id(&self) -> Result<String, InputDataError> {
		let name = self.name()?.to_lowercase();
		Ok(name
			.replace("[]", "")
			.replace("][", "-")
			.replace('[', "-")
			.replace(']', "")
			.replace(' ', "-")
			.replace('.', "-"))
	}

	fn value(&self) -> Result<Option<Value>, InputDataError> {
		let parsed = self.parsed()?;
		let value = self
			.model
			.get_property_value(&format!("{}{}", parsed.name, parsed.suffix))?;
		Ok(value)
	}

	fn label(&self) -> Result<String, InputDataError> {
		let property = self.property_name()?;
		Ok(self.model.property_label(&property))
	}

	fn hint(&self) -> Result<String, InputDataError> {
		let property = self.property_name()?;
		Ok(self.model.property_hint(&property))
	}

	fn placeholder(&self) -> Result<Option<String>, InputDataError> {
		let property = self.property_name()?;
		let placeholder = self.model.property_placeholder(&property);
		Ok((!placeholder.is_empty()).then_some(placeholder))
	}

	fn validation_rules(&self) -> Vec<Rule> {
		match self.parsed() {
			Ok(parsed) => merged_rules(self.model)
				.remove(&parsed.name)
				.unwrap_or_default(),
			Err(_) => Vec::new(),
		}
	}

	fn is_validated(&self) -> bool {
		self.model.is_validated()
	}

	fn validation_errors(&self) -> Vec<String> {
		let Ok(parsed) = self.parsed() else {
			return Vec::new();
		};
		match self.model.validation_result() {
			Some(result) => result.error_messages_by_path(&parsed.path.join(".")),
			None => Vec::new(),
		}
	}
}
