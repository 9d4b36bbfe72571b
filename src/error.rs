//! Typed failures for property-path resolution.

use serde_json::Value;

/// Failure raised while walking a property path through a model graph.
///
/// Each variant carries the path rendered up to the failing step. Model
/// member steps render as `::name`, array and map steps as `[name]`, and
/// the root renders as the model's short type name.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
	/// The current value is an array or map and the next key is absent.
	#[error("Undefined array element: \"{path}\".")]
	UndefinedArrayElement { path: String },
	/// The current value is a model without the named property.
	#[error("Undefined object property: \"{path}\".")]
	UndefinedObjectProperty { path: String },
	/// The named property exists but is declared static.
	#[error("Object property is static: \"{path}\".")]
	StaticProperty { path: String },
	/// The current value is a scalar but the path has segments left.
	///
	/// Carries the offending value so that callers can treat nesting into a
	/// `null` leaf as "value absent" instead of an error.
	#[error("Property \"{path}\" doesn't support nested values.")]
	NotNestable { path: String, value: Value },
}

impl PropertyError {
	/// The rendered path the failure occurred at.
	pub fn path(&self) -> &str {
		match self {
			Self::UndefinedArrayElement { path }
			| Self::UndefinedObjectProperty { path }
			| Self::StaticProperty { path }
			| Self::NotNestable { path, .. } => path,
		}
	}
}

/// Failure raised when a property expression does not parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Property name must contain word characters only.")]
pub struct ExpressionError;

/// Failure raised when validation state is amended before any validation
/// pass has run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation result is not set.")]
pub struct ValidationResultNotSet;
