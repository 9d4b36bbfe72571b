//! Form-model data binding for Rust web services
//!
//! This crate maps raw, framework-agnostic request data (nested JSON
//! maps from HTTP POST bodies) onto typed form models, optionally
//! validates the result, and exposes model properties to a separate
//! HTML-rendering layer through a small adapter interface:
//!
//! - Property-path resolution over graphs of models and plain values,
//!   with a distinct error per failure mode
//! - Hydration-map derivation from declared validation rules, including
//!   deeply nested and dotted rule declarations
//! - A hydrator facade with scoped population, nested-form
//!   reconciliation and a three-valued strictness setting
//! - Per-input adapters (name, id, value, label, hint, placeholder,
//!   validation errors) for a rendering layer to consume

pub mod cast;
pub mod error;
pub mod hydrator;
pub mod input_data;
pub mod map;
pub mod model;
pub mod path;
pub mod request;
pub mod rules;
pub mod schema;
pub mod validator;

pub use error::{ExpressionError, PropertyError, ValidationResultNotSet};
pub use hydrator::{FormHydrator, ModelHydrator, PopulateOptions, ValueHydrator};
pub use input_data::{FormModelInputData, InputData, InputDataError};
pub use map::{HydrationMap, MapTarget};
pub use model::{FormModel, FormModelExt, PropertyValue, generate_label};
pub use path::{ParsedProperty, normalize};
pub use request::FormRequest;
pub use rules::{Rule, RuleMap, ValidationError, ValidationResult};
pub use schema::{FieldDescriptor, ModelSchema};
pub use validator::{ModelValidator, RuleValidator};
