//! The form hydrator: fills models with submitted data and optionally
//! checks validity.
//!
//! [`FormHydrator`] orchestrates scope selection, nested-form
//! reconciliation and hydration-map derivation, then hands the actual
//! per-property assignment to a [`ModelHydrator`]. Malformed data shapes
//! are reported as a plain `false`, never an error; callers branch on
//! the boolean.

use crate::map::{HydrationMap, MapTarget, create_map};
use crate::model::{FormModel, PropertyValue};
use crate::request::FormRequest;
use crate::rules::ValidationResult;
use crate::validator::{ModelValidator, RuleValidator};
use http::Method;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Options for a populate call.
///
/// `map` overrides or extends the generated hydration map, `strict`
/// controls how the map limits population (see
/// [`HydrationMap`](crate::map)), and `scope` names the top-level data
/// key the model's data lives under. The scope defaults to the model's
/// form name; an empty scope uses the data as-is.
#[derive(Debug, Clone, Default)]
pub struct PopulateOptions {
	pub map: Option<HydrationMap>,
	pub strict: Option<bool>,
	pub scope: Option<String>,
}

impl PopulateOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_map(mut self, map: HydrationMap) -> Self {
		self.map = Some(map);
		self
	}

	pub fn with_strict(mut self, strict: bool) -> Self {
		self.strict = Some(strict);
		self
	}

	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());
		self
	}
}

/// Applies mapped values onto a model.
pub trait ModelHydrator {
	fn hydrate(
		&self,
		model: &mut dyn FormModel,
		data: &Map<String, Value>,
		map: &HydrationMap,
		strict: bool,
	);
}

/// The default hydrator.
///
/// Mapped paths are looked up in the scoped data, tolerating nested
/// maps, literal dotted keys and any mix of the two. Nested targets
/// recurse into nested form models, or assemble a plain map for
/// value-typed properties. Unmapped properties fill by direct name
/// lookup only when `strict` is off. Assignment goes through the model's
/// `set_value`, so a value the model cannot coerce skips the property
/// silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueHydrator;

impl ValueHydrator {
	pub fn new() -> Self {
		Self
	}

	fn hydrate_fields(
		&self,
		model: &mut dyn FormModel,
		data: &Map<String, Value>,
		map: &HydrationMap,
		strict: bool,
	) {
		for field in model.schema().fields() {
			if field.static_field || field.readonly {
				continue;
			}
			match map.get(field.name) {
				Some(MapTarget::Path(path)) => {
					if let Some(value) = lookup(data, path) {
						model.set_value(field.name, &value);
					}
				}
				Some(MapTarget::Nested(nested)) => {
					if let Some(child) = model.nested_mut(field.name) {
						self.hydrate_fields(child, data, nested, strict);
					} else if let Some(assembled) = assemble(data, nested) {
						model.set_value(field.name, &Value::Object(assembled));
					}
				}
				None if !strict => {
					let Some(value) = data.get(field.name) else {
						continue;
					};
					if let Value::Object(sub) = value {
						if let Some(child) = model.nested_mut(field.name) {
							self.hydrate_fields(child, sub, &HydrationMap::new(), false);
							continue;
						}
					}
					model.set_value(field.name, value);
				}
				None => {}
			}
		}
	}
}

impl ModelHydrator for ValueHydrator {
	fn hydrate(
		&self,
		model: &mut dyn FormModel,
		data: &Map<String, Value>,
		map: &HydrationMap,
		strict: bool,
	) {
		self.hydrate_fields(model, data, map, strict);
	}
}

/// Fills form models with submitted data and optionally validates them.
pub struct FormHydrator {
	hydrator: Box<dyn ModelHydrator>,
	validator: Box<dyn ModelValidator>,
}

impl FormHydrator {
	/// A hydrator with the default [`ValueHydrator`] and
	/// [`RuleValidator`].
	pub fn new() -> Self {
		Self {
			hydrator: Box::new(ValueHydrator::new()),
			validator: Box::new(RuleValidator::new()),
		}
	}

	/// A hydrator with custom collaborators.
	pub fn with_parts(hydrator: Box<dyn ModelHydrator>, validator: Box<dyn ModelValidator>) -> Self {
		Self { hydrator, validator }
	}

	/// Fills the model with the data under the default options.
	///
	/// Returns `false` when the data is not a map, or when the effective
	/// scope is non-empty and the scoped entry is absent or not a map.
	pub fn populate(&self, model: &mut dyn FormModel, data: &Value) -> bool {
		self.populate_with(model, data, PopulateOptions::new())
	}

	/// Fills the model with the data.
	///
	/// With a non-empty scope, top-level entries keyed by a nested form's
	/// own form name are folded into the scoped data under the owning
	/// property first, so one submission may mix flat per-form-name maps,
	/// fully nested maps and dotted keys interchangeably.
	pub fn populate_with(
		&self,
		model: &mut dyn FormModel,
		data: &Value,
		options: PopulateOptions,
	) -> bool {
		let Value::Object(data) = data else {
			debug!("populate data is not a map");
			return false;
		};
		let scope = options.scope.clone().unwrap_or_else(|| model.form_name());
		let hydrate_data = if scope.is_empty() {
			data.clone()
		} else {
			let Some(Value::Object(scoped)) = data.get(&scope) else {
				debug!(%scope, "scope key absent or not a map");
				return false;
			};
			let scoped = scoped.clone();
			let mut remainder = data.clone();
			let reconciled = filter_nested_forms(&*model, &mut remainder);
			deep_merge(scoped, reconciled)
		};
		let map = create_map(&*model, options.map.as_ref(), options.strict);
		trace!(entries = map.len(), strict = ?options.strict, "derived hydration map");
		self.hydrator
			.hydrate(model, &hydrate_data, &map, options.strict.unwrap_or(true));
		true
	}

	/// Validates the model and stores the result on it.
	pub fn validate(&self, model: &mut dyn FormModel) -> ValidationResult {
		self.validator.validate(model)
	}

	/// Fills the model and validates it. True when both population
	/// succeeded and the result is valid.
	pub fn populate_and_validate(&self, model: &mut dyn FormModel, data: &Value) -> bool {
		self.populate_and_validate_with(model, data, PopulateOptions::new())
	}

	pub fn populate_and_validate_with(
		&self,
		model: &mut dyn FormModel,
		data: &Value,
		options: PopulateOptions,
	) -> bool {
		if !self.populate_with(model, data, options) {
			return false;
		}
		self.validate(model).is_valid()
	}

	/// Fills the model from a request's parsed body. Returns `false` for
	/// anything but a POST request.
	pub fn populate_from_post(&self, model: &mut dyn FormModel, request: &FormRequest) -> bool {
		self.populate_from_post_with(model, request, PopulateOptions::new())
	}

	pub fn populate_from_post_with(
		&self,
		model: &mut dyn FormModel,
		request: &FormRequest,
		options: PopulateOptions,
	) -> bool {
		if *request.method() != Method::POST {
			return false;
		}
		self.populate_with(model, request.parsed_body(), options)
	}

	/// Fills the model from a POST body and validates it.
	pub fn populate_from_post_and_validate(
		&self,
		model: &mut dyn FormModel,
		request: &FormRequest,
	) -> bool {
		self.populate_from_post_and_validate_with(model, request, PopulateOptions::new())
	}

	pub fn populate_from_post_and_validate_with(
		&self,
		model: &mut dyn FormModel,
		request: &FormRequest,
		options: PopulateOptions,
	) -> bool {
		if *request.method() != Method::POST {
			return false;
		}
		self.populate_and_validate_with(model, request.parsed_body(), options)
	}
}

impl Default for FormHydrator {
	fn default() -> Self {
		Self::new()
	}
}

/// Recursively extracts top-level entries keyed by nested form names,
/// folding each into a map keyed by the owning property. Matched entries
/// are removed from `data`.
fn filter_nested_forms(model: &dyn FormModel, data: &mut Map<String, Value>) -> Map<String, Value> {
	let mut reconciled = Map::new();
	for field in model.schema().fields() {
		if field.static_field || field.readonly {
			continue;
		}
		let Some(PropertyValue::Model(child)) = model.property(field.name) else {
			continue;
		};
		let nested = filter_nested_forms(child, data);
		let child_scope = child.form_name();
		if let Some(value) = data.remove(&child_scope) {
			let mut base = match value {
				Value::Object(map) => map,
				_ => Map::new(),
			};
			for (key, nested_value) in nested {
				base.insert(key, nested_value);
			}
			reconciled.insert(field.name.to_string(), Value::Object(base));
		} else if !nested.is_empty() {
			reconciled.insert(field.name.to_string(), Value::Object(nested));
		}
	}
	reconciled
}

/// Merges `overlay` into `base`. Maps merge recursively, anything else
/// from the overlay wins.
fn deep_merge(mut base: Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
	for (key, value) in overlay {
		match (base.remove(&key), value) {
			(Some(Value::Object(existing)), Value::Object(incoming)) => {
				base.insert(key, Value::Object(deep_merge(existing, incoming)));
			}
			(_, value) => {
				base.insert(key, value);
			}
		}
	}
	base
}

/// Looks a path up in the data, trying the longest literal dotted key
/// first at every level before descending segment by segment. When no
/// container holds the path directly, dotted keys below it are gathered
/// into a map, so fully flattened submissions still resolve.
fn lookup(data: &Map<String, Value>, path: &[String]) -> Option<Value> {
	let segments: Vec<&str> = path.iter().flat_map(|segment| segment.split('.')).collect();
	lookup_segments(data, &segments)
}

fn lookup_segments(data: &Map<String, Value>, segments: &[&str]) -> Option<Value> {
	for split in (1..=segments.len()).rev() {
		let key = segments[..split].join(".");
		let Some(value) = data.get(&key) else {
			continue;
		};
		if split == segments.len() {
			return Some(value.clone());
		}
		if let Value::Object(sub) = value {
			if let Some(found) = lookup_segments(sub, &segments[split..]) {
				return Some(found);
			}
		}
	}

	let prefix = format!("{}.", segments.join("."));
	let mut gathered = Map::new();
	for (key, value) in data {
		if let Some(rest) = key.strip_prefix(&prefix) {
			if !rest.is_empty() {
				insert_path(&mut gathered, rest.split('.'), value.clone());
			}
		}
	}
	(!gathered.is_empty()).then_some(Value::Object(gathered))
}

/// Inserts a value at a dotted path, creating intermediate maps.
fn insert_path<'a>(
	target: &mut Map<String, Value>,
	mut path: impl Iterator<Item = &'a str>,
	value: Value,
) {
	let Some(head) = path.next() else {
		return;
	};
	let rest: Vec<&str> = path.collect();
	if rest.is_empty() {
		target.insert(head.to_string(), value);
		return;
	}
	let entry = target
		.entry(head.to_string())
		.or_insert_with(|| Value::Object(Map::new()));
	if let Value::Object(sub) = entry {
		insert_path(sub, rest.into_iter(), value);
	}
}

/// Builds a plain map for a value-typed property from a nested target.
fn assemble(data: &Map<String, Value>, map: &HydrationMap) -> Option<Map<String, Value>> {
	let mut assembled = Map::new();
	for (key, target) in map.iter() {
		match target {
			MapTarget::Path(path) => {
				if let Some(value) = lookup(data, path) {
					assembled.insert(key.clone(), value);
				}
			}
			MapTarget::Nested(nested) => {
				if let Some(sub) = assemble(data, nested) {
					assembled.insert(key.clone(), Value::Object(sub));
				}
			}
		}
	}
	(!assembled.is_empty()).then_some(assembled)
}
