//! Hydration maps and their derivation from declared rules.
//!
//! A hydration map tells the hydrator which external data keys feed
//! which model properties. Maps are built fresh for every populate call
//! by merging a map generated from the model's validation rules with an
//! optional caller-supplied map.

use crate::model::{FormModel, PropertyValue};
use crate::rules::{Rule, RuleMap};
use std::collections::BTreeMap;

/// Where a mapped property reads its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapTarget {
	/// An absolute path into the scoped data.
	Path(Vec<String>),
	/// A nested map for a structured property.
	Nested(HydrationMap),
}

impl MapTarget {
	/// A [`MapTarget::Path`] from anything yielding path segments.
	pub fn path<I, S>(segments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::Path(segments.into_iter().map(Into::into).collect())
	}
}

/// A mapping from model property names to data locations.
///
/// # Examples
///
/// ```
/// use formbind::{HydrationMap, MapTarget};
///
/// let map = HydrationMap::new().with_entry("c", MapTarget::path(["d"]));
/// assert_eq!(map.get("c"), Some(&MapTarget::path(["d"])));
///
/// // Merging a map with itself is the identity.
/// assert_eq!(HydrationMap::merge(&map, &map), map);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationMap {
	entries: BTreeMap<String, MapTarget>,
}

impl HydrationMap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_entry(mut self, key: impl Into<String>, target: MapTarget) -> Self {
		self.insert(key, target);
		self
	}

	pub fn insert(&mut self, key: impl Into<String>, target: MapTarget) {
		self.entries.insert(key.into(), target);
	}

	pub fn get(&self, key: &str) -> Option<&MapTarget> {
		self.entries.get(key)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &MapTarget)> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Merges two maps key by key. When both sides hold a nested map the
	/// merge recurses; a nested side always beats a plain path; otherwise
	/// the first map's entry wins. Keys only present in the second map
	/// are appended.
	pub fn merge(first: &Self, second: &Self) -> Self {
		let mut result = BTreeMap::new();
		for (key, target) in &first.entries {
			let merged = match (target, second.entries.get(key)) {
				(MapTarget::Nested(a), Some(MapTarget::Nested(b))) => {
					MapTarget::Nested(Self::merge(a, b))
				}
				(MapTarget::Path(_), Some(nested @ MapTarget::Nested(_))) => nested.clone(),
				_ => target.clone(),
			};
			result.insert(key.clone(), merged);
		}
		for (key, target) in &second.entries {
			if !result.contains_key(key) {
				result.insert(key.clone(), target.clone());
			}
		}
		Self { entries: result }
	}
}

/// Builds the effective hydration map for a populate call.
///
/// Strictness is ternary. `Some(false)` returns the user map verbatim
/// (or an empty map), leaving unmapped properties free to fill by name.
/// `Some(true)` with a user map returns it verbatim, so only listed keys
/// populate. In every other case the map generated from the model's
/// rules is used, merged under the user map when one is given.
pub(crate) fn create_map(
	model: &dyn FormModel,
	user_map: Option<&HydrationMap>,
	strict: Option<bool>,
) -> HydrationMap {
	match (strict, user_map) {
		(Some(false), user) => user.cloned().unwrap_or_default(),
		(Some(true), Some(user)) => user.clone(),
		(_, user) => {
			let generated = map_from_rules(model);
			match user {
				Some(user) => HydrationMap::merge(user, &generated),
				None => generated,
			}
		}
	}
}

/// Map of every property that carries at least one rule, from the
/// schema-declared rules merged with the model's provided rules.
fn map_from_rules(model: &dyn FormModel) -> HydrationMap {
	let declared = map_from_declared(model, &[]);
	match model.provided_rules() {
		Some(rules) => HydrationMap::merge(&declared, &map_from_provider(model, &rules, &[])),
		None => declared,
	}
}

fn map_from_declared(model: &dyn FormModel, path: &[String]) -> HydrationMap {
	let mut map = HydrationMap::new();
	for field in model.schema().fields() {
		if field.static_field || field.rules.is_empty() {
			continue;
		}
		let own_path = join_path(path, field.name);
		map.insert(field.name, MapTarget::Path(own_path.clone()));
		for rule in &field.rules {
			let Rule::Nested(nested) = rule else { continue };
			match nested {
				Some(rule_map) => {
					let nested_map = nested_map_from_rules(rule_map, &own_path);
					if !nested_map.is_empty() {
						map.insert(field.name, MapTarget::Nested(nested_map));
					}
				}
				// Rules are derived from the nested model stored in the
				// property; a child without rules stays a plain path.
				None => {
					if let Some(PropertyValue::Model(child)) = model.property(field.name) {
						let child_map = map_from_declared(child, &own_path);
						if !child_map.is_empty() {
							map.insert(field.name, MapTarget::Nested(child_map));
						}
					}
				}
			}
		}
	}
	map
}

fn map_from_provider(model: &dyn FormModel, rules: &RuleMap, path: &[String]) -> HydrationMap {
	let mut map = HydrationMap::new();
	for (key, rule_list) in rules {
		let own_path = join_path(path, key);
		map.insert(key.clone(), MapTarget::Path(own_path.clone()));
		for rule in rule_list {
			if let Rule::Nested(Some(sub)) = rule {
				let nested = nested_map_from_rules(sub, &own_path);
				if !nested.is_empty() {
					map.insert(key.clone(), MapTarget::Nested(nested));
				}
			}
		}
	}

	// Nested models that provide rules of their own contribute a nested
	// map under their property key; the nested side wins the merge.
	let mut nested_models = HydrationMap::new();
	for field in model.schema().fields() {
		if field.static_field || field.readonly {
			continue;
		}
		if let Some(PropertyValue::Model(child)) = model.property(field.name) {
			if let Some(child_rules) = child.provided_rules() {
				let child_path = join_path(path, field.name);
				nested_models.insert(
					field.name,
					MapTarget::Nested(map_from_provider(child, &child_rules, &child_path)),
				);
			}
		}
	}

	HydrationMap::merge(&map, &nested_models)
}

/// Expands a nested rule map into a hydration map. Dotted keys fold
/// into nested maps segment by segment, like the path normalizer.
fn nested_map_from_rules(rule_map: &RuleMap, parent: &[String]) -> HydrationMap {
	let mut map = HydrationMap::new();
	for (key, rules) in rule_map {
		if key.contains('.') {
			let key_path: Vec<String> = key.split('.').map(str::to_string).collect();
			let head = key_path[0].clone();
			map.insert(head.clone(), dot_key_target(&key_path, parent, None));
			for rule in rules {
				if let Rule::Nested(Some(sub)) = rule {
					let sub_parent: Vec<String> =
						parent.iter().cloned().chain(key_path.iter().cloned()).collect();
					let nested = nested_map_from_rules(sub, &sub_parent);
					map.insert(head.clone(), dot_key_target(&key_path, parent, Some(nested)));
				}
			}
		} else {
			let own_path = join_path(parent, key);
			map.insert(key.clone(), MapTarget::Path(own_path.clone()));
			for rule in rules {
				if let Rule::Nested(Some(sub)) = rule {
					let nested = nested_map_from_rules(sub, &own_path);
					map.insert(key.clone(), MapTarget::Nested(nested));
				}
			}
		}
	}
	map
}

/// Target for the head segment of a dotted rule key: the tail folds into
/// nested maps, innermost first.
fn dot_key_target(key_path: &[String], parent: &[String], nested: Option<HydrationMap>) -> MapTarget {
	let mut target = match nested {
		Some(map) => MapTarget::Nested(map),
		None => MapTarget::Path(parent.iter().cloned().chain(key_path.iter().cloned()).collect()),
	};
	for key in key_path[1..].iter().rev() {
		let mut wrapper = HydrationMap::new();
		wrapper.insert(key.clone(), target);
		target = MapTarget::Nested(wrapper);
	}
	target
}

fn join_path(path: &[String], key: &str) -> Vec<String> {
	path.iter().cloned().chain([key.to_string()]).collect()
}
