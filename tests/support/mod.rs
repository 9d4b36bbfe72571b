#![allow(dead_code)]
//! Fixture form models shared by the integration suites.


use formbind::cast::{cast_array, cast_bool, cast_i64, cast_string};
use formbind::{
	FieldDescriptor, FormModel, ModelSchema, PropertyValue, Rule, RuleMap, ValidationResult,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::LazyLock;

/// The validation-result slot every fixture carries as a `validation`
/// field.
macro_rules! validation_slot {
	() => {
		fn validation_result(&self) -> Option<&::formbind::ValidationResult> {
			self.validation.as_ref()
		}

		fn validation_result_mut(&mut self) -> Option<&mut ::formbind::ValidationResult> {
			self.validation.as_mut()
		}

		fn process_validation_result(&mut self, result: ::formbind::ValidationResult) {
			self.validation = Some(result);
		}
	};
}
pub(crate) use validation_slot;

pub(crate) fn set_string(slot: &mut String, value: &Value) -> bool {
	match cast_string(value) {
		Some(text) => {
			*slot = text;
			true
		}
		None => false,
	}
}

pub(crate) fn set_opt_string(slot: &mut Option<String>, value: &Value) -> bool {
	match cast_string(value) {
		Some(text) => {
			*slot = Some(text);
			true
		}
		None => false,
	}
}

pub(crate) fn set_i64(slot: &mut i64, value: &Value) -> bool {
	match cast_i64(value) {
		Some(number) => {
			*slot = number;
			true
		}
		None => false,
	}
}

pub(crate) fn set_opt_i64(slot: &mut Option<i64>, value: &Value) -> bool {
	match cast_i64(value) {
		Some(number) => {
			*slot = Some(number);
			true
		}
		None => false,
	}
}

pub(crate) fn set_bool(slot: &mut bool, value: &Value) -> bool {
	match cast_bool(value) {
		Some(flag) => {
			*slot = flag;
			true
		}
		None => false,
	}
}

/// The login form: provided rules, instance metadata and a static
/// property that must stay unreachable through the resolver.
#[derive(Debug, Default)]
pub struct LoginForm {
	pub login: Option<String>,
	pub password: Option<String>,
	pub remember_me: bool,
	validation: Option<ValidationResult>,
}

impl LoginForm {
	pub fn new() -> Self {
		Self::default()
	}
}

impl FormModel for LoginForm {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
			ModelSchema::new("LoginForm")
				.with_field(FieldDescriptor::new("extra_field").static_field())
				.with_field(FieldDescriptor::new("login"))
				.with_field(FieldDescriptor::new("password"))
				.with_field(FieldDescriptor::new("remember_me"))
		});
		&SCHEMA
	}

	fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
		match name {
			"login" => Some(PropertyValue::Plain(json!(self.login))),
			"password" => Some(PropertyValue::Plain(json!(self.password))),
			"remember_me" => Some(PropertyValue::Plain(json!(self.remember_me))),
			_ => None,
		}
	}

	fn set_value(&mut self, name: &str, value: &Value) -> bool {
		match name {
			"login" => set_opt_string(&mut self.login, value),
			"password" => set_opt_string(&mut self.password, value),
			"remember_me" => set_bool(&mut self.remember_me, value),
			_ => false,
		}
	}

	fn provided_rules(&self) -> Option<RuleMap> {
		Some(RuleMap::from([
			(
				"login".to_string(),
				vec![
					Rule::Required,
					Rule::Length {
						min: Some(4),
						max: Some(40),
						less_message: Some("Is too short.".to_string()),
						greater_message: Some("Is too long.".to_string()),
					},
					Rule::Email,
				],
			),
			(
				"password".to_string(),
				vec![
					Rule::Required,
					Rule::Length {
						min: Some(8),
						max: None,
						less_message: Some("Is too short.".to_string()),
						greater_message: None,
					},
				],
			),
			("remember_me".to_string(), vec![Rule::Safe]),
			("extra_field".to_string(), vec![Rule::Safe]),
		]))
	}

	fn labels(&self) -> HashMap<String, String> {
		HashMap::from([
			("login".to_string(), "Login:".to_string()),
			("password".to_string(), "Password:".to_string()),
			("remember_me".to_string(), "remember Me:".to_string()),
		])
	}

	fn hints(&self) -> HashMap<String, String> {
		HashMap::from([
			("login".to_string(), "Write your id or email.".to_string()),
			("password".to_string(), "Write your password.".to_string()),
		])
	}

	fn placeholders(&self) -> HashMap<String, String> {
		HashMap::from([
			("login".to_string(), "Type Username or Email.".to_string()),
			("password".to_string(), "Type Password.".to_string()),
		])
	}

	validation_slot!();
}

/// A form with a single schema-declared rule.
#[derive(Debug, Default)]
pub struct CarForm {
	pub name: String,
	validation: Option<ValidationResult>,
}

impl CarForm {
	pub fn new() -> Self {
		Self::default()
	}
}

impl FormModel for CarForm {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
			ModelSchema::new("CarForm")
				.with_field(FieldDescriptor::new("name").with_rules(vec![Rule::length_min(3)]))
		});
		&SCHEMA
	}

	fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
		match name {
			"name" => Some(PropertyValue::Plain(json!(self.name))),
			_ => None,
		}
	}

	fn set_value(&mut self, name: &str, value: &Value) -> bool {
		match name {
			"name" => set_string(&mut self.name, value),
			_ => false,
		}
	}

	validation_slot!();
}

/// A form holding plain JSON containers, for resolver walks through
/// arrays and maps.
#[derive(Debug)]
pub struct NestedForm {
	pub letters: Value,
	pub object: Value,
	validation: Option<ValidationResult>,
}

impl Default for NestedForm {
	fn default() -> Self {
		Self {
			letters: json!(["A"]),
			object: json!({"name": "Bo", "numbers": [7, 42]}),
			validation: None,
		}
	}
}

impl NestedForm {
	pub fn new() -> Self {
		Self::default()
	}
}

impl FormModel for NestedForm {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
			ModelSchema::new("NestedForm")
				.with_field(FieldDescriptor::new("letters"))
				.with_field(FieldDescriptor::new("object"))
		});
		&SCHEMA
	}

	fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
		match name {
			"letters" => Some(PropertyValue::Plain(self.letters.clone())),
			"object" => Some(PropertyValue::Plain(self.object.clone())),
			_ => None,
		}
	}

	validation_slot!();
}

/// A plain coordinates value object, used as a nested model without
/// rules of its own.
#[derive(Debug, Default)]
pub struct Coordinates {
	pub latitude: String,
	pub longitude: String,
	validation: Option<ValidationResult>,
}

impl FormModel for Coordinates {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
			ModelSchema::new("Coordinates")
				.with_field(FieldDescriptor::new("latitude"))
				.with_field(FieldDescriptor::new("longitude"))
		});
		&SCHEMA
	}

	fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
		match name {
			"latitude" => Some(PropertyValue::Plain(json!(self.latitude))),
			"longitude" => Some(PropertyValue::Plain(json!(self.longitude))),
			_ => None,
		}
	}

	validation_slot!();
}

/// One property per resolver failure mode, plus a nested login form for
/// metadata walks.
#[derive(Debug, Default)]
pub struct FormWithNestedProperty {
	pub id: Value,
	pub key: String,
	pub meta: Value,
	pub coordinates: Coordinates,
	pub user: LoginForm,
	validation: Option<ValidationResult>,
}

impl FormWithNestedProperty {
	pub fn new() -> Self {
		Self {
			id: Value::Null,
			key: "key".to_string(),
			meta: json!({}),
			..Self::default()
		}
	}
}

impl FormModel for FormWithNestedProperty {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
			ModelSchema::new("FormWithNestedProperty")
				.with_field(FieldDescriptor::new("id"))
				.with_field(FieldDescriptor::new("key"))
				.with_field(FieldDescriptor::new("meta"))
				.with_field(FieldDescriptor::new("coordinates"))
				.with_field(FieldDescriptor::new("user"))
		});
		&SCHEMA
	}

	fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
		match name {
			"id" => Some(PropertyValue::Plain(self.id.clone())),
			"key" => Some(PropertyValue::Plain(json!(self.key))),
			"meta" => Some(PropertyValue::Plain(self.meta.clone())),
			"coordinates" => Some(PropertyValue::Model(&self.coordinates)),
			"user" => Some(PropertyValue::Model(&self.user)),
			_ => None,
		}
	}

	fn nested_mut(&mut self, name: &str) -> Option<&mut dyn FormModel> {
		match name {
			"coordinates" => Some(&mut self.coordinates),
			"user" => Some(&mut self.user),
			_ => None,
		}
	}

	fn provided_rules(&self) -> Option<RuleMap> {
		Some(RuleMap::from([("user".to_string(), vec![Rule::Nested(None)])]))
	}

	fn labels(&self) -> HashMap<String, String> {
		HashMap::from([(
			"user.password".to_string(),
			"Nested Password Override".to_string(),
		)])
	}

	validation_slot!();
}

/// A form with an array-typed property and a nested value object.
#[derive(Debug)]
pub struct FormWithNestedStructures {
	pub array: Value,
	pub coordinates: Option<Coordinates>,
	validation: Option<ValidationResult>,
}

impl Default for FormWithNestedStructures {
	fn default() -> Self {
		Self {
			array: json!([]),
			coordinates: None,
			validation: None,
		}
	}
}

impl FormWithNestedStructures {
	pub fn new() -> Self {
		Self::default()
	}
}

impl FormModel for FormWithNestedStructures {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
			ModelSchema::new("FormWithNestedStructures")
				.with_field(FieldDescriptor::new("array").with_rules(vec![Rule::Safe]))
				.with_field(FieldDescriptor::new("coordinates").with_rules(vec![Rule::Safe]))
		});
		&SCHEMA
	}

	fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
		match name {
			"array" => Some(PropertyValue::Plain(self.array.clone())),
			"coordinates" => Some(match &self.coordinates {
				Some(coordinates) => PropertyValue::Model(coordinates),
				None => PropertyValue::Plain(Value::Null),
			}),
			_ => None,
		}
	}

	fn set_value(&mut self, name: &str, value: &Value) -> bool {
		match name {
			"array" => {
				self.array = cast_array(value);
				true
			}
			"coordinates" => {
				let Value::Object(map) = value else {
					return false;
				};
				self.coordinates = Some(Coordinates {
					latitude: map.get("latitude").and_then(cast_string).unwrap_or_default(),
					longitude: map.get("longitude").and_then(cast_string).unwrap_or_default(),
					validation: None,
				});
				true
			}
			_ => false,
		}
	}

	validation_slot!();
}

/// A form whose nested rules address plain JSON values instead of nested
/// models.
#[derive(Debug, Default)]
pub struct NestedMixedForm {
	pub body: Value,
	validation: Option<ValidationResult>,
}

impl NestedMixedForm {
	pub fn new() -> Self {
		Self::default()
	}
}

impl FormModel for NestedMixedForm {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
			ModelSchema::new("NestedMixedForm").with_field(FieldDescriptor::new("body"))
		});
		&SCHEMA
	}

	fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
		match name {
			"body" => Some(PropertyValue::Plain(self.body.clone())),
			_ => None,
		}
	}

	fn set_value(&mut self, name: &str, value: &Value) -> bool {
		match name {
			"body" => {
				self.body = value.clone();
				true
			}
			_ => false,
		}
	}

	fn provided_rules(&self) -> Option<RuleMap> {
		Some(RuleMap::from([(
			"body".to_string(),
			vec![Rule::Nested(Some(RuleMap::from([(
				"shipping".to_string(),
				vec![
					Rule::Required,
					Rule::Nested(Some(RuleMap::from([(
						"phone".to_string(),
						vec![Rule::regex(r"^\+\d{11}$", "Invalid phone.")],
					)]))),
				],
			)])))],
		)]))
	}

	validation_slot!();
}

/// Three integer properties with caller-chosen rule keys, for the
/// strictness table.
#[derive(Debug, Default)]
pub struct MappingForm {
	pub a: Option<i64>,
	pub b: Option<i64>,
	pub c: Option<i64>,
	rules: RuleMap,
	validation: Option<ValidationResult>,
}

impl MappingForm {
	pub fn new(rule_properties: &[&str]) -> Self {
		Self {
			rules: rule_properties
				.iter()
				.map(|name| (name.to_string(), vec![Rule::Safe]))
				.collect(),
			..Self::default()
		}
	}
}

impl FormModel for MappingForm {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
			ModelSchema::new("MappingForm")
				.with_field(FieldDescriptor::new("a"))
				.with_field(FieldDescriptor::new("b"))
				.with_field(FieldDescriptor::new("c"))
		});
		&SCHEMA
	}

	fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
		match name {
			"a" => Some(PropertyValue::Plain(json!(self.a))),
			"b" => Some(PropertyValue::Plain(json!(self.b))),
			"c" => Some(PropertyValue::Plain(json!(self.c))),
			_ => None,
		}
	}

	fn set_value(&mut self, name: &str, value: &Value) -> bool {
		match name {
			"a" => set_opt_i64(&mut self.a, value),
			"b" => set_opt_i64(&mut self.b, value),
			"c" => set_opt_i64(&mut self.c, value),
			_ => false,
		}
	}

	fn provided_rules(&self) -> Option<RuleMap> {
		if self.rules.is_empty() {
			None
		} else {
			Some(self.rules.clone())
		}
	}

	validation_slot!();
}

/// A form overriding the derived form name.
#[derive(Debug, Default)]
pub struct CustomFormNameForm {
	pub name: String,
	validation: Option<ValidationResult>,
}

impl FormModel for CustomFormNameForm {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> =
			LazyLock::new(|| ModelSchema::new("CustomFormNameForm").with_field(FieldDescriptor::new("name")));
		&SCHEMA
	}

	fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
		match name {
			"name" => Some(PropertyValue::Plain(json!(self.name))),
			_ => None,
		}
	}

	fn form_name(&self) -> String {
		"my-best-form-name".to_string()
	}

	validation_slot!();
}

/// Typed properties filled from string-heavy submissions, for the
/// coercion pass.
#[derive(Debug)]
pub struct CastForm {
	pub int: i64,
	pub float: f64,
	pub flag: bool,
	pub string: String,
	validation: Option<ValidationResult>,
}

impl Default for CastForm {
	fn default() -> Self {
		Self {
			int: 1,
			float: 3.14,
			flag: true,
			string: "string".to_string(),
			validation: None,
		}
	}
}

impl CastForm {
	pub fn new() -> Self {
		Self::default()
	}
}

impl FormModel for CastForm {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
			ModelSchema::new("CastForm")
				.with_field(FieldDescriptor::new("int").with_rules(vec![Rule::Safe]))
				.with_field(FieldDescriptor::new("float").with_rules(vec![Rule::Safe]))
				.with_field(FieldDescriptor::new("flag").with_rules(vec![Rule::Safe]))
				.with_field(FieldDescriptor::new("string").with_rules(vec![Rule::Safe]))
		});
		&SCHEMA
	}

	fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
		match name {
			"int" => Some(PropertyValue::Plain(json!(self.int))),
			"float" => Some(PropertyValue::Plain(json!(self.float))),
			"flag" => Some(PropertyValue::Plain(json!(self.flag))),
			"string" => Some(PropertyValue::Plain(json!(self.string))),
			_ => None,
		}
	}

	fn set_value(&mut self, name: &str, value: &Value) -> bool {
		match name {
			"int" => set_i64(&mut self.int, value),
			"float" => match formbind::cast::cast_f64(value) {
				Some(number) => {
					self.float = number;
					true
				}
				None => false,
			},
			"flag" => set_bool(&mut self.flag, value),
			"string" => set_string(&mut self.string, value),
			_ => false,
		}
	}

	validation_slot!();
}

/// Rules split between the schema and the provider, plus one property
/// without any rules.
#[derive(Debug, Default)]
pub struct ProfileForm {
	pub name: String,
	pub age: Option<i64>,
	pub job: String,
	pub tip: String,
	validation: Option<ValidationResult>,
}

impl ProfileForm {
	pub fn new() -> Self {
		Self::default()
	}
}

impl FormModel for ProfileForm {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
			ModelSchema::new("ProfileForm")
				.with_field(
					FieldDescriptor::new("name")
						.with_label("Name Label")
						.with_rules(vec![Rule::length_min(3)]),
				)
				.with_field(FieldDescriptor::new("age"))
				.with_field(
					FieldDescriptor::new("job")
						.with_label("Job Label")
						.with_hint("What you do.")
						.with_placeholder("Developer")
						.with_rules(vec![Rule::Required]),
				)
				.with_field(FieldDescriptor::new("tip"))
		});
		&SCHEMA
	}

	fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
		match name {
			"name" => Some(PropertyValue::Plain(json!(self.name))),
			"age" => Some(PropertyValue::Plain(json!(self.age))),
			"job" => Some(PropertyValue::Plain(json!(self.job))),
			"tip" => Some(PropertyValue::Plain(json!(self.tip))),
			_ => None,
		}
	}

	fn set_value(&mut self, name: &str, value: &Value) -> bool {
		match name {
			"name" => set_string(&mut self.name, value),
			"age" => set_opt_i64(&mut self.age, value),
			"job" => set_string(&mut self.job, value),
			"tip" => set_string(&mut self.tip, value),
			_ => false,
		}
	}

	fn provided_rules(&self) -> Option<RuleMap> {
		Some(RuleMap::from([
			("age".to_string(), vec![Rule::integer_min(17)]),
			("job".to_string(), vec![Rule::length_min(2)]),
		]))
	}

	fn labels(&self) -> HashMap<String, String> {
		HashMap::from([("name".to_string(), "Instance Name".to_string())])
	}

	validation_slot!();
}

/// A single `age` property on a form without a name, for tabular input
/// names.
#[derive(Debug)]
pub struct UnnamedAgeForm {
	pub age: i64,
	validation: Option<ValidationResult>,
}

impl Default for UnnamedAgeForm {
	fn default() -> Self {
		Self {
			age: 21,
			validation: None,
		}
	}
}

impl UnnamedAgeForm {
	pub fn new() -> Self {
		Self::default()
	}
}

impl FormModel for UnnamedAgeForm {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> =
			LazyLock::new(|| ModelSchema::new("UnnamedAgeForm").with_field(FieldDescriptor::new("age")));
		&SCHEMA
	}

	fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
		match name {
			"age" => Some(PropertyValue::Plain(json!(self.age))),
			_ => None,
		}
	}

	fn form_name(&self) -> String {
		String::new()
	}

	validation_slot!();
}

/// Non-ASCII property names on a form without a name.
#[derive(Debug)]
pub struct UnicodeForm {
	pub age: i64,
	validation: Option<ValidationResult>,
}

impl Default for UnicodeForm {
	fn default() -> Self {
		Self {
			age: 21,
			validation: None,
		}
	}
}

impl UnicodeForm {
	pub fn new() -> Self {
		Self::default()
	}
}

impl FormModel for UnicodeForm {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
			ModelSchema::new("UnicodeForm")
				.with_field(FieldDescriptor::new("возраст"))
				.with_field(FieldDescriptor::new("ВОЗРАСТ"))
		});
		&SCHEMA
	}

	fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
		match name {
			"возраст" | "ВОЗРАСТ" => Some(PropertyValue::Plain(json!(self.age))),
			_ => None,
		}
	}

	fn form_name(&self) -> String {
		String::new()
	}

	validation_slot!();
}

/// The analog of an anonymous form: no declared properties and an empty
/// form name.
#[derive(Debug, Default)]
pub struct UnnamedForm {
	validation: Option<ValidationResult>,
}

impl UnnamedForm {
	pub fn new() -> Self {
		Self::default()
	}
}

impl FormModel for UnnamedForm {
	fn schema(&self) -> &'static ModelSchema {
		static SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| ModelSchema::new("UnnamedForm"));
		&SCHEMA
	}

	fn property(&self, _name: &str) -> Option<PropertyValue<'_>> {
		None
	}

	fn form_name(&self) -> String {
		String::new()
	}

	validation_slot!();
}
