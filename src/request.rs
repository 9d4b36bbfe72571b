//! A minimal request carrier for form population.
//!
//! The hydrator only needs a method and a parsed body; anything that can
//! produce those two can feed
//! [`FormHydrator::populate_from_post`](crate::FormHydrator::populate_from_post).

use http::Method;
use serde_json::Value;

/// An HTTP request reduced to the parts form binding consumes.
///
/// # Examples
///
/// ```
/// use formbind::FormRequest;
/// use http::Method;
/// use serde_json::json;
///
/// let request = FormRequest::post(json!({"CarForm": {"name": "Test"}}));
/// assert_eq!(*request.method(), Method::POST);
///
/// let request = FormRequest::new(Method::GET);
/// assert!(request.parsed_body().is_null());
/// ```
#[derive(Debug, Clone)]
pub struct FormRequest {
	method: Method,
	parsed_body: Value,
}

impl FormRequest {
	/// A request with the given method and no body.
	pub fn new(method: Method) -> Self {
		Self {
			method,
			parsed_body: Value::Null,
		}
	}

	pub fn with_parsed_body(mut self, parsed_body: Value) -> Self {
		self.parsed_body = parsed_body;
		self
	}

	/// A POST request carrying the given parsed body.
	pub fn post(parsed_body: Value) -> Self {
		Self::new(Method::POST).with_parsed_body(parsed_body)
	}

	/// A bodyless GET request.
	pub fn get() -> Self {
		Self::new(Method::GET)
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	pub fn parsed_body(&self) -> &Value {
		&self.parsed_body
	}
}
