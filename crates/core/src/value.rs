//! Field values handed from records to exporters

use chrono::{NaiveDate, NaiveDateTime};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Text that may be computed on demand
///
/// Model and field labels are often translated strings whose final form is
/// only known when they are rendered. `LazyText` holds either the text itself
/// or a closure producing it.
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_core::LazyText;
///
/// let eager = LazyText::new("widget");
/// assert!(!eager.is_deferred());
///
/// let lazy = LazyText::deferred(|| "gadget".to_string());
/// assert!(lazy.is_deferred());
/// assert_eq!(lazy.to_string(), "gadget");
/// ```
#[derive(Clone)]
pub struct LazyText(LazyInner);

#[derive(Clone)]
enum LazyInner {
	Ready(Cow<'static, str>),
	Deferred(Arc<dyn Fn() -> String + Send + Sync>),
}

impl LazyText {
	/// Create text that is already resolved
	pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
		Self(LazyInner::Ready(text.into()))
	}

	/// Create text resolved by calling `f` each time it is rendered
	pub fn deferred<F>(f: F) -> Self
	where
		F: Fn() -> String + Send + Sync + 'static,
	{
		Self(LazyInner::Deferred(Arc::new(f)))
	}

	/// Whether the text is computed on demand
	pub fn is_deferred(&self) -> bool {
		matches!(self.0, LazyInner::Deferred(_))
	}

	/// Resolve the text
	pub fn resolve(&self) -> Cow<'_, str> {
		match &self.0 {
			LazyInner::Ready(text) => Cow::Borrowed(text.as_ref()),
			LazyInner::Deferred(f) => Cow::Owned(f()),
		}
	}
}

impl fmt::Display for LazyText {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.resolve())
	}
}

impl fmt::Debug for LazyText {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.0 {
			LazyInner::Ready(text) => f.debug_tuple("LazyText").field(text).finish(),
			LazyInner::Deferred(_) => f.write_str("LazyText(<deferred>)"),
		}
	}
}

impl PartialEq for LazyText {
	fn eq(&self, other: &Self) -> bool {
		self.resolve() == other.resolve()
	}
}

impl From<&'static str> for LazyText {
	fn from(text: &'static str) -> Self {
		Self::new(text)
	}
}

impl From<String> for LazyText {
	fn from(text: String) -> Self {
		Self::new(text)
	}
}

/// A single field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Text(String),
	Date(NaiveDate),
	DateTime(NaiveDateTime),
	/// Text that has not been rendered yet
	Lazy(LazyText),
}

impl Value {
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn is_lazy(&self) -> bool {
		matches!(self, Value::Lazy(_))
	}

	/// Render lazy text into a plain [`Value::Text`]; other values pass through
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_export_core::{LazyText, Value};
	///
	/// let value = Value::Lazy(LazyText::deferred(|| "Active".to_string()));
	/// assert_eq!(value.force(), Value::Text("Active".to_string()));
	/// assert_eq!(Value::Int(3).force(), Value::Int(3));
	/// ```
	pub fn force(self) -> Value {
		match self {
			Value::Lazy(text) => Value::Text(text.resolve().into_owned()),
			other => other,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => Ok(()),
			Value::Bool(b) => write!(f, "{}", b),
			Value::Int(i) => write!(f, "{}", i),
			Value::Float(x) => write!(f, "{}", x),
			Value::Text(s) => f.write_str(s),
			Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
			Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
			Value::Lazy(text) => write!(f, "{}", text),
		}
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

impl From<i32> for Value {
	fn from(i: i32) -> Self {
		Value::Int(i64::from(i))
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Self {
		Value::Int(i)
	}
}

impl From<u32> for Value {
	fn from(i: u32) -> Self {
		Value::Int(i64::from(i))
	}
}

impl From<f64> for Value {
	fn from(x: f64) -> Self {
		Value::Float(x)
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::Text(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::Text(s)
	}
}

impl From<NaiveDate> for Value {
	fn from(d: NaiveDate) -> Self {
		Value::Date(d)
	}
}

impl From<NaiveDateTime> for Value {
	fn from(dt: NaiveDateTime) -> Self {
		Value::DateTime(dt)
	}
}

impl From<LazyText> for Value {
	fn from(text: LazyText) -> Self {
		Value::Lazy(text)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Value::Null)
	}
}

/// Admin rows arrive as JSON objects; nested structures are kept as JSON text.
impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(b) => Value::Bool(b),
			serde_json::Value::Number(n) => match n.as_i64() {
				Some(i) => Value::Int(i),
				None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
			},
			serde_json::Value::String(s) => Value::Text(s),
			other => Value::Text(other.to_string()),
		}
	}
}
