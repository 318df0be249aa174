//! Model reflection consumed by exporters
//!
//! Exporters never see concrete model types. They read the model's metadata
//! through [`ModelMeta`], walk the selected rows through a [`RecordSet`] and
//! fetch field values through the [`Record`] trait.

use crate::error::{ExportError, ExportResult};
use crate::value::{LazyText, Value};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Metadata for one declared model field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMeta {
	name: String,
	verbose_name: LazyText,
}

impl FieldMeta {
	/// Create a field whose human-readable name is derived from its name
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_export_core::FieldMeta;
	///
	/// let field = FieldMeta::new("created_at");
	/// assert_eq!(field.name(), "created_at");
	/// assert_eq!(field.verbose_name().to_string(), "created at");
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		let verbose_name = LazyText::new(name.replace('_', " "));
		Self { name, verbose_name }
	}

	/// Set the human-readable name
	pub fn with_verbose_name(mut self, verbose_name: impl Into<LazyText>) -> Self {
		self.verbose_name = verbose_name.into();
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn verbose_name(&self) -> &LazyText {
		&self.verbose_name
	}
}

/// Metadata for a model: its display names and declared fields in order
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_core::ModelMeta;
///
/// let meta = ModelMeta::new("OrderLine")
///     .with_field("id")
///     .with_field("quantity");
///
/// assert_eq!(meta.verbose_name().to_string(), "order line");
/// assert_eq!(meta.verbose_name_plural().to_string(), "order lines");
/// assert_eq!(meta.field_names(), vec!["id", "quantity"]);
/// ```
#[derive(Debug, Clone)]
pub struct ModelMeta {
	model_name: String,
	verbose_name: LazyText,
	verbose_name_plural: Option<LazyText>,
	fields: Vec<FieldMeta>,
}

impl ModelMeta {
	/// Create metadata for `model_name` with no fields
	pub fn new(model_name: impl Into<String>) -> Self {
		let model_name = model_name.into();
		let verbose_name = LazyText::new(camel_case_to_spaces(&model_name));
		Self {
			model_name,
			verbose_name,
			verbose_name_plural: None,
			fields: Vec::new(),
		}
	}

	/// Set the singular human-readable name
	pub fn with_verbose_name(mut self, verbose_name: impl Into<LazyText>) -> Self {
		self.verbose_name = verbose_name.into();
		self
	}

	/// Set the plural human-readable name
	pub fn with_verbose_name_plural(mut self, verbose_name_plural: impl Into<LazyText>) -> Self {
		self.verbose_name_plural = Some(verbose_name_plural.into());
		self
	}

	/// Declare a field with a derived human-readable name
	pub fn with_field(self, name: impl Into<String>) -> Self {
		self.field(FieldMeta::new(name))
	}

	/// Declare a field
	pub fn field(mut self, field: FieldMeta) -> Self {
		self.fields.push(field);
		self
	}

	pub fn model_name(&self) -> &str {
		&self.model_name
	}

	pub fn verbose_name(&self) -> &LazyText {
		&self.verbose_name
	}

	/// Plural display name; defaults to the singular name followed by `s`
	pub fn verbose_name_plural(&self) -> LazyText {
		match &self.verbose_name_plural {
			Some(plural) => plural.clone(),
			None => LazyText::new(format!("{}s", self.verbose_name)),
		}
	}

	/// Declared fields, in declaration order
	pub fn fields(&self) -> &[FieldMeta] {
		&self.fields
	}

	pub fn field_names(&self) -> Vec<&str> {
		self.fields.iter().map(FieldMeta::name).collect()
	}

	/// Look up a field by name
	pub fn get_field(&self, name: &str) -> ExportResult<&FieldMeta> {
		self.fields
			.iter()
			.find(|field| field.name == name)
			.ok_or_else(|| ExportError::UnknownField {
				model: self.model_name.clone(),
				field: name.to_string(),
			})
	}
}

/// Split a CamelCase model name into lowercase words
fn camel_case_to_spaces(name: &str) -> String {
	let chars: Vec<char> = name.chars().collect();
	let mut out = String::with_capacity(name.len() + 4);
	for (i, &ch) in chars.iter().enumerate() {
		if ch.is_uppercase() && i > 0 {
			let prev_lower = chars[i - 1].is_lowercase();
			let next_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
			if prev_lower || next_lower {
				out.push(' ');
			}
		}
		out.extend(ch.to_lowercase());
	}
	out.trim().to_string()
}

/// A single row of a model
pub trait Record {
	/// Raw value of `field`
	fn value(&self, field: &str) -> ExportResult<Value>;

	/// Human-readable rendering of `field`, if the field defines one
	///
	/// Choice fields return the label of the stored choice here. Fields
	/// without a rendering return `None` and the raw value is used instead.
	fn render(&self, field: &str) -> Option<String> {
		let _ = field;
		None
	}
}

impl<R: Record + ?Sized> Record for &R {
	fn value(&self, field: &str) -> ExportResult<Value> {
		(**self).value(field)
	}

	fn render(&self, field: &str) -> Option<String> {
		(**self).render(field)
	}
}

impl<R: Record + ?Sized> Record for Box<R> {
	fn value(&self, field: &str) -> ExportResult<Value> {
		(**self).value(field)
	}

	fn render(&self, field: &str) -> Option<String> {
		(**self).render(field)
	}
}

/// Lazily produced records of a record set
pub type RecordIter<'a> = Box<dyn Iterator<Item = ExportResult<Box<dyn Record + 'a>>> + 'a>;

/// An ordered selection of records sharing one model
///
/// Implementations backed by a database should stream from a cursor;
/// exporters walk [`RecordSet::iter`] exactly once per export.
pub trait RecordSet {
	fn meta(&self) -> &ModelMeta;

	fn iter(&self) -> RecordIter<'_>;
}

/// A record backed by an ordered map of values
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_core::{DynamicRecord, Record, Value};
///
/// let record = DynamicRecord::new()
///     .with_value("status", "a")
///     .with_display("status", "Active");
///
/// assert_eq!(record.value("status").unwrap(), Value::Text("a".to_string()));
/// assert_eq!(record.render("status").as_deref(), Some("Active"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicRecord {
	values: IndexMap<String, Value>,
	displays: HashMap<String, String>,
}

impl DynamicRecord {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a record from a JSON object, as produced by the admin list API
	pub fn from_json(object: serde_json::Map<String, serde_json::Value>) -> Self {
		Self {
			values: object.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
			displays: HashMap::new(),
		}
	}

	pub fn with_value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.values.insert(field.into(), value.into());
		self
	}

	/// Attach a display rendering for `field`
	pub fn with_display(mut self, field: impl Into<String>, display: impl Into<String>) -> Self {
		self.displays.insert(field.into(), display.into());
		self
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl Record for DynamicRecord {
	fn value(&self, field: &str) -> ExportResult<Value> {
		self.values
			.get(field)
			.cloned()
			.ok_or_else(|| ExportError::MissingValue(field.to_string()))
	}

	fn render(&self, field: &str) -> Option<String> {
		self.displays.get(field).cloned()
	}
}

/// A record set held in memory
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_core::{DynamicRecord, InMemoryRecordSet, ModelMeta, RecordSet};
///
/// let meta = ModelMeta::new("Widget").with_field("id");
/// let records = InMemoryRecordSet::new(meta, vec![DynamicRecord::new().with_value("id", 1)]);
///
/// assert_eq!(records.iter().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryRecordSet<R> {
	meta: ModelMeta,
	records: Vec<R>,
}

impl<R: Record> InMemoryRecordSet<R> {
	pub fn new(meta: ModelMeta, records: Vec<R>) -> Self {
		Self { meta, records }
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

impl<R: Record> RecordSet for InMemoryRecordSet<R> {
	fn meta(&self) -> &ModelMeta {
		&self.meta
	}

	fn iter(&self) -> RecordIter<'_> {
		Box::new(
			self.records
				.iter()
				.map(|record| Ok(Box::new(record) as Box<dyn Record + '_>)),
		)
	}
}
