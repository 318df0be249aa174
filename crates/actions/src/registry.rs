//! Exporter lookup by symbolic name

use crate::error::{AdminError, AdminResult};
use indexmap::IndexMap;
use reinhardt_admin_export_core::Exporter;
use reinhardt_admin_export_xlsx::XlsxExporter;
use std::fmt;
use std::sync::Arc;

/// Fully-qualified name of the spreadsheet exporter
pub const XLSX_EXPORTER_PATH: &str = "reinhardt_admin_export::XlsxExporter";

/// An exporter given either directly or by a name to look up
#[derive(Clone)]
pub enum ExporterRef {
	Direct(Arc<dyn Exporter>),
	Named(String),
}

impl ExporterRef {
	pub fn direct(exporter: impl Exporter + 'static) -> Self {
		Self::Direct(Arc::new(exporter))
	}

	pub fn named(name: impl Into<String>) -> Self {
		Self::Named(name.into())
	}
}

impl fmt::Debug for ExporterRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Direct(exporter) => f.debug_tuple("Direct").field(&exporter.name()).finish(),
			Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
		}
	}
}

impl From<Arc<dyn Exporter>> for ExporterRef {
	fn from(exporter: Arc<dyn Exporter>) -> Self {
		Self::Direct(exporter)
	}
}

impl From<&str> for ExporterRef {
	fn from(name: &str) -> Self {
		Self::Named(name.to_string())
	}
}

impl From<String> for ExporterRef {
	fn from(name: String) -> Self {
		Self::Named(name)
	}
}

impl From<XlsxExporter> for ExporterRef {
	fn from(exporter: XlsxExporter) -> Self {
		Self::direct(exporter)
	}
}

/// Exporters known by name, filled once at startup
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_actions::{ExporterRef, ExporterRegistry};
///
/// let registry = ExporterRegistry::with_defaults();
/// let exporter = registry.resolve(&ExporterRef::named("xlsx")).unwrap();
///
/// assert_eq!(exporter.extension(), "xlsx");
/// assert!(registry.resolve(&ExporterRef::named("csv")).is_err());
/// ```
#[derive(Clone, Default)]
pub struct ExporterRegistry {
	exporters: IndexMap<String, Arc<dyn Exporter>>,
}

impl ExporterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry holding the bundled exporters
	pub fn with_defaults() -> Self {
		let xlsx: Arc<dyn Exporter> = Arc::new(XlsxExporter);
		let mut registry = Self::new();
		registry.register("xlsx", Arc::clone(&xlsx));
		registry.register(XLSX_EXPORTER_PATH, xlsx);
		registry
	}

	/// Make `exporter` resolvable as `name`
	pub fn register(&mut self, name: impl Into<String>, exporter: Arc<dyn Exporter>) -> &mut Self {
		let name = name.into();
		if self.exporters.insert(name.clone(), exporter).is_some() {
			tracing::warn!(exporter = %name, "replaced registered exporter");
		}
		self
	}

	pub fn get(&self, name: &str) -> Option<Arc<dyn Exporter>> {
		self.exporters.get(name).cloned()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.exporters.contains_key(name)
	}

	/// Registered names, in registration order
	pub fn names(&self) -> Vec<&str> {
		self.exporters.keys().map(String::as_str).collect()
	}

	pub fn len(&self) -> usize {
		self.exporters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.exporters.is_empty()
	}

	/// Turn a reference into a concrete exporter
	pub fn resolve(&self, exporter: &ExporterRef) -> AdminResult<Arc<dyn Exporter>> {
		match exporter {
			ExporterRef::Direct(exporter) => Ok(Arc::clone(exporter)),
			ExporterRef::Named(name) => self
				.get(name.trim())
				.ok_or_else(|| AdminError::UnknownExporter(name.clone())),
		}
	}
}

impl fmt::Debug for ExporterRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ExporterRegistry")
			.field("exporters", &self.names())
			.finish()
	}
}
