//! # Reinhardt Admin Export
//!
//! Admin actions that export the records selected in a list view to a
//! downloadable file.
//!
//! ## Architecture
//!
//! - [`text`]: ASCII folding and slugs for filenames
//! - [`export`]: schema reflection, the [`Exporter`] contract and [`BaseExporter`]
//! - [`xlsx`]: the OpenXML spreadsheet exporter
//! - [`admin`]: admin sites, actions, exporter registry and settings
//!
//! ## Example
//!
//! ```rust
//! use reinhardt_admin_export::prelude::*;
//!
//! // Register every configured exporter on an explicitly built site
//! let site = AdminSite::new("admin");
//! let registry = ExporterRegistry::with_defaults();
//! let settings = ExportSettings::new().with_exporter("reinhardt_admin_export::XlsxExporter");
//! auto_register_exporters(&site, &registry, &settings).unwrap();
//!
//! // Describe the model and the selected rows
//! let meta = ModelMeta::new("OrderLine").with_field("id").with_field("sku");
//! let records = InMemoryRecordSet::new(
//!     meta,
//!     vec![DynamicRecord::new().with_value("id", 1).with_value("sku", "B-8")],
//! );
//!
//! let admin = ModelAdminConfig::new("OrderLine").with_export_columns(vec!["sku"]);
//! let (request, _) = http::Request::new(()).into_parts();
//! let response = site.execute_action("xlsxexporter", &admin, &request, &records).unwrap();
//!
//! assert!(response.filename().unwrap().starts_with("order-lines_"));
//! ```

pub mod admin;
pub mod export;
pub mod text;
pub mod xlsx;

pub use admin::{
	AdminAction, AdminError, AdminResult, AdminSite, ExportAction, ExportSettings, ExporterRef,
	ExporterRegistry, ModelAdmin, ModelAdminConfig, auto_register_exporters, register_exporter,
	register_exporters, to_action,
};
pub use export::{
	BaseExporter, Column, DynamicRecord, ExportError, ExportOptions, ExportResponse, ExportResult,
	Exporter, FieldMeta, InMemoryRecordSet, LazyText, ModelMeta, Record, RecordSet, Row, Value,
};
pub use text::{asciify, slugify};
pub use xlsx::XlsxExporter;

/// Everything needed to declare exporters and register them
pub mod prelude {
	pub use crate::{
		AdminAction, AdminSite, BaseExporter, Column, DynamicRecord, ExportOptions,
		ExportResponse, ExportResult, ExportSettings, Exporter, ExporterRef, ExporterRegistry,
		FieldMeta, InMemoryRecordSet, LazyText, ModelAdmin, ModelAdminConfig, ModelMeta, Record,
		RecordSet, Value, XlsxExporter, auto_register_exporters, register_exporter,
		register_exporters,
	};
}
