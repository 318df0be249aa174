//! # reinhardt-admin-export-core
//!
//! Core of the admin export actions.
//!
//! ## Overview
//!
//! - [`schema`]: model metadata and record access used instead of reflection
//! - [`value`]: field values and lazily rendered text
//! - [`columns`]: resolution of the exported column set
//! - [`exporter`]: the [`Exporter`] contract and [`BaseExporter`]
//! - [`response`]: the download response
//!
//! Concrete formats live in their own crates (see `reinhardt-admin-export-xlsx`).
//!
//! ## Example
//!
//! ```
//! use reinhardt_admin_export_core::{
//!     BaseExporter, Column, DynamicRecord, ExportOptions, ExportResult, Exporter,
//!     InMemoryRecordSet, ModelMeta,
//! };
//! use std::io::Write;
//!
//! struct CountExporter;
//!
//! impl Exporter for CountExporter {
//!     fn fill_file(
//!         &self,
//!         export: &BaseExporter<'_>,
//!         dest: &mut dyn Write,
//!         columns: &[Column],
//!     ) -> ExportResult<()> {
//!         let count = export.rows(columns).count();
//!         write!(dest, "{}", count)?;
//!         Ok(())
//!     }
//! }
//!
//! let meta = ModelMeta::new("Widget").with_field("id");
//! let records = InMemoryRecordSet::new(meta, vec![DynamicRecord::new().with_value("id", 1)]);
//!
//! let response = BaseExporter::new(&CountExporter, &records, ExportOptions::new())
//!     .export_to_response()
//!     .unwrap();
//! assert_eq!(response.body(), b"1");
//! ```

pub mod columns;
pub mod error;
pub mod exporter;
pub mod options;
pub mod response;
pub mod schema;
pub mod value;

pub use columns::{Column, Row, resolve_columns};
pub use error::{ExportError, ExportResult};
pub use exporter::{BaseExporter, DEFAULT_CONTENT_TYPE, DEFAULT_EXTENSION, Exporter};
pub use options::ExportOptions;
pub use response::ExportResponse;
pub use schema::{
	DynamicRecord, FieldMeta, InMemoryRecordSet, ModelMeta, Record, RecordIter, RecordSet,
};
pub use value::{LazyText, Value};
