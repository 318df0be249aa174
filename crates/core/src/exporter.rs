//! Exporter contract and format-independent export logic
//!
//! An [`Exporter`] describes one output format: its MIME type, its file
//! extension and how to write columns and rows into an open stream.
//! [`BaseExporter`] binds an exporter to the records selected in the admin
//! and provides everything that does not depend on the format: column
//! resolution, value extraction, naming and the download response.

use crate::columns::{Column, Row, resolve_columns};
use crate::error::ExportResult;
use crate::options::ExportOptions;
use crate::response::ExportResponse;
use crate::schema::{ModelMeta, Record, RecordSet};
use crate::value::{LazyText, Value};
use chrono::NaiveDate;
use reinhardt_admin_export_utils::slugify;
use std::io::Write;

/// MIME type used when an exporter does not declare one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Extension used when an exporter does not declare one
pub const DEFAULT_EXTENSION: &str = "dat";

/// A file format that selected admin records can be exported to
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_core::{BaseExporter, Column, ExportResult, Exporter};
/// use std::io::Write;
///
/// struct LinesExporter;
///
/// impl Exporter for LinesExporter {
///     fn content_type(&self) -> &str {
///         "text/plain"
///     }
///
///     fn extension(&self) -> &str {
///         "txt"
///     }
///
///     fn fill_file(
///         &self,
///         export: &BaseExporter<'_>,
///         dest: &mut dyn Write,
///         columns: &[Column],
///     ) -> ExportResult<()> {
///         for row in export.rows(columns) {
///             let row = row?;
///             let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
///             writeln!(dest, "{}", cells.join("|"))?;
///         }
///         Ok(())
///     }
/// }
///
/// assert_eq!(LinesExporter.name(), "linesexporter");
/// assert_eq!(LinesExporter.description(), "Export selected objects as a txt file");
/// ```
pub trait Exporter: Send + Sync {
	/// Action name, derived from the type name in lowercase
	fn name(&self) -> String {
		short_type_name(std::any::type_name::<Self>()).to_lowercase()
	}

	/// MIME type of the produced file
	fn content_type(&self) -> &str {
		DEFAULT_CONTENT_TYPE
	}

	/// Extension of the produced file, without the dot
	fn extension(&self) -> &str {
		DEFAULT_EXTENSION
	}

	/// Human-readable kind of file, shown in the action description
	fn readable_file_kind(&self) -> &str {
		self.extension()
	}

	/// Description of the admin action
	fn description(&self) -> String {
		format!(
			"Export selected objects as a {} file",
			self.readable_file_kind()
		)
	}

	/// Coerce a value before it reaches the writer
	fn normalize_value(&self, value: Value) -> Value {
		value
	}

	/// Write the header and every row into `dest`
	fn fill_file(
		&self,
		export: &BaseExporter<'_>,
		dest: &mut dyn Write,
		columns: &[Column],
	) -> ExportResult<()>;
}

/// Strip the module path and generic arguments from a type name
fn short_type_name(full: &str) -> &str {
	let without_generics = full.split('<').next().unwrap_or(full);
	without_generics
		.rsplit("::")
		.next()
		.unwrap_or(without_generics)
}

/// One export of a record set through an [`Exporter`]
pub struct BaseExporter<'a> {
	exporter: &'a dyn Exporter,
	records: &'a dyn RecordSet,
	options: ExportOptions,
}

impl<'a> BaseExporter<'a> {
	pub fn new(
		exporter: &'a dyn Exporter,
		records: &'a dyn RecordSet,
		options: ExportOptions,
	) -> Self {
		Self {
			exporter,
			records,
			options,
		}
	}

	pub fn exporter(&self) -> &'a dyn Exporter {
		self.exporter
	}

	pub fn records(&self) -> &'a dyn RecordSet {
		self.records
	}

	pub fn meta(&self) -> &'a ModelMeta {
		self.records.meta()
	}

	pub fn options(&self) -> &ExportOptions {
		&self.options
	}

	/// Filename for an export made today, e.g. `widgets_2024-01-01.xlsx`
	pub fn make_filename(&self) -> String {
		self.make_filename_on(chrono::Local::now().date_naive())
	}

	/// Filename for an export made on `date`
	pub fn make_filename_on(&self, date: NaiveDate) -> String {
		let base = slugify(&self.meta().verbose_name_plural().resolve());
		format!(
			"{}_{}.{}",
			base,
			date.format("%Y-%m-%d"),
			self.exporter.extension()
		)
	}

	/// Document title: the singular display name of the model
	///
	/// Formats with a title length limit truncate this themselves.
	pub fn make_title(&self) -> String {
		self.meta().verbose_name().to_string()
	}

	/// Title of the column showing `name`
	pub fn get_column_title(&self, name: &str) -> ExportResult<LazyText> {
		Ok(self.meta().get_field(name)?.verbose_name().clone())
	}

	/// Columns selected by the export options
	pub fn get_columns(&self) -> ExportResult<Vec<Column>> {
		let columns = resolve_columns(self.meta(), &self.options)?;
		tracing::debug!(
			model = self.meta().model_name(),
			columns = ?columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
			"resolved export columns"
		);
		Ok(columns)
	}

	/// Value of `column` on `entry`, preferring its display rendering
	pub fn get_value(&self, entry: &dyn Record, column: &str) -> ExportResult<Value> {
		let value = match entry.render(column) {
			Some(display) => Value::Text(display),
			None => entry.value(column)?,
		};
		Ok(self.exporter.normalize_value(value))
	}

	/// Convert one record to a row
	pub fn entry_to_row(&self, entry: &dyn Record, columns: &[Column]) -> ExportResult<Row> {
		columns
			.iter()
			.map(|column| self.get_value(entry, &column.name))
			.collect()
	}

	/// Rows of the record set, produced one record at a time
	pub fn rows<'s>(
		&'s self,
		columns: &'s [Column],
	) -> impl Iterator<Item = ExportResult<Row>> + 's {
		self.records.iter().map(move |entry| {
			let entry = entry?;
			self.entry_to_row(&*entry, columns)
		})
	}

	/// Empty download response with the exporter's content type and filename
	pub fn prepare_response(&self) -> ExportResult<ExportResponse> {
		ExportResponse::ok()
			.with_content_type(self.exporter.content_type())?
			.with_attachment(&self.make_filename())
	}

	/// Export the records into an open stream
	pub fn export_to_file(&self, dest: &mut dyn Write) -> ExportResult<()> {
		let columns = self.get_columns()?;
		self.exporter.fill_file(self, dest, &columns)
	}

	/// Export the records into a download response
	pub fn export_to_response(&self) -> ExportResult<ExportResponse> {
		let mut response = self.prepare_response()?;
		self.export_to_file(&mut response)?;
		tracing::info!(
			model = self.meta().model_name(),
			exporter = %self.exporter.name(),
			bytes = response.body().len(),
			"exported selected records"
		);
		Ok(response)
	}
}
