//! Spreadsheet exporter

use crate::workbook::{MAX_TITLE_LENGTH, Workbook};
use reinhardt_admin_export_core::{BaseExporter, Column, ExportResult, Exporter, Value};
use reinhardt_admin_export_utils::truncate_chars;
use std::io::Write;

/// MIME type of OpenXML spreadsheets
pub const XLSX_CONTENT_TYPE: &str =
	"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Exports records into a single-sheet `.xlsx` workbook
///
/// The sheet is titled after the model, the first row holds the column
/// titles and an auto-filter spans the populated range.
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_core::{
///     BaseExporter, DynamicRecord, ExportOptions, InMemoryRecordSet, ModelMeta,
/// };
/// use reinhardt_admin_export_xlsx::XlsxExporter;
///
/// let meta = ModelMeta::new("Widget").with_field("id").with_field("name");
/// let records = InMemoryRecordSet::new(
///     meta,
///     vec![DynamicRecord::new().with_value("id", 1).with_value("name", "Bolt")],
/// );
///
/// let response = BaseExporter::new(&XlsxExporter, &records, ExportOptions::new())
///     .export_to_response()
///     .unwrap();
///
/// assert!(response.filename().unwrap().starts_with("widgets_"));
/// assert!(response.filename().unwrap().ends_with(".xlsx"));
/// assert!(response.body().starts_with(b"PK"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExporter;

impl XlsxExporter {
	pub fn new() -> Self {
		Self
	}
}

impl Exporter for XlsxExporter {
	fn content_type(&self) -> &str {
		XLSX_CONTENT_TYPE
	}

	fn extension(&self) -> &str {
		"xlsx"
	}

	fn normalize_value(&self, value: Value) -> Value {
		value.force()
	}

	fn fill_file(
		&self,
		export: &BaseExporter<'_>,
		dest: &mut dyn Write,
		columns: &[Column],
	) -> ExportResult<()> {
		let title = export.make_title();
		let title = truncate_chars(&title, MAX_TITLE_LENGTH);
		let headers: Vec<String> = columns.iter().map(|c| c.title.to_string()).collect();

		let mut book = Workbook::new();
		book.set_title(title)?;
		book.fill(export.rows(columns), &headers)?;
		book.write_to(dest)?;
		Ok(())
	}
}
