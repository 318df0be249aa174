//! OpenXML package serialization
//!
//! A workbook is written as a zip archive of XML parts. Every part is built
//! with a `quick_xml::Writer` so text and attribute values are escaped.

use crate::workbook::{Cell, Workbook, Worksheet, cell_reference};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use reinhardt_admin_export_core::{ExportError, ExportResult};
use std::io::{Seek, Write};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PACKAGE_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const REL_OFFICE_DOCUMENT: &str =
	"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
	"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPERTIES: &str =
	"http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_WORKSHEET: &str =
	"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const REL_STYLES: &str =
	"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub const ROOT_RELS_PART: &str = "_rels/.rels";
pub const APP_PART: &str = "docProps/app.xml";
pub const CORE_PART: &str = "docProps/core.xml";
pub const WORKBOOK_PART: &str = "xl/workbook.xml";
pub const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
pub const STYLES_PART: &str = "xl/styles.xml";
pub const SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// Style indices declared in `styles.xml`
const STYLE_DATE: &str = "1";
const STYLE_DATETIME: &str = "2";

/// Day zero of the 1900 date system
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Serial number of 1900-03-01; earlier serials account for the phantom
/// 1900-02-29 of the 1900 date system
const FIRST_CORRECT_SERIAL: i64 = 61;

/// Write the full package of `book` into `writer`
pub(crate) fn write_package<W: Write + Seek>(book: &Workbook, writer: W) -> ExportResult<W> {
	let mut zip = ZipWriter::new(writer);
	let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

	let parts: [(&str, Vec<u8>); 8] = [
		(CONTENT_TYPES_PART, content_types()?),
		(ROOT_RELS_PART, root_rels()?),
		(APP_PART, app_properties()?),
		(CORE_PART, core_properties(book)?),
		(WORKBOOK_PART, workbook(book.sheet())?),
		(WORKBOOK_RELS_PART, workbook_rels()?),
		(STYLES_PART, styles()?),
		(SHEET_PART, worksheet(book.sheet())?),
	];

	for (name, bytes) in parts {
		zip.start_file(name, options).map_err(zip_error)?;
		zip.write_all(&bytes)?;
	}

	let writer = zip.finish().map_err(zip_error)?;
	tracing::debug!(
		rows = book.sheet().max_row(),
		columns = book.sheet().max_column(),
		"wrote workbook package"
	);
	Ok(writer)
}

fn zip_error(err: zip::result::ZipError) -> ExportError {
	ExportError::Serialization(format!("zip: {}", err))
}

fn xml_error(err: impl std::fmt::Display) -> ExportError {
	ExportError::Serialization(format!("xml: {}", err))
}

/// Builder for one XML part
struct XmlPart {
	writer: Writer<Vec<u8>>,
}

impl XmlPart {
	fn new() -> ExportResult<Self> {
		let mut part = Self {
			writer: Writer::new(Vec::new()),
		};
		part.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
		Ok(part)
	}

	fn emit(&mut self, event: Event<'_>) -> ExportResult<()> {
		self.writer.write_event(event).map_err(xml_error)
	}

	fn open(name: &str, attrs: &[(&str, &str)]) -> BytesStart<'static> {
		let mut start = BytesStart::new(name.to_string());
		for attr in attrs {
			start.push_attribute(*attr);
		}
		start
	}

	fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> ExportResult<()> {
		self.emit(Event::Start(Self::open(name, attrs)))
	}

	fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> ExportResult<()> {
		self.emit(Event::Empty(Self::open(name, attrs)))
	}

	fn text(&mut self, text: &str) -> ExportResult<()> {
		self.emit(Event::Text(BytesText::new(text)))
	}

	fn end(&mut self, name: &str) -> ExportResult<()> {
		self.emit(Event::End(BytesEnd::new(name.to_string())))
	}

	/// `<name attrs>text</name>`
	fn element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> ExportResult<()> {
		self.start(name, attrs)?;
		self.text(text)?;
		self.end(name)
	}

	fn finish(self) -> Vec<u8> {
		self.writer.into_inner()
	}
}

fn content_types() -> ExportResult<Vec<u8>> {
	let mut xml = XmlPart::new()?;
	xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
	xml.empty(
		"Default",
		&[
			("Extension", "rels"),
			(
				"ContentType",
				"application/vnd.openxmlformats-package.relationships+xml",
			),
		],
	)?;
	xml.empty(
		"Default",
		&[("Extension", "xml"), ("ContentType", "application/xml")],
	)?;
	let overrides = [
		(
			WORKBOOK_PART,
			"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
		),
		(
			SHEET_PART,
			"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml",
		),
		(
			STYLES_PART,
			"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml",
		),
		(
			CORE_PART,
			"application/vnd.openxmlformats-package.core-properties+xml",
		),
		(
			APP_PART,
			"application/vnd.openxmlformats-officedocument.extended-properties+xml",
		),
	];
	for (part, content_type) in overrides {
		let part_name = format!("/{}", part);
		xml.empty(
			"Override",
			&[("PartName", part_name.as_str()), ("ContentType", content_type)],
		)?;
	}
	xml.end("Types")?;
	Ok(xml.finish())
}

fn relationships(entries: &[(&str, &str, &str)]) -> ExportResult<Vec<u8>> {
	let mut xml = XmlPart::new()?;
	xml.start("Relationships", &[("xmlns", NS_PACKAGE_REL)])?;
	for (id, kind, target) in entries {
		xml.empty(
			"Relationship",
			&[("Id", id), ("Type", kind), ("Target", target)],
		)?;
	}
	xml.end("Relationships")?;
	Ok(xml.finish())
}

fn root_rels() -> ExportResult<Vec<u8>> {
	relationships(&[
		("rId1", REL_OFFICE_DOCUMENT, WORKBOOK_PART),
		("rId2", REL_CORE_PROPERTIES, CORE_PART),
		("rId3", REL_EXTENDED_PROPERTIES, APP_PART),
	])
}

fn workbook_rels() -> ExportResult<Vec<u8>> {
	relationships(&[
		("rId1", REL_WORKSHEET, "worksheets/sheet1.xml"),
		("rId2", REL_STYLES, "styles.xml"),
	])
}

fn app_properties() -> ExportResult<Vec<u8>> {
	let mut xml = XmlPart::new()?;
	xml.start(
		"Properties",
		&[(
			"xmlns",
			"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
		)],
	)?;
	xml.element("Application", &[], env!("CARGO_PKG_NAME"))?;
	xml.end("Properties")?;
	Ok(xml.finish())
}

fn core_properties(book: &Workbook) -> ExportResult<Vec<u8>> {
	let created = book.created().format("%Y-%m-%dT%H:%M:%SZ").to_string();
	let mut xml = XmlPart::new()?;
	xml.start(
		"cp:coreProperties",
		&[
			(
				"xmlns:cp",
				"http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
			),
			("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
			("xmlns:dcterms", "http://purl.org/dc/terms/"),
			("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
		],
	)?;
	xml.element("dc:title", &[], &sanitize_text(book.sheet().title()))?;
	xml.element(
		"dcterms:created",
		&[("xsi:type", "dcterms:W3CDTF")],
		&created,
	)?;
	xml.element(
		"dcterms:modified",
		&[("xsi:type", "dcterms:W3CDTF")],
		&created,
	)?;
	xml.end("cp:coreProperties")?;
	Ok(xml.finish())
}

/// Absolute form of a range (`A1:C3` → `$A$1:$C$3`)
fn absolute_range(range: &str) -> String {
	range
		.split(':')
		.map(|cell| {
			let split = cell
				.find(|c: char| c.is_ascii_digit())
				.unwrap_or(cell.len());
			format!("${}${}", &cell[..split], &cell[split..])
		})
		.collect::<Vec<_>>()
		.join(":")
}

/// Quote a sheet title for use in a formula reference
fn quote_sheet_title(title: &str) -> String {
	format!("'{}'", title.replace('\'', "''"))
}

fn workbook(sheet: &Worksheet) -> ExportResult<Vec<u8>> {
	let title = sanitize_text(sheet.title());
	let mut xml = XmlPart::new()?;
	xml.start("workbook", &[("xmlns", NS_MAIN), ("xmlns:r", NS_REL)])?;
	xml.start("sheets", &[])?;
	xml.empty(
		"sheet",
		&[("name", title.as_str()), ("sheetId", "1"), ("r:id", "rId1")],
	)?;
	xml.end("sheets")?;
	if let Some(range) = sheet.auto_filter() {
		let reference = format!("{}!{}", quote_sheet_title(&title), absolute_range(range));
		xml.start("definedNames", &[])?;
		xml.element(
			"definedName",
			&[
				("name", "_xlnm._FilterDatabase"),
				("localSheetId", "0"),
				("hidden", "1"),
			],
			&reference,
		)?;
		xml.end("definedNames")?;
	}
	xml.end("workbook")?;
	Ok(xml.finish())
}

fn styles() -> ExportResult<Vec<u8>> {
	let mut xml = XmlPart::new()?;
	xml.start("styleSheet", &[("xmlns", NS_MAIN)])?;

	xml.start("fonts", &[("count", "1")])?;
	xml.start("font", &[])?;
	xml.empty("sz", &[("val", "11")])?;
	xml.empty("name", &[("val", "Calibri")])?;
	xml.end("font")?;
	xml.end("fonts")?;

	xml.start("fills", &[("count", "2")])?;
	for pattern in ["none", "gray125"] {
		xml.start("fill", &[])?;
		xml.empty("patternFill", &[("patternType", pattern)])?;
		xml.end("fill")?;
	}
	xml.end("fills")?;

	xml.start("borders", &[("count", "1")])?;
	xml.start("border", &[])?;
	for side in ["left", "right", "top", "bottom", "diagonal"] {
		xml.empty(side, &[])?;
	}
	xml.end("border")?;
	xml.end("borders")?;

	let base = [("fontId", "0"), ("fillId", "0"), ("borderId", "0")];
	xml.start("cellStyleXfs", &[("count", "1")])?;
	let mut attrs = vec![("numFmtId", "0")];
	attrs.extend_from_slice(&base);
	xml.empty("xf", &attrs)?;
	xml.end("cellStyleXfs")?;

	// 0: general, 1: date (built-in 14), 2: date and time (built-in 22)
	xml.start("cellXfs", &[("count", "3")])?;
	for (num_fmt, apply) in [("0", None), ("14", Some("1")), ("22", Some("1"))] {
		let mut attrs = vec![("numFmtId", num_fmt)];
		attrs.extend_from_slice(&base);
		attrs.push(("xfId", "0"));
		if let Some(apply) = apply {
			attrs.push(("applyNumberFormat", apply));
		}
		xml.empty("xf", &attrs)?;
	}
	xml.end("cellXfs")?;

	xml.start("cellStyles", &[("count", "1")])?;
	xml.empty(
		"cellStyle",
		&[("name", "Normal"), ("xfId", "0"), ("builtinId", "0")],
	)?;
	xml.end("cellStyles")?;

	xml.end("styleSheet")?;
	Ok(xml.finish())
}

fn worksheet(sheet: &Worksheet) -> ExportResult<Vec<u8>> {
	let dimension = sheet.calculate_dimension();
	let mut xml = XmlPart::new()?;
	xml.start("worksheet", &[("xmlns", NS_MAIN), ("xmlns:r", NS_REL)])?;
	xml.empty("dimension", &[("ref", dimension.as_str())])?;
	xml.start("sheetData", &[])?;
	for (row_index, row) in sheet.rows().iter().enumerate() {
		let row_number = (row_index + 1).to_string();
		xml.start("row", &[("r", row_number.as_str())])?;
		for (column_index, cell) in row.iter().enumerate() {
			let reference = cell_reference(row_index + 1, column_index + 1);
			write_cell(&mut xml, &reference, cell)?;
		}
		xml.end("row")?;
	}
	xml.end("sheetData")?;
	if let Some(range) = sheet.auto_filter() {
		xml.empty("autoFilter", &[("ref", range)])?;
	}
	xml.end("worksheet")?;
	Ok(xml.finish())
}

fn write_cell(xml: &mut XmlPart, reference: &str, cell: &Cell) -> ExportResult<()> {
	let r = ("r", reference);
	match cell {
		Cell::Empty => Ok(()),
		Cell::Bool(b) => {
			xml.start("c", &[r, ("t", "b")])?;
			xml.element("v", &[], if *b { "1" } else { "0" })?;
			xml.end("c")
		}
		Cell::Int(i) => number_cell(xml, &[r], &i.to_string()),
		Cell::Float(x) => number_cell(xml, &[r], &x.to_string()),
		Cell::Text(s) => inline_string_cell(xml, reference, s),
		Cell::Date(d) => match date_serial(*d) {
			Some(serial) => number_cell(xml, &[r, ("s", STYLE_DATE)], &serial.to_string()),
			None => inline_string_cell(xml, reference, &d.format("%Y-%m-%d").to_string()),
		},
		Cell::DateTime(dt) => match datetime_serial(*dt) {
			Some(serial) => {
				number_cell(xml, &[r, ("s", STYLE_DATETIME)], &serial.to_string())
			}
			None => inline_string_cell(
				xml,
				reference,
				&dt.format("%Y-%m-%d %H:%M:%S").to_string(),
			),
		},
	}
}

fn number_cell(xml: &mut XmlPart, attrs: &[(&str, &str)], value: &str) -> ExportResult<()> {
	xml.start("c", attrs)?;
	xml.element("v", &[], value)?;
	xml.end("c")
}

fn inline_string_cell(xml: &mut XmlPart, reference: &str, text: &str) -> ExportResult<()> {
	let text = sanitize_text(text);
	xml.start("c", &[("r", reference), ("t", "inlineStr")])?;
	xml.start("is", &[])?;
	if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
		xml.element("t", &[("xml:space", "preserve")], &text)?;
	} else {
		xml.element("t", &[], &text)?;
	}
	xml.end("is")?;
	xml.end("c")
}

/// Drop characters XML 1.0 cannot carry
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_xlsx::package::sanitize_text;
///
/// assert_eq!(sanitize_text("a\u{0}b\tc\u{1b}"), "ab\tc");
/// ```
pub fn sanitize_text(text: &str) -> String {
	text.chars().filter(|c| is_xml_char(*c)).collect()
}

fn is_xml_char(c: char) -> bool {
	matches!(c,
		'\t' | '\n' | '\r'
		| '\u{20}'..='\u{D7FF}'
		| '\u{E000}'..='\u{FFFD}'
		| '\u{10000}'..='\u{10FFFF}')
}

fn epoch() -> Option<NaiveDate> {
	NaiveDate::from_ymd_opt(EXCEL_EPOCH.0, EXCEL_EPOCH.1, EXCEL_EPOCH.2)
}

/// Day serial of `date` in the 1900 date system, `None` before 1900
pub fn date_serial(date: NaiveDate) -> Option<i64> {
	let days = date.signed_duration_since(epoch()?).num_days();
	match days {
		..=1 => None,
		d if d < FIRST_CORRECT_SERIAL => Some(d - 1),
		d => Some(d),
	}
}

/// Serial of `datetime`: whole days plus the elapsed fraction of the day
pub fn datetime_serial(datetime: NaiveDateTime) -> Option<f64> {
	let day = date_serial(datetime.date())? as f64;
	let seconds = datetime.time().num_seconds_from_midnight() as f64
		+ datetime.time().nanosecond() as f64 / 1e9;
	Some(day + seconds / 86_400.0)
}
