//! In-memory workbook with a single append-only worksheet

use crate::package;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reinhardt_admin_export_core::{ExportError, ExportResult, Row, Value};
use std::io::{self, Seek, SeekFrom, Write};

/// Sheet titles must be strictly shorter than this many characters
pub const MAX_TITLE_LENGTH: usize = 32;

/// Characters the format forbids in sheet titles
pub const INVALID_TITLE_CHARS: &[char] = &['\\', '/', '?', '*', ':', '[', ']'];

/// Largest row count a worksheet can hold
pub const MAX_ROWS: usize = 1_048_576;

/// Largest column count a worksheet can hold
pub const MAX_COLUMNS: usize = 16_384;

/// Title given to a new worksheet
pub const DEFAULT_SHEET_TITLE: &str = "Sheet";

/// A worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
	Empty,
	Bool(bool),
	Int(i64),
	Float(f64),
	Text(String),
	Date(NaiveDate),
	DateTime(NaiveDateTime),
}

impl TryFrom<Value> for Cell {
	type Error = ExportError;

	fn try_from(value: Value) -> ExportResult<Self> {
		match value {
			Value::Null => Ok(Cell::Empty),
			Value::Bool(b) => Ok(Cell::Bool(b)),
			Value::Int(i) => Ok(Cell::Int(i)),
			Value::Float(x) if x.is_finite() => Ok(Cell::Float(x)),
			Value::Float(x) => Err(ExportError::UnsupportedValue(format!(
				"non-finite number {} cannot be stored in a cell",
				x
			))),
			Value::Text(s) => Ok(Cell::Text(s)),
			Value::Date(d) => Ok(Cell::Date(d)),
			Value::DateTime(dt) => Ok(Cell::DateTime(dt)),
			Value::Lazy(_) => Err(ExportError::UnsupportedValue(
				"lazy text must be rendered before it is stored in a cell".to_string(),
			)),
		}
	}
}

/// Convert a 1-based column index to its letters (`1` → `A`, `28` → `AB`)
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_xlsx::workbook::column_letter;
///
/// assert_eq!(column_letter(1), "A");
/// assert_eq!(column_letter(26), "Z");
/// assert_eq!(column_letter(27), "AA");
/// assert_eq!(column_letter(16_384), "XFD");
/// ```
pub fn column_letter(mut index: usize) -> String {
	let mut letters = Vec::new();
	while index > 0 {
		let rem = (index - 1) % 26;
		letters.push(b'A' + rem as u8);
		index = (index - 1) / 26;
	}
	letters.reverse();
	String::from_utf8(letters).unwrap_or_default()
}

/// Reference of the cell at 1-based `row` and `column`, e.g. `B3`
pub fn cell_reference(row: usize, column: usize) -> String {
	format!("{}{}", column_letter(column), row)
}

/// An append-only grid of cells
#[derive(Debug, Clone)]
pub struct Worksheet {
	title: String,
	rows: Vec<Vec<Cell>>,
	max_column: usize,
	auto_filter: Option<String>,
}

impl Worksheet {
	pub fn new() -> Self {
		Self {
			title: DEFAULT_SHEET_TITLE.to_string(),
			rows: Vec::new(),
			max_column: 0,
			auto_filter: None,
		}
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	/// Set the sheet title
	///
	/// The title must be non-empty, shorter than [`MAX_TITLE_LENGTH`]
	/// characters and free of [`INVALID_TITLE_CHARS`].
	pub fn set_title(&mut self, title: &str) -> ExportResult<()> {
		let length = title.chars().count();
		if length == 0 {
			return Err(ExportError::InvalidTitle(
				"a sheet title cannot be empty".to_string(),
			));
		}
		if length >= MAX_TITLE_LENGTH {
			return Err(ExportError::InvalidTitle(format!(
				"a sheet title cannot be longer than {} chars: '{}'",
				MAX_TITLE_LENGTH, title
			)));
		}
		if let Some(ch) = title.chars().find(|c| INVALID_TITLE_CHARS.contains(c)) {
			return Err(ExportError::InvalidTitle(format!(
				"a sheet title cannot contain '{}': '{}'",
				ch, title
			)));
		}
		self.title = title.to_string();
		Ok(())
	}

	/// Append a row below the last one
	pub fn append(&mut self, row: Row) -> ExportResult<()> {
		if self.rows.len() >= MAX_ROWS {
			return Err(ExportError::Serialization(format!(
				"a sheet cannot hold more than {} rows",
				MAX_ROWS
			)));
		}
		if row.len() > MAX_COLUMNS {
			return Err(ExportError::Serialization(format!(
				"a sheet cannot hold more than {} columns",
				MAX_COLUMNS
			)));
		}
		let cells = row
			.into_iter()
			.map(Cell::try_from)
			.collect::<ExportResult<Vec<_>>>()?;
		self.max_column = self.max_column.max(cells.len());
		self.rows.push(cells);
		Ok(())
	}

	pub fn rows(&self) -> &[Vec<Cell>] {
		&self.rows
	}

	pub fn max_row(&self) -> usize {
		self.rows.len()
	}

	pub fn max_column(&self) -> usize {
		self.max_column
	}

	/// Range covering every populated cell, `A1:A1` for an empty sheet
	pub fn calculate_dimension(&self) -> String {
		if self.rows.is_empty() || self.max_column == 0 {
			return "A1:A1".to_string();
		}
		format!(
			"A1:{}",
			cell_reference(self.rows.len(), self.max_column)
		)
	}

	pub fn auto_filter(&self) -> Option<&str> {
		self.auto_filter.as_deref()
	}

	pub fn set_auto_filter(&mut self, range: impl Into<String>) {
		self.auto_filter = Some(range.into());
	}
}

impl Default for Worksheet {
	fn default() -> Self {
		Self::new()
	}
}

/// A workbook holding one worksheet, built once and saved once
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_core::Value;
/// use reinhardt_admin_export_xlsx::Workbook;
///
/// let mut book = Workbook::new();
/// book.set_title("widget").unwrap();
/// book.fill(
///     vec![Ok(vec![Value::Int(1), Value::from("Bolt")])],
///     &["id".to_string(), "name".to_string()],
/// )
/// .unwrap();
///
/// assert_eq!(book.sheet().calculate_dimension(), "A1:B2");
/// assert_eq!(book.sheet().auto_filter(), Some("A1:B2"));
///
/// let mut bytes = Vec::new();
/// book.write_to(&mut bytes).unwrap();
/// assert!(bytes.starts_with(b"PK"));
/// ```
#[derive(Debug, Clone)]
pub struct Workbook {
	sheet: Worksheet,
	created: DateTime<Utc>,
}

impl Workbook {
	pub fn new() -> Self {
		Self {
			sheet: Worksheet::new(),
			created: Utc::now(),
		}
	}

	/// Override the creation timestamp stored in the document properties
	pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
		self.created = created;
		self
	}

	pub fn sheet(&self) -> &Worksheet {
		&self.sheet
	}

	pub fn sheet_mut(&mut self) -> &mut Worksheet {
		&mut self.sheet
	}

	pub fn created(&self) -> DateTime<Utc> {
		self.created
	}

	pub fn set_title(&mut self, title: &str) -> ExportResult<()> {
		self.sheet.set_title(title)
	}

	/// Fill the sheet with an optional header row followed by `rows`
	///
	/// When headers are given, an auto-filter spanning the populated range
	/// is enabled.
	pub fn fill<I>(&mut self, rows: I, headers: &[String]) -> ExportResult<()>
	where
		I: IntoIterator<Item = ExportResult<Row>>,
	{
		if !headers.is_empty() {
			self.sheet
				.append(headers.iter().cloned().map(Value::Text).collect())?;
		}

		for row in rows {
			self.sheet.append(row?)?;
		}

		if !headers.is_empty() {
			let range = self.sheet.calculate_dimension();
			self.sheet.set_auto_filter(range);
		}
		Ok(())
	}

	/// Serialize the workbook package into a seekable writer
	pub fn save<W: Write + Seek>(&self, writer: W) -> ExportResult<W> {
		package::write_package(self, writer)
	}

	/// Write the serialized workbook into `dest`
	///
	/// The package is first saved into a temporary file, which is removed
	/// when this returns, whether it succeeds or not.
	pub fn write_to(&self, dest: &mut dyn Write) -> ExportResult<u64> {
		let mut tmp = tempfile::Builder::new()
			.prefix("reinhardt-export-")
			.suffix(".xlsx")
			.tempfile()?;
		self.save(tmp.as_file_mut())?;

		let file = tmp.as_file_mut();
		file.flush()?;
		file.seek(SeekFrom::Start(0))?;
		let written = io::copy(file, dest)?;
		tracing::debug!(bytes = written, path = %tmp.path().display(), "copied workbook from temporary file");
		Ok(written)
	}
}

impl Default for Workbook {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use reinhardt_admin_export_core::LazyText;
	use rstest::rstest;

	fn headers(names: &[&str]) -> Vec<String> {
		names.iter().map(|s| s.to_string()).collect()
	}

	#[rstest]
	#[case(1, "A")]
	#[case(2, "B")]
	#[case(26, "Z")]
	#[case(27, "AA")]
	#[case(52, "AZ")]
	#[case(53, "BA")]
	#[case(702, "ZZ")]
	#[case(703, "AAA")]
	#[case(16_384, "XFD")]
	fn test_column_letter(#[case] index: usize, #[case] expected: &str) {
		assert_eq!(column_letter(index), expected);
	}

	#[rstest]
	fn test_cell_reference() {
		assert_eq!(cell_reference(1, 1), "A1");
		assert_eq!(cell_reference(10, 28), "AB10");
	}

	#[rstest]
	#[case(31)]
	#[case(1)]
	fn test_set_title_accepts_short_titles(#[case] length: usize) {
		// Arrange
		let mut sheet = Worksheet::new();
		let title = "x".repeat(length);

		// Act
		let result = sheet.set_title(&title);

		// Assert
		assert!(result.is_ok());
		assert_eq!(sheet.title(), title);
	}

	#[rstest]
	#[case(32)]
	#[case(40)]
	fn test_set_title_rejects_long_titles(#[case] length: usize) {
		// Arrange
		let mut sheet = Worksheet::new();

		// Act
		let result = sheet.set_title(&"x".repeat(length));

		// Assert
		assert!(matches!(result, Err(ExportError::InvalidTitle(_))));
		assert_eq!(sheet.title(), DEFAULT_SHEET_TITLE);
	}

	#[rstest]
	fn test_set_title_counts_characters_not_bytes() {
		let mut sheet = Worksheet::new();
		assert!(sheet.set_title(&"é".repeat(31)).is_ok());
	}

	#[rstest]
	#[case("")]
	#[case("a/b")]
	#[case("[draft]")]
	#[case("what?")]
	fn test_set_title_rejects_invalid_titles(#[case] title: &str) {
		let mut sheet = Worksheet::new();
		assert!(matches!(
			sheet.set_title(title),
			Err(ExportError::InvalidTitle(_))
		));
	}

	#[rstest]
	fn test_empty_sheet_dimension() {
		assert_eq!(Worksheet::new().calculate_dimension(), "A1:A1");
	}

	#[rstest]
	fn test_dimension_uses_widest_row() {
		// Arrange
		let mut sheet = Worksheet::new();
		sheet.append(vec![Value::Int(1)]).unwrap();
		sheet
			.append(vec![Value::Int(1), Value::Null, Value::Bool(true)])
			.unwrap();

		// Act & Assert
		assert_eq!(sheet.calculate_dimension(), "A1:C2");
		assert_eq!(sheet.max_row(), 2);
		assert_eq!(sheet.max_column(), 3);
	}

	#[rstest]
	fn test_append_rejects_lazy_values() {
		// Arrange
		let mut sheet = Worksheet::new();
		let row = vec![Value::Lazy(LazyText::new("pending"))];

		// Act
		let result = sheet.append(row);

		// Assert
		assert!(matches!(result, Err(ExportError::UnsupportedValue(_))));
		assert_eq!(sheet.max_row(), 0);
	}

	#[rstest]
	fn test_append_rejects_non_finite_numbers() {
		let mut sheet = Worksheet::new();
		assert!(sheet.append(vec![Value::Float(f64::NAN)]).is_err());
		assert!(sheet.append(vec![Value::Float(f64::INFINITY)]).is_err());
	}

	#[rstest]
	fn test_fill_with_headers_sets_auto_filter() {
		// Arrange
		let mut book = Workbook::new();
		let rows = vec![
			Ok(vec![Value::Int(1), Value::from("a")]),
			Ok(vec![Value::Int(2), Value::from("b")]),
		];

		// Act
		book.fill(rows, &headers(&["id", "name"])).unwrap();

		// Assert
		let sheet = book.sheet();
		assert_eq!(sheet.max_row(), 3);
		assert_eq!(sheet.rows()[0][0], Cell::Text("id".to_string()));
		assert_eq!(sheet.auto_filter(), Some("A1:B3"));
	}

	#[rstest]
	fn test_fill_without_headers_has_no_auto_filter() {
		// Arrange
		let mut book = Workbook::new();

		// Act
		book.fill(vec![Ok(vec![Value::Int(1)])], &[]).unwrap();

		// Assert
		assert_eq!(book.sheet().max_row(), 1);
		assert_eq!(book.sheet().auto_filter(), None);
	}

	#[rstest]
	fn test_fill_stops_on_row_error() {
		// Arrange
		let mut book = Workbook::new();
		let rows = vec![
			Ok(vec![Value::Int(1)]),
			Err(ExportError::MissingValue("name".to_string())),
			Ok(vec![Value::Int(3)]),
		];

		// Act
		let result = book.fill(rows, &headers(&["id"]));

		// Assert
		assert!(matches!(result, Err(ExportError::MissingValue(_))));
		assert_eq!(book.sheet().max_row(), 2);
	}

	#[rstest]
	fn test_write_to_produces_zip_archive() {
		// Arrange
		let mut book = Workbook::new();
		book.fill(vec![Ok(vec![Value::Int(1)])], &headers(&["id"]))
			.unwrap();
		let mut out = Vec::new();

		// Act
		let written = book.write_to(&mut out).unwrap();

		// Assert
		assert_eq!(written as usize, out.len());
		assert_eq!(&out[..2], b"PK");
	}
}
