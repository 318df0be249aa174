//! Per-export options

/// Options attached to one export
///
/// Built once from the model admin configuration and read-only afterwards.
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_core::ExportOptions;
///
/// let options = ExportOptions::new()
///     .with_columns(["name", "price"])
///     .with_exclude_columns(["price"]);
///
/// assert_eq!(options.columns(), Some(&["name".to_string(), "price".to_string()][..]));
/// assert!(options.is_excluded("price"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
	/// Explicit ordered column list; empty or absent means all model fields
	columns: Option<Vec<String>>,
	/// Columns removed from the resolved list
	exclude_columns: Option<Vec<String>>,
}

impl ExportOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the explicit ordered column list
	pub fn with_columns<I, S>(mut self, columns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.columns = Some(columns.into_iter().map(Into::into).collect());
		self
	}

	/// Set the columns to exclude
	pub fn with_exclude_columns<I, S>(mut self, columns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.exclude_columns = Some(columns.into_iter().map(Into::into).collect());
		self
	}

	/// Explicit column list, if one was given and it is not empty
	pub fn columns(&self) -> Option<&[String]> {
		self.columns.as_deref().filter(|columns| !columns.is_empty())
	}

	pub fn exclude_columns(&self) -> Option<&[String]> {
		self.exclude_columns.as_deref()
	}

	pub fn is_excluded(&self, column: &str) -> bool {
		self.exclude_columns
			.as_ref()
			.is_some_and(|excluded| excluded.iter().any(|c| c == column))
	}
}
