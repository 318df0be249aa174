//! Column resolution

use crate::error::ExportResult;
use crate::options::ExportOptions;
use crate::schema::ModelMeta;
use crate::value::{LazyText, Value};

/// One output column: a field name and its display title
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
	pub name: String,
	pub title: LazyText,
}

impl Column {
	pub fn new(name: impl Into<String>, title: impl Into<LazyText>) -> Self {
		Self {
			name: name.into(),
			title: title.into(),
		}
	}
}

/// Values of one record, in column order
pub type Row = Vec<Value>;

/// Resolve the columns of an export
///
/// An explicit column list is used verbatim, in its own order. Without one,
/// every declared field of the model is used in declaration order. Excluded
/// columns are then removed. Titles come from the field metadata, so a
/// column naming an undeclared field fails with
/// [`ExportError::UnknownField`](crate::ExportError::UnknownField).
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_core::{resolve_columns, ExportOptions, ModelMeta};
///
/// let meta = ModelMeta::new("Widget")
///     .with_field("id")
///     .with_field("name")
///     .with_field("price");
///
/// let options = ExportOptions::new().with_exclude_columns(["price"]);
/// let columns = resolve_columns(&meta, &options).unwrap();
///
/// let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
/// assert_eq!(names, vec!["id", "name"]);
/// ```
pub fn resolve_columns(meta: &ModelMeta, options: &ExportOptions) -> ExportResult<Vec<Column>> {
	let names: Vec<&str> = match options.columns() {
		Some(columns) => columns.iter().map(String::as_str).collect(),
		None => meta.field_names(),
	};

	names
		.into_iter()
		.filter(|name| !options.is_excluded(name))
		.map(|name| {
			let field = meta.get_field(name)?;
			Ok(Column::new(name, field.verbose_name().clone()))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ExportError;
	use crate::schema::FieldMeta;
	use rstest::{fixture, rstest};

	#[fixture]
	fn widget_meta() -> ModelMeta {
		ModelMeta::new("Widget")
			.with_field("id")
			.field(FieldMeta::new("name").with_verbose_name("Name"))
			.with_field("price")
			.with_field("created_at")
	}

	fn names(columns: &[Column]) -> Vec<&str> {
		columns.iter().map(|c| c.name.as_str()).collect()
	}

	#[rstest]
	fn test_all_fields_in_declared_order(widget_meta: ModelMeta) {
		// Act
		let columns = resolve_columns(&widget_meta, &ExportOptions::new()).unwrap();

		// Assert
		assert_eq!(names(&columns), vec!["id", "name", "price", "created_at"]);
		assert_eq!(columns[1].title.to_string(), "Name");
		assert_eq!(columns[3].title.to_string(), "created at");
	}

	#[rstest]
	fn test_explicit_columns_keep_their_order(widget_meta: ModelMeta) {
		// Arrange
		let options = ExportOptions::new().with_columns(["price", "id"]);

		// Act
		let columns = resolve_columns(&widget_meta, &options).unwrap();

		// Assert
		assert_eq!(names(&columns), vec!["price", "id"]);
	}

	#[rstest]
	fn test_exclude_without_explicit_columns(widget_meta: ModelMeta) {
		// Arrange
		let options = ExportOptions::new().with_exclude_columns(["name", "created_at"]);

		// Act
		let columns = resolve_columns(&widget_meta, &options).unwrap();

		// Assert
		assert_eq!(names(&columns), vec!["id", "price"]);
	}

	#[rstest]
	fn test_exclude_applies_to_explicit_columns(widget_meta: ModelMeta) {
		// Arrange
		let options = ExportOptions::new()
			.with_columns(["created_at", "name", "id"])
			.with_exclude_columns(["name"]);

		// Act
		let columns = resolve_columns(&widget_meta, &options).unwrap();

		// Assert
		assert_eq!(names(&columns), vec!["created_at", "id"]);
	}

	#[rstest]
	fn test_empty_explicit_list_falls_back_to_all_fields(widget_meta: ModelMeta) {
		let options = ExportOptions::new().with_columns(Vec::<&str>::new());
		let columns = resolve_columns(&widget_meta, &options).unwrap();
		assert_eq!(columns.len(), 4);
	}

	#[rstest]
	fn test_unknown_column_is_an_error(widget_meta: ModelMeta) {
		// Arrange
		let options = ExportOptions::new().with_columns(["id", "colour"]);

		// Act
		let result = resolve_columns(&widget_meta, &options);

		// Assert
		assert!(matches!(result, Err(ExportError::UnknownField { .. })));
	}

	#[rstest]
	fn test_excluding_unknown_column_is_harmless(widget_meta: ModelMeta) {
		let options = ExportOptions::new().with_exclude_columns(["colour"]);
		let columns = resolve_columns(&widget_meta, &options).unwrap();
		assert_eq!(columns.len(), 4);
	}
}
