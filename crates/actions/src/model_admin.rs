//! Model admin export configuration

use crate::error::{AdminError, AdminResult};

/// Admin configuration of one model, as far as exports are concerned
///
/// The export action reads the optional column lists from here and forwards
/// them as export options.
pub trait ModelAdmin: Send + Sync {
	/// Get the model name
	fn model_name(&self) -> &str;

	/// Columns to export, in order (None = every declared field)
	fn export_columns(&self) -> Option<Vec<&str>> {
		None
	}

	/// Columns never exported
	fn export_exclude_columns(&self) -> Option<Vec<&str>> {
		None
	}
}

/// Configuration-based model admin implementation
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_actions::{ModelAdmin, ModelAdminConfig};
///
/// let admin = ModelAdminConfig::builder()
///     .model_name("Widget")
///     .export_columns(vec!["id", "name"])
///     .build()
///     .unwrap();
///
/// assert_eq!(admin.model_name(), "Widget");
/// assert_eq!(admin.export_columns(), Some(vec!["id", "name"]));
/// assert_eq!(admin.export_exclude_columns(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAdminConfig {
	model_name: String,
	export_columns: Option<Vec<String>>,
	export_exclude_columns: Option<Vec<String>>,
}

impl ModelAdminConfig {
	pub fn new(model_name: impl Into<String>) -> Self {
		Self {
			model_name: model_name.into(),
			export_columns: None,
			export_exclude_columns: None,
		}
	}

	pub fn builder() -> ModelAdminConfigBuilder {
		ModelAdminConfigBuilder::default()
	}

	pub fn with_export_columns(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.export_columns = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	pub fn with_export_exclude_columns(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.export_exclude_columns = Some(fields.into_iter().map(Into::into).collect());
		self
	}
}

fn as_strs(fields: &Option<Vec<String>>) -> Option<Vec<&str>> {
	fields
		.as_ref()
		.map(|fields| fields.iter().map(String::as_str).collect())
}

impl ModelAdmin for ModelAdminConfig {
	fn model_name(&self) -> &str {
		&self.model_name
	}

	fn export_columns(&self) -> Option<Vec<&str>> {
		as_strs(&self.export_columns)
	}

	fn export_exclude_columns(&self) -> Option<Vec<&str>> {
		as_strs(&self.export_exclude_columns)
	}
}

/// Builder for ModelAdminConfig
#[derive(Debug, Default)]
pub struct ModelAdminConfigBuilder {
	model_name: Option<String>,
	export_columns: Option<Vec<String>>,
	export_exclude_columns: Option<Vec<String>>,
}

impl ModelAdminConfigBuilder {
	/// Set the model name
	pub fn model_name(mut self, name: impl Into<String>) -> Self {
		self.model_name = Some(name.into());
		self
	}

	/// Set exported columns
	pub fn export_columns(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.export_columns = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	/// Set excluded columns
	pub fn export_exclude_columns(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.export_exclude_columns = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	/// Build the configuration
	///
	/// Fails when no model name was set.
	pub fn build(self) -> AdminResult<ModelAdminConfig> {
		let model_name = self
			.model_name
			.ok_or_else(|| AdminError::ValidationError("model_name is required".to_string()))?;
		Ok(ModelAdminConfig {
			model_name,
			export_columns: self.export_columns,
			export_exclude_columns: self.export_exclude_columns,
		})
	}
}
