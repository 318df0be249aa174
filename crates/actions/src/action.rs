//! Export actions
//!
//! An action is a bulk operation the admin offers on the records selected in
//! a list view. [`ExportAction`] turns an [`Exporter`] into such an action.

use crate::model_admin::ModelAdmin;
use http::request::Parts;
use reinhardt_admin_export_core::{
	BaseExporter, ExportOptions, ExportResponse, ExportResult, Exporter, RecordSet,
};
use std::fmt;
use std::sync::Arc;

/// Trait for admin actions
///
/// # Examples
///
/// ```
/// use http::request::Parts;
/// use reinhardt_admin_export_actions::{AdminAction, ModelAdmin};
/// use reinhardt_admin_export_core::{ExportResponse, ExportResult, RecordSet};
///
/// struct CountAction;
///
/// impl AdminAction for CountAction {
///     fn name(&self) -> &str {
///         "count_selected"
///     }
///
///     fn description(&self) -> &str {
///         "Count selected objects"
///     }
///
///     fn execute(
///         &self,
///         _model_admin: &dyn ModelAdmin,
///         _request: &Parts,
///         records: &dyn RecordSet,
///     ) -> ExportResult<ExportResponse> {
///         let mut response = ExportResponse::ok().with_content_type("text/plain")?;
///         let count = records.iter().count();
///         std::io::Write::write_all(&mut response, count.to_string().as_bytes())?;
///         Ok(response)
///     }
/// }
///
/// assert_eq!(CountAction.name(), "count_selected");
/// ```
pub trait AdminAction: Send + Sync {
	/// Get the action name (used as identifier)
	fn name(&self) -> &str;

	/// Get the action description (displayed in UI)
	fn description(&self) -> &str;

	/// Run the action on the selected records
	fn execute(
		&self,
		model_admin: &dyn ModelAdmin,
		request: &Parts,
		records: &dyn RecordSet,
	) -> ExportResult<ExportResponse>;
}

/// Action that downloads the selected records through an exporter
#[derive(Clone)]
pub struct ExportAction {
	exporter: Arc<dyn Exporter>,
	name: String,
	description: String,
}

impl ExportAction {
	pub fn new(exporter: Arc<dyn Exporter>) -> Self {
		let name = exporter.name();
		let description = exporter.description();
		Self {
			exporter,
			name,
			description,
		}
	}

	pub fn exporter(&self) -> &Arc<dyn Exporter> {
		&self.exporter
	}

	/// Export options configured on the model admin
	pub fn collect_options(model_admin: &dyn ModelAdmin) -> ExportOptions {
		let mut options = ExportOptions::new();
		if let Some(columns) = model_admin.export_columns() {
			options = options.with_columns(columns);
		}
		if let Some(exclude) = model_admin.export_exclude_columns() {
			options = options.with_exclude_columns(exclude);
		}
		options
	}
}

impl fmt::Debug for ExportAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ExportAction")
			.field("name", &self.name)
			.field("content_type", &self.exporter.content_type())
			.finish()
	}
}

impl AdminAction for ExportAction {
	fn name(&self) -> &str {
		&self.name
	}

	fn description(&self) -> &str {
		&self.description
	}

	fn execute(
		&self,
		model_admin: &dyn ModelAdmin,
		request: &Parts,
		records: &dyn RecordSet,
	) -> ExportResult<ExportResponse> {
		tracing::debug!(
			action = %self.name,
			model = model_admin.model_name(),
			method = %request.method,
			uri = %request.uri,
			"running export action"
		);
		let options = Self::collect_options(model_admin);
		BaseExporter::new(self.exporter.as_ref(), records, options).export_to_response()
	}
}

/// Wrap an exporter into an admin action
pub fn to_action(exporter: Arc<dyn Exporter>) -> ExportAction {
	ExportAction::new(exporter)
}
