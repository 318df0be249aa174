//! Admin site action registry

use crate::action::AdminAction;
use crate::error::{AdminError, AdminResult};
use crate::model_admin::ModelAdmin;
use http::request::Parts;
use indexmap::IndexMap;
use parking_lot::RwLock;
use reinhardt_admin_export_core::{ExportResponse, RecordSet};
use std::fmt;
use std::sync::Arc;

/// Name of a site created through `Default`
pub const DEFAULT_SITE_NAME: &str = "admin";

/// Bulk actions offered by one admin site
///
/// Sites are constructed explicitly and handed to the registration
/// functions; nothing is registered behind the caller's back. Actions keep
/// their registration order, and re-registering a name replaces the
/// previous action in place.
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_actions::{AdminSite, ExportAction};
/// use reinhardt_admin_export_xlsx::XlsxExporter;
/// use std::sync::Arc;
///
/// let site = AdminSite::new("admin");
/// site.add_action(Arc::new(ExportAction::new(Arc::new(XlsxExporter))), None);
///
/// assert!(site.has_action("xlsxexporter"));
/// assert_eq!(site.action_names(), vec!["xlsxexporter"]);
/// ```
pub struct AdminSite {
	name: String,
	actions: RwLock<IndexMap<String, Arc<dyn AdminAction>>>,
}

impl AdminSite {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			actions: RwLock::new(IndexMap::new()),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Register an action under `name`, or under its own name when `None`
	///
	/// Returns the action previously registered under that name.
	pub fn add_action(
		&self,
		action: Arc<dyn AdminAction>,
		name: Option<&str>,
	) -> Option<Arc<dyn AdminAction>> {
		let name = name.unwrap_or_else(|| action.name()).to_string();
		let previous = self.actions.write().insert(name.clone(), action);
		if previous.is_some() {
			tracing::warn!(site = %self.name, action = %name, "replaced existing admin action");
		} else {
			tracing::debug!(site = %self.name, action = %name, "added admin action");
		}
		previous
	}

	/// Unregister an action
	pub fn remove_action(&self, name: &str) -> AdminResult<()> {
		self.actions
			.write()
			.shift_remove(name)
			.map(|_| ())
			.ok_or_else(|| AdminError::InvalidAction(format!("Action '{}' not found", name)))
	}

	/// Get an action by name
	pub fn get_action(&self, name: &str) -> AdminResult<Arc<dyn AdminAction>> {
		self.actions
			.read()
			.get(name)
			.cloned()
			.ok_or_else(|| AdminError::InvalidAction(format!("Action '{}' not found", name)))
	}

	pub fn has_action(&self, name: &str) -> bool {
		self.actions.read().contains_key(name)
	}

	/// Registered action names, in registration order
	pub fn action_names(&self) -> Vec<String> {
		self.actions.read().keys().cloned().collect()
	}

	/// Registered actions with their names, in registration order
	pub fn actions(&self) -> Vec<(String, Arc<dyn AdminAction>)> {
		self.actions
			.read()
			.iter()
			.map(|(name, action)| (name.clone(), Arc::clone(action)))
			.collect()
	}

	pub fn len(&self) -> usize {
		self.actions.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.actions.read().is_empty()
	}

	/// Run the action registered under `name`
	pub fn execute_action(
		&self,
		name: &str,
		model_admin: &dyn ModelAdmin,
		request: &Parts,
		records: &dyn RecordSet,
	) -> AdminResult<ExportResponse> {
		let action = self.get_action(name)?;
		Ok(action.execute(model_admin, request, records)?)
	}
}

impl Default for AdminSite {
	fn default() -> Self {
		Self::new(DEFAULT_SITE_NAME)
	}
}

impl fmt::Debug for AdminSite {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AdminSite")
			.field("name", &self.name)
			.field("actions", &self.action_names())
			.finish()
	}
}
