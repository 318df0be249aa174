//! Export settings
//!
//! Settings are read from TOML, either a string or a file:
//!
//! ```toml
//! admin_exporters = ["reinhardt_admin_export::XlsxExporter"]
//! ```
//!
//! The `REINHARDT_ADMIN_EXPORTERS` environment variable, a comma separated
//! list, replaces the configured list when set.

use crate::error::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`ExportSettings::admin_exporters`]
pub const EXPORTERS_ENV_VAR: &str = "REINHARDT_ADMIN_EXPORTERS";

/// Settings of the export actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
	/// Exporter names registered by `auto_register_exporters`
	pub admin_exporters: Vec<String>,
}

impl ExportSettings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_exporter(mut self, name: impl Into<String>) -> Self {
		self.admin_exporters.push(name.into());
		self
	}

	/// Parse settings from TOML text
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_admin_export_actions::ExportSettings;
	///
	/// let settings = ExportSettings::from_toml_str(
	///     r#"admin_exporters = ["xlsx"]"#,
	/// ).unwrap();
	/// assert_eq!(settings.admin_exporters, vec!["xlsx"]);
	///
	/// assert!(ExportSettings::from_toml_str("").unwrap().admin_exporters.is_empty());
	/// ```
	pub fn from_toml_str(content: &str) -> AdminResult<Self> {
		toml::from_str(content).map_err(|e| AdminError::Settings(format!("Invalid TOML: {}", e)))
	}

	/// Read settings from a TOML file
	pub fn from_path(path: impl AsRef<Path>) -> AdminResult<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| {
			AdminError::Settings(format!("Failed to read {}: {}", path.display(), e))
		})?;
		let settings = Self::from_toml_str(&content)?;
		tracing::debug!(
			path = %path.display(),
			exporters = settings.admin_exporters.len(),
			"loaded export settings"
		);
		Ok(settings)
	}

	/// Apply the `REINHARDT_ADMIN_EXPORTERS` override, if set
	pub fn with_env_overrides(self) -> Self {
		match std::env::var(EXPORTERS_ENV_VAR) {
			Ok(raw) => self.with_exporter_list(&raw),
			Err(_) => self,
		}
	}

	/// Replace the exporter list with a comma separated one
	pub fn with_exporter_list(mut self, raw: &str) -> Self {
		self.admin_exporters = raw
			.split(',')
			.map(str::trim)
			.filter(|name| !name.is_empty())
			.map(String::from)
			.collect();
		self
	}

	/// Serialize back to TOML
	pub fn to_toml_string(&self) -> AdminResult<String> {
		toml::to_string(self).map_err(|e| AdminError::Settings(e.to_string()))
	}
}
