//! Registration of export actions on an admin site

use crate::action::{AdminAction, ExportAction};
use crate::error::AdminResult;
use crate::registry::{ExporterRef, ExporterRegistry};
use crate::settings::ExportSettings;
use crate::site::AdminSite;
use reinhardt_admin_export_core::Exporter;
use std::sync::Arc;

/// Register one exporter as an action on `site`
///
/// Returns the action name, which is the exporter's name.
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_actions::{AdminSite, ExporterRegistry, register_exporter};
///
/// let site = AdminSite::new("admin");
/// let registry = ExporterRegistry::with_defaults();
///
/// let name = register_exporter(&site, &registry, "xlsx").unwrap();
/// assert_eq!(name, "xlsxexporter");
/// assert!(site.has_action("xlsxexporter"));
/// ```
pub fn register_exporter(
	site: &AdminSite,
	registry: &ExporterRegistry,
	exporter: impl Into<ExporterRef>,
) -> AdminResult<String> {
	let exporter = registry.resolve(&exporter.into())?;
	Ok(add_export_action(site, exporter))
}

/// Register several exporters
///
/// Every reference is resolved before any action is added, so an unknown
/// name leaves the site untouched.
pub fn register_exporters<I, E>(
	site: &AdminSite,
	registry: &ExporterRegistry,
	exporters: I,
) -> AdminResult<Vec<String>>
where
	I: IntoIterator<Item = E>,
	E: Into<ExporterRef>,
{
	let resolved = exporters
		.into_iter()
		.map(|exporter| registry.resolve(&exporter.into()))
		.collect::<AdminResult<Vec<_>>>()?;

	Ok(resolved
		.into_iter()
		.map(|exporter| add_export_action(site, exporter))
		.collect())
}

/// Register the exporters named in the settings
pub fn auto_register_exporters(
	site: &AdminSite,
	registry: &ExporterRegistry,
	settings: &ExportSettings,
) -> AdminResult<Vec<String>> {
	if settings.admin_exporters.is_empty() {
		tracing::debug!(site = site.name(), "no exporters configured");
		return Ok(Vec::new());
	}
	register_exporters(site, registry, settings.admin_exporters.iter().map(String::as_str))
}

fn add_export_action(site: &AdminSite, exporter: Arc<dyn Exporter>) -> String {
	let action = ExportAction::new(exporter);
	let name = action.name().to_string();
	site.add_action(Arc::new(action), None);
	tracing::debug!(site = site.name(), action = %name, "registered export action");
	name
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::AdminError;
	use reinhardt_admin_export_xlsx::XlsxExporter;
	use rstest::rstest;

	#[rstest]
	fn test_register_direct_exporter() {
		// Arrange
		let site = AdminSite::new("admin");
		let registry = ExporterRegistry::new();

		// Act
		let name = register_exporter(&site, &registry, XlsxExporter).unwrap();

		// Assert
		assert_eq!(name, "xlsxexporter");
		assert_eq!(site.action_names(), vec!["xlsxexporter"]);
	}

	#[rstest]
	fn test_register_same_exporter_twice_keeps_one_action() {
		// Arrange
		let site = AdminSite::new("admin");
		let registry = ExporterRegistry::with_defaults();

		// Act
		let names = register_exporters(&site, &registry, ["xlsx", "reinhardt_admin_export::XlsxExporter"])
			.unwrap();

		// Assert
		assert_eq!(names, vec!["xlsxexporter", "xlsxexporter"]);
		assert_eq!(site.len(), 1);
	}

	#[rstest]
	fn test_register_exporters_is_all_or_nothing() {
		// Arrange
		let site = AdminSite::new("admin");
		let registry = ExporterRegistry::with_defaults();

		// Act
		let result = register_exporters(&site, &registry, ["xlsx", "app::Missing"]);

		// Assert
		assert!(matches!(result, Err(AdminError::UnknownExporter(_))));
		assert!(site.is_empty());
	}

	#[rstest]
	fn test_auto_register_from_settings() {
		// Arrange
		let site = AdminSite::new("admin");
		let registry = ExporterRegistry::with_defaults();
		let settings = ExportSettings::new().with_exporter("reinhardt_admin_export::XlsxExporter");

		// Act
		let names = auto_register_exporters(&site, &registry, &settings).unwrap();

		// Assert
		assert_eq!(names, vec!["xlsxexporter"]);
		assert!(site.has_action("xlsxexporter"));
	}

	#[rstest]
	fn test_auto_register_without_settings_does_nothing() {
		let site = AdminSite::new("admin");
		let names =
			auto_register_exporters(&site, &ExporterRegistry::with_defaults(), &ExportSettings::new())
				.unwrap();
		assert!(names.is_empty());
		assert!(site.is_empty());
	}
}
