//! Integration tests for settings-driven registration

use reinhardt_admin_export::admin::EXPORTERS_ENV_VAR;
use reinhardt_admin_export::prelude::*;
use reinhardt_admin_export::AdminError;
use rstest::rstest;
use serial_test::serial;
use std::io::Write;

/// Test: Settings file → auto registration
#[rstest]
fn test_auto_register_from_settings_file() {
	// Arrange
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "admin_exporters = [\"xlsx\"]").unwrap();
	let settings = ExportSettings::from_path(file.path()).unwrap();
	let site = AdminSite::new("admin");

	// Act
	let names =
		auto_register_exporters(&site, &ExporterRegistry::with_defaults(), &settings).unwrap();

	// Assert
	assert_eq!(names, vec!["xlsxexporter"]);
	assert_eq!(site.action_names(), vec!["xlsxexporter"]);
	assert_eq!(
		site.get_action("xlsxexporter").unwrap().description(),
		"Export selected objects as a xlsx file"
	);
}

/// Test: Environment variable overrides the settings file
#[rstest]
#[serial]
fn test_env_override_selects_exporters() {
	// Arrange
	unsafe { std::env::set_var(EXPORTERS_ENV_VAR, "app::Missing") };
	let settings = ExportSettings::new().with_exporter("xlsx").with_env_overrides();
	unsafe { std::env::remove_var(EXPORTERS_ENV_VAR) };
	let site = AdminSite::new("admin");

	// Act
	let result = auto_register_exporters(&site, &ExporterRegistry::with_defaults(), &settings);

	// Assert
	assert!(matches!(result, Err(AdminError::UnknownExporter(name)) if name == "app::Missing"));
	assert!(site.is_empty());
}

/// Test: Direct and named references can be mixed
#[rstest]
fn test_register_mixed_references() {
	// Arrange
	let site = AdminSite::new("admin");
	let registry = ExporterRegistry::new();

	// Act
	let names = register_exporters(
		&site,
		&registry,
		[ExporterRef::direct(XlsxExporter)],
	)
	.unwrap();

	// Assert
	assert_eq!(names, vec!["xlsxexporter"]);
	assert!(matches!(
		register_exporter(&site, &registry, "xlsx"),
		Err(AdminError::UnknownExporter(_))
	));
}
