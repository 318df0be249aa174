//! # reinhardt-admin-export-actions
//!
//! Binds exporters to an [`AdminSite`] as bulk actions.
//!
//! Exporters are referenced either directly or by a name looked up in an
//! [`ExporterRegistry`]. Names can come from [`ExportSettings`] and are
//! registered with [`auto_register_exporters`].
//!
//! ## Example
//!
//! ```
//! use reinhardt_admin_export_actions::{
//!     AdminSite, ExportSettings, ExporterRegistry, ModelAdminConfig, auto_register_exporters,
//! };
//! use reinhardt_admin_export_core::{DynamicRecord, InMemoryRecordSet, ModelMeta};
//!
//! let site = AdminSite::new("admin");
//! let registry = ExporterRegistry::with_defaults();
//! let settings = ExportSettings::from_toml_str(r#"admin_exporters = ["xlsx"]"#).unwrap();
//! auto_register_exporters(&site, &registry, &settings).unwrap();
//!
//! let meta = ModelMeta::new("Widget").with_field("id");
//! let records = InMemoryRecordSet::new(meta, vec![DynamicRecord::new().with_value("id", 1)]);
//! let (request, _) = http::Request::new(()).into_parts();
//!
//! let response = site
//!     .execute_action("xlsxexporter", &ModelAdminConfig::new("Widget"), &request, &records)
//!     .unwrap();
//! assert!(response.filename().unwrap().ends_with(".xlsx"));
//! ```

pub mod action;
pub mod error;
pub mod model_admin;
pub mod register;
pub mod registry;
pub mod settings;
pub mod site;

pub use action::{AdminAction, ExportAction, to_action};
pub use error::{AdminError, AdminResult};
pub use model_admin::{ModelAdmin, ModelAdminConfig, ModelAdminConfigBuilder};
pub use register::{auto_register_exporters, register_exporter, register_exporters};
pub use registry::{ExporterRef, ExporterRegistry, XLSX_EXPORTER_PATH};
pub use settings::{EXPORTERS_ENV_VAR, ExportSettings};
pub use site::AdminSite;
