//! Admin integration
//!
//! Unified access to the admin side of exports through the
//! `reinhardt_admin_export::admin` namespace.
//!
//! ```rust
//! use reinhardt_admin_export::admin::*;
//!
//! let site = AdminSite::new("admin");
//! register_exporter(&site, &ExporterRegistry::with_defaults(), XLSX_EXPORTER_PATH).unwrap();
//!
//! assert_eq!(site.action_names(), vec!["xlsxexporter"]);
//! ```

pub use reinhardt_admin_export_actions::*;
