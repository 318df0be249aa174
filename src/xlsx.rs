//! OpenXML spreadsheet exporter

pub use reinhardt_admin_export_xlsx::*;
