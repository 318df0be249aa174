//! # reinhardt-admin-export-xlsx
//!
//! OpenXML spreadsheet output for admin export actions.
//!
//! [`XlsxExporter`] plugs into [`BaseExporter`](reinhardt_admin_export_core::BaseExporter)
//! and writes one worksheet per export through [`Workbook`].

pub mod exporter;
pub mod package;
pub mod workbook;

pub use exporter::{XLSX_CONTENT_TYPE, XlsxExporter};
pub use workbook::{Cell, MAX_TITLE_LENGTH, Workbook, Worksheet};
