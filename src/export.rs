//! Exporter contract and schema reflection

pub use reinhardt_admin_export_core::*;
