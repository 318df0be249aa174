//! Text helpers used to build filenames and titles

pub use reinhardt_admin_export_utils::*;
