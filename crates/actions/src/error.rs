//! Error types for admin actions

use reinhardt_admin_export_core::ExportError;
use thiserror::Error;

/// Admin action error type
#[derive(Debug, Error)]
pub enum AdminError {
	/// No action is registered under the name
	#[error("Invalid action: {0}")]
	InvalidAction(String),

	/// Exporter name is not present in the exporter registry
	#[error("Unknown exporter: {0}")]
	UnknownExporter(String),

	/// Settings could not be read or parsed
	#[error("Settings error: {0}")]
	Settings(String),

	/// Admin configuration is incomplete
	#[error("Validation error: {0}")]
	ValidationError(String),

	/// The export itself failed
	#[error(transparent)]
	Export(#[from] ExportError),
}

/// Result type for admin action operations
pub type AdminResult<T> = Result<T, AdminError>;
