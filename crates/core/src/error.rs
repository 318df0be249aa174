//! Error types for export operations

use thiserror::Error;

/// Export error type
#[derive(Debug, Error)]
pub enum ExportError {
	/// Field is not declared on the model
	#[error("Unknown field '{field}' on model '{model}'")]
	UnknownField { model: String, field: String },

	/// Record does not carry a value for the requested field
	#[error("Record has no value for field '{0}'")]
	MissingValue(String),

	/// Sheet or document title rejected by the output format
	#[error("Invalid title: {0}")]
	InvalidTitle(String),

	/// Value cannot be stored by the output format
	#[error("Unsupported value: {0}")]
	UnsupportedValue(String),

	/// Response header could not be built
	#[error("Invalid header value: {0}")]
	InvalidHeader(String),

	/// Output file could not be serialized
	#[error("Serialization error: {0}")]
	Serialization(String),

	/// Failure reported by the record source while iterating
	#[error("Record source error: {0}")]
	Source(#[from] anyhow::Error),

	/// I/O failure while writing the output
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
