//! File download responses

use crate::error::{ExportError, ExportResult};
use bytes::{Bytes, BytesMut};
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderName};
use http::{HeaderMap, HeaderValue, StatusCode};
use std::io;

/// HTTP response carrying an exported file
///
/// The body is writable through [`std::io::Write`], so exporters fill it the
/// same way they would fill any open file.
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_core::ExportResponse;
/// use std::io::Write;
///
/// let mut response = ExportResponse::ok()
///     .with_content_type("text/plain")
///     .unwrap()
///     .with_attachment("notes_2024-01-01.txt")
///     .unwrap();
/// response.write_all(b"hello").unwrap();
///
/// assert_eq!(response.content_type(), Some("text/plain"));
/// assert_eq!(response.filename(), Some("notes_2024-01-01.txt"));
/// assert_eq!(response.body(), b"hello");
/// ```
#[derive(Debug, Clone)]
pub struct ExportResponse {
	pub status: StatusCode,
	pub headers: HeaderMap,
	body: BytesMut,
}

impl ExportResponse {
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: BytesMut::new(),
		}
	}

	/// Create a response with HTTP 200 OK status
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// Set a header, replacing any previous value
	pub fn with_header(mut self, name: HeaderName, value: &str) -> ExportResult<Self> {
		let value = HeaderValue::from_str(value)
			.map_err(|e| ExportError::InvalidHeader(format!("{}: {}", name, e)))?;
		self.headers.insert(name, value);
		Ok(self)
	}

	pub fn with_content_type(self, content_type: &str) -> ExportResult<Self> {
		self.with_header(CONTENT_TYPE, content_type)
	}

	/// Mark the response as a download named `filename`
	pub fn with_attachment(self, filename: &str) -> ExportResult<Self> {
		self.with_header(CONTENT_DISPOSITION, &attachment_disposition(filename))
	}

	fn header_str(&self, name: &HeaderName) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}

	pub fn content_type(&self) -> Option<&str> {
		self.header_str(&CONTENT_TYPE)
	}

	pub fn content_disposition(&self) -> Option<&str> {
		self.header_str(&CONTENT_DISPOSITION)
	}

	/// Filename announced in the `Content-Disposition` header
	pub fn filename(&self) -> Option<&str> {
		let disposition = self.content_disposition()?;
		let raw = disposition
			.split(';')
			.map(str::trim)
			.find_map(|part| part.strip_prefix("filename="))?;
		Some(raw.trim_matches('"'))
	}

	pub fn body(&self) -> &[u8] {
		&self.body
	}

	pub fn into_body(self) -> Bytes {
		self.body.freeze()
	}

	/// Convert into an [`http::Response`] for the host server
	pub fn into_http(self) -> http::Response<Bytes> {
		let mut response = http::Response::new(self.body.freeze());
		*response.status_mut() = self.status;
		*response.headers_mut() = self.headers;
		response
	}
}

impl io::Write for ExportResponse {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.body.extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// Build a `Content-Disposition` value for a download
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_core::response::attachment_disposition;
///
/// assert_eq!(
///     attachment_disposition("widgets_2024-01-01.xlsx"),
///     "attachment; filename=\"widgets_2024-01-01.xlsx\""
/// );
/// ```
pub fn attachment_disposition(filename: &str) -> String {
	format!("attachment; filename=\"{}\"", filename.replace('"', ""))
}
