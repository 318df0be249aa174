//! # reinhardt-admin-export-utils
//!
//! Small text helpers shared by the admin exporters.
//!
//! - [`asciify`]: fold accented characters to plain ASCII
//! - [`slugify`]: build filename-safe slugs from model names
//! - [`truncate_chars`]: cut a string on a character boundary
//!
//! ## Examples
//!
//! ```
//! use reinhardt_admin_export_utils::slugify;
//!
//! assert_eq!(slugify("Bücher & Zeitschriften"), "bucher-zeitschriften");
//! ```

pub mod text;

pub use text::{asciify, slugify, truncate_chars};
