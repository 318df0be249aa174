//! Integration tests for the export action
//!
//! Tests the complete flow: settings → registry → admin site → action →
//! spreadsheet download read back from the archive

use chrono::NaiveDate;
use reinhardt_admin_export::prelude::*;
use reinhardt_admin_export::{AdminError, ExportError, RecordSet};
use reinhardt_admin_export::export::RecordIter;
use rstest::{fixture, rstest};
use std::cell::Cell;
use std::io::{Cursor, Read};

/// Typed model record with a choice field
struct Order {
	id: i64,
	customer: &'static str,
	status: &'static str,
	placed_on: NaiveDate,
	total: f64,
}

impl Order {
	fn status_display(&self) -> &'static str {
		match self.status {
			"n" => "New",
			"s" => "Shipped",
			_ => "Unknown",
		}
	}
}

impl Record for Order {
	fn value(&self, field: &str) -> ExportResult<Value> {
		Ok(match field {
			"id" => Value::Int(self.id),
			"customer" => Value::from(self.customer),
			"status" => Value::from(self.status),
			"placed_on" => Value::Date(self.placed_on),
			"total" => Value::Float(self.total),
			other => return Err(ExportError::MissingValue(other.to_string())),
		})
	}

	fn render(&self, field: &str) -> Option<String> {
		(field == "status").then(|| self.status_display().to_string())
	}
}

/// Record set that counts how often it is iterated
struct Orders {
	meta: ModelMeta,
	orders: Vec<Order>,
	passes: Cell<usize>,
	fail_at: Option<usize>,
}

impl RecordSet for Orders {
	fn meta(&self) -> &ModelMeta {
		&self.meta
	}

	fn iter(&self) -> RecordIter<'_> {
		self.passes.set(self.passes.get() + 1);
		let fail_at = self.fail_at;
		Box::new(self.orders.iter().enumerate().map(move |(index, order)| {
			if Some(index) == fail_at {
				return Err(ExportError::Source(anyhow::anyhow!("cursor closed")));
			}
			Ok(Box::new(order) as Box<dyn Record + '_>)
		}))
	}
}

fn order_meta() -> ModelMeta {
	ModelMeta::new("CustomerOrder")
		.with_field("id")
		.field(FieldMeta::new("customer").with_verbose_name("Customer"))
		.with_field("status")
		.with_field("placed_on")
		.with_field("total")
}

#[fixture]
fn orders() -> Orders {
	let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
	Orders {
		meta: order_meta(),
		orders: vec![
			Order {
				id: 1,
				customer: "Zoë",
				status: "n",
				placed_on: day(1),
				total: 12.5,
			},
			Order {
				id: 2,
				customer: "Bob & Sons",
				status: "s",
				placed_on: day(2),
				total: 99.0,
			},
		],
		passes: Cell::new(0),
		fail_at: None,
	}
}

#[fixture]
fn site() -> AdminSite {
	let site = AdminSite::new("admin");
	let settings = ExportSettings::from_toml_str(
		r#"admin_exporters = ["reinhardt_admin_export::XlsxExporter"]"#,
	)
	.unwrap();
	auto_register_exporters(&site, &ExporterRegistry::with_defaults(), &settings).unwrap();
	site
}

fn request() -> http::request::Parts {
	http::Request::builder()
		.method("POST")
		.uri("/admin/shop/customerorder/")
		.body(())
		.unwrap()
		.into_parts()
		.0
}

fn read_part(body: &[u8], name: &str) -> String {
	let mut archive = zip::ZipArchive::new(Cursor::new(body.to_vec())).unwrap();
	let mut part = archive.by_name(name).unwrap();
	let mut xml = String::new();
	part.read_to_string(&mut xml).unwrap();
	xml
}

/// Test: Registered action produces a spreadsheet download
#[rstest]
fn test_export_action_produces_spreadsheet(site: AdminSite, orders: Orders) {
	// Arrange
	let admin = ModelAdminConfig::new("CustomerOrder");

	// Act
	let response = site
		.execute_action("xlsxexporter", &admin, &request(), &orders)
		.unwrap();

	// Assert
	assert_eq!(
		response.content_type(),
		Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
	);
	let sheet = read_part(response.body(), "xl/worksheets/sheet1.xml");
	assert!(sheet.contains(r#"<dimension ref="A1:E3"/>"#));
	assert!(sheet.contains("<t>Customer</t>"));
	assert!(sheet.contains("<t>placed on</t>"));
	assert!(sheet.contains("<t>Zoë</t>"));
	assert!(sheet.contains("<t>Bob &amp; Sons</t>"));
	assert!(sheet.contains("<t>Shipped</t>"));
	assert!(!sheet.contains("<t>s</t>"));
	assert!(sheet.contains(r#"<c r="E2"><v>12.5</v></c>"#));
	assert!(sheet.contains(r#"<autoFilter ref="A1:E3"/>"#));

	let workbook = read_part(response.body(), "xl/workbook.xml");
	assert!(workbook.contains(r#"name="customer order""#));

	assert_eq!(orders.passes.get(), 1);
}

/// Test: Filename follows `<slug>_<date>.xlsx`
#[rstest]
fn test_filename_is_slug_date_extension(site: AdminSite, orders: Orders) {
	// Act
	let response = site
		.execute_action("xlsxexporter", &ModelAdminConfig::new("CustomerOrder"), &request(), &orders)
		.unwrap();

	// Assert
	let disposition = response.content_disposition().unwrap();
	assert!(disposition.starts_with("attachment; filename=\""));
	let filename = response.filename().unwrap();
	let stem = filename.strip_suffix(".xlsx").unwrap();
	let (slug, date) = stem.split_once('_').unwrap();
	assert_eq!(slug, "customer-orders");
	assert!(NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
}

/// Test: Model admin column configuration reaches the exporter
#[rstest]
fn test_model_admin_columns_are_applied(site: AdminSite, orders: Orders) {
	// Arrange
	let admin = ModelAdminConfig::builder()
		.model_name("CustomerOrder")
		.export_columns(vec!["total", "customer", "id"])
		.export_exclude_columns(vec!["id"])
		.build()
		.unwrap();

	// Act
	let response = site
		.execute_action("xlsxexporter", &admin, &request(), &orders)
		.unwrap();

	// Assert
	let sheet = read_part(response.body(), "xl/worksheets/sheet1.xml");
	assert!(sheet.contains(r#"<dimension ref="A1:B3"/>"#));
	assert!(sheet.contains(r#"<c r="A1" t="inlineStr"><is><t>total</t></is></c>"#));
	assert!(sheet.contains(r#"<c r="B1" t="inlineStr"><is><t>Customer</t></is></c>"#));
}

/// Test: Failure of the record source aborts the export
#[rstest]
fn test_record_source_error_is_propagated(site: AdminSite, mut orders: Orders) {
	// Arrange
	orders.fail_at = Some(1);

	// Act
	let result = site.execute_action(
		"xlsxexporter",
		&ModelAdminConfig::new("CustomerOrder"),
		&request(),
		&orders,
	);

	// Assert
	assert!(matches!(
		result,
		Err(AdminError::Export(ExportError::Source(_)))
	));
}

/// Test: Unknown action name is rejected by the site
#[rstest]
fn test_unknown_action(site: AdminSite, orders: Orders) {
	let result = site.execute_action(
		"csv",
		&ModelAdminConfig::new("CustomerOrder"),
		&request(),
		&orders,
	);
	assert!(matches!(result, Err(AdminError::InvalidAction(_))));
}

/// Test: Response converts into an `http::Response`
#[rstest]
fn test_into_http_response(site: AdminSite, orders: Orders) {
	// Act
	let response = site
		.execute_action("xlsxexporter", &ModelAdminConfig::new("CustomerOrder"), &request(), &orders)
		.unwrap()
		.into_http();

	// Assert
	assert_eq!(response.status(), http::StatusCode::OK);
	assert!(response.headers().contains_key(http::header::CONTENT_DISPOSITION));
	assert!(response.body().starts_with(b"PK"));
}
