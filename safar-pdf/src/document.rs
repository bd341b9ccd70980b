//! Flat document model for the booking voucher.
//!
//! The exporter accepts the same heterogeneous record shapes the list views
//! do, so normalization runs through the identical ordered-fallback
//! resolution as the domain mapper before any drawing happens.

use safar_core::booking::{ApprovalStatus, BookingStatus};
use safar_core::mapper::{resolve_num, resolve_str};
use safar_shared::money::profit;
use serde_json::Value;

/// One costing line: what the agency pays vs. what the customer pays.
#[derive(Debug, Clone, PartialEq)]
pub struct CostLine {
    pub label: String,
    pub cost: f64,
    pub sale: f64,
}

/// Everything the voucher renders, resolved to plain values.
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherDoc {
    pub reference: String,
    pub status: BookingStatus,
    pub approval_status: ApprovalStatus,

    pub customer: String,
    pub email: String,
    pub phone: String,
    pub passengers: String,
    pub agent: String,
    pub package_name: String,

    pub booking_date: String,
    pub departure_date: String,
    pub return_date: String,
    pub created_at: String,

    pub departure_city: String,
    pub arrival_city: String,
    pub flight_class: String,
    pub pnr: String,

    /// name, city, check-in, check-out
    pub hotel_rows: Vec<[String; 4]>,
    /// type, number, duration
    pub visa_rows: Vec<[String; 3]>,
    /// type, pickup, dropoff, date
    pub transport_rows: Vec<[String; 4]>,

    pub cost_lines: Vec<CostLine>,
    pub package_price: f64,
    pub total_amount: f64,
    pub total_cost: f64,
    pub profit: f64,

    pub payment_method: String,
    pub card_holder: String,
    pub card_last4: String,
}

impl VoucherDoc {
    /// Normalize a booking record into the flat document model. Total:
    /// missing sections render as empty tables, never as an error.
    pub fn normalize(record: &Value) -> Self {
        let total_amount = resolve_num(
            record,
            &[&["amount"], &["pricing", "totalAmount"], &["totalAmount"]],
        );
        let package_price = resolve_num(
            record,
            &[&["pricing", "packagePrice"], &["packagePrice"], &["price"]],
        );
        let cost_lines = cost_lines(record, total_amount, package_price);
        let total_cost: f64 = cost_lines.iter().map(|l| l.cost).sum();
        let total_sale: f64 = cost_lines.iter().map(|l| l.sale).sum();

        VoucherDoc {
            reference: resolve_str(
                record,
                &[&["reference"], &["bookingRef"], &["id"], &["_id"]],
            ),
            status: BookingStatus::parse_lossy(&resolve_str(record, &[&["status"]])),
            approval_status: ApprovalStatus::parse_lossy(&resolve_str(
                record,
                &[&["approvalStatus"], &["approval", "status"]],
            )),
            customer: resolve_str(
                record,
                &[&["customerName"], &["customer", "name"], &["customer"], &["name"]],
            ),
            email: resolve_str(
                record,
                &[&["customerEmail"], &["customer", "email"], &["email"]],
            ),
            phone: resolve_str(
                record,
                &[&["contactNumber"], &["customer", "phone"], &["phone"]],
            ),
            passengers: resolve_str(
                record,
                &[&["passengerCount"], &["passengers"], &["pax"]],
            ),
            agent: resolve_str(
                record,
                &[&["agentName"], &["agent", "name"], &["agentId"], &["agent"]],
            ),
            package_name: resolve_str(
                record,
                &[&["packageName"], &["package", "name"], &["package"]],
            ),
            booking_date: resolve_str(
                record,
                &[&["flight", "bookingDate"], &["bookingDate"]],
            ),
            departure_date: resolve_str(
                record,
                &[&["flight", "departureDate"], &["departureDate"]],
            ),
            return_date: resolve_str(record, &[&["flight", "returnDate"], &["returnDate"]]),
            created_at: resolve_str(record, &[&["createdAt"], &["created_at"]]),
            departure_city: resolve_str(
                record,
                &[&["flight", "departureCity"], &["departureCity"]],
            ),
            arrival_city: resolve_str(record, &[&["flight", "arrivalCity"], &["arrivalCity"]]),
            flight_class: resolve_str(record, &[&["flight", "class"], &["flightClass"]]),
            pnr: resolve_str(record, &[&["flight", "pnr"], &["pnr"]]),
            hotel_rows: hotel_rows(record),
            visa_rows: visa_rows(record),
            transport_rows: transport_rows(record),
            cost_lines,
            package_price,
            total_amount,
            total_cost,
            profit: profit(total_sale, total_cost),
            payment_method: resolve_str(
                record,
                &[&["payment", "method"], &["paymentMethod"]],
            ),
            card_holder: resolve_str(record, &[&["payment", "cardHolder"], &["cardHolder"]]),
            card_last4: resolve_str(record, &[&["payment", "cardLast4"], &["cardLast4"]]),
        }
    }
}

/// Sub-records arrive as an array (`hotels`), a single nested object
/// (`hotel`), or legacy flat fields; the first shape that yields data wins.
fn section_nodes<'a>(record: &'a Value, plural: &str, singular: &str) -> Vec<&'a Value> {
    if let Some(items) = record.get(plural).and_then(Value::as_array) {
        return items.iter().collect();
    }
    match record.get(singular) {
        Some(node) if node.is_object() => vec![node],
        _ => Vec::new(),
    }
}

fn hotel_rows(record: &Value) -> Vec<[String; 4]> {
    let rows: Vec<[String; 4]> = section_nodes(record, "hotels", "hotel")
        .into_iter()
        .map(|node| {
            [
                resolve_str(node, &[&["name"], &["hotelName"]]),
                resolve_str(node, &[&["city"], &["hotelCity"]]),
                resolve_str(node, &[&["checkIn"]]),
                resolve_str(node, &[&["checkOut"]]),
            ]
        })
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();
    if !rows.is_empty() {
        return rows;
    }
    // legacy flat fields at the record root
    let flat = [
        resolve_str(record, &[&["hotelName"]]),
        resolve_str(record, &[&["hotelCity"]]),
        resolve_str(record, &[&["checkIn"]]),
        resolve_str(record, &[&["checkOut"]]),
    ];
    if flat.iter().any(|cell| !cell.is_empty()) {
        vec![flat]
    } else {
        Vec::new()
    }
}

fn visa_rows(record: &Value) -> Vec<[String; 3]> {
    section_nodes(record, "visas", "visa")
        .into_iter()
        .map(|node| {
            [
                resolve_str(node, &[&["type"], &["visaType"]]),
                resolve_str(node, &[&["number"], &["visaNumber"]]),
                resolve_str(node, &[&["duration"]]),
            ]
        })
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect()
}

fn transport_rows(record: &Value) -> Vec<[String; 4]> {
    section_nodes(record, "transports", "transport")
        .into_iter()
        .map(|node| {
            [
                resolve_str(node, &[&["type"], &["transportType"]]),
                resolve_str(node, &[&["pickup"], &["pickupLocation"]]),
                resolve_str(node, &[&["dropoff"], &["dropoffLocation"]]),
                resolve_str(node, &[&["date"]]),
            ]
        })
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect()
}

fn cost_lines(record: &Value, total_amount: f64, package_price: f64) -> Vec<CostLine> {
    let items = record
        .get("pricing")
        .and_then(|p| p.get("lineItems"))
        .or_else(|| record.get("costing"))
        .and_then(Value::as_array);

    if let Some(items) = items {
        let lines: Vec<CostLine> = items
            .iter()
            .map(|item| CostLine {
                label: resolve_str(item, &[&["label"], &["item"], &["name"]]),
                cost: resolve_num(item, &[&["cost"], &["costPrice"]]),
                sale: resolve_num(item, &[&["sale"], &["salePrice"], &["price"]]),
            })
            .filter(|line| !line.label.is_empty() || line.cost != 0.0 || line.sale != 0.0)
            .collect();
        if !lines.is_empty() {
            return lines;
        }
    }

    // No breakdown on the record: synthesize a single package line so the
    // costing table still carries the totals.
    let package_cost = resolve_num(record, &[&["pricing", "costPrice"], &["costPrice"]]);
    if package_price <= 0.0 && total_amount <= 0.0 && package_cost <= 0.0 {
        return Vec::new();
    }
    vec![CostLine {
        label: "Package".to_string(),
        cost: package_cost,
        sale: if total_amount > 0.0 { total_amount } else { package_price },
    }]
}
