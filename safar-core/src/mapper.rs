//! Dual-shape backend payload resolution.
//!
//! The booking API has grown two generations of payload shapes: a legacy
//! flat one (`customer`, `email`, `totalAmount`) and a newer nested one
//! (`customer.name`, `pricing.totalAmount`). Every field a view-model needs
//! is resolved through one explicit, ordered fallback list instead of
//! scattered optional chains. Mapping is total: absent or malformed values
//! degrade to empty strings, zero, or `pending`.

use crate::booking::{ApprovalStatus, BookingStatus};
use crate::inquiry::{InquiryStatus, ResponseEntry};
use chrono::{DateTime, Utc};
use serde_json::Value;

// ============================================================================
// Resolution primitives
// ============================================================================

/// Walk `path` through nested objects and return the string at the leaf.
pub fn str_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    current.as_str().filter(|s| !s.trim().is_empty())
}

/// Walk `path` and return the number at the leaf. Numeric strings count;
/// currency sigils and grouping commas are tolerated. A present but
/// unparseable value does not stop the fallback chain.
pub fn num_path(value: &Value, path: &[&str]) -> Option<f64> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    match current {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
            cleaned.trim().parse::<f64>().ok()
        }
        _ => None,
    }
}

/// First path that yields a non-empty string, else empty.
pub fn resolve_str(value: &Value, paths: &[&[&str]]) -> String {
    paths
        .iter()
        .find_map(|path| str_path(value, path))
        .unwrap_or_default()
        .to_string()
}

/// First path that yields a number, else zero.
pub fn resolve_num(value: &Value, paths: &[&[&str]]) -> f64 {
    paths
        .iter()
        .find_map(|path| num_path(value, path))
        .unwrap_or(0.0)
}

/// List endpoints answer either a bare array or an object wrapping one
/// under a collection key. Absent both, the list is empty.
pub fn extract_list(value: &Value, keys: &[&str]) -> Vec<Value> {
    if let Some(items) = value.as_array() {
        return items.clone();
    }
    for key in keys {
        if let Some(items) = value.get(key).and_then(Value::as_array) {
            return items.clone();
        }
    }
    Vec::new()
}

// ============================================================================
// Booking view-model
// ============================================================================

/// Derived per fetch, never the source of truth.
#[derive(Debug, Clone, PartialEq)]
pub struct UiBooking {
    pub id: String,
    pub customer: String,
    pub email: String,
    pub phone: String,
    pub package_name: String,
    pub amount: f64,
    pub status: BookingStatus,
    pub approval_status: ApprovalStatus,
    pub agent: String,
    pub pnr: String,
    pub created_at: String,
}

pub fn map_booking(record: &Value) -> UiBooking {
    UiBooking {
        // id → _id → bookingId
        id: resolve_str(record, &[&["id"], &["_id"], &["bookingId"]]),
        // customerName → customer.name → customer → name
        customer: resolve_str(
            record,
            &[&["customerName"], &["customer", "name"], &["customer"], &["name"]],
        ),
        // customerEmail → customer.email → email
        email: resolve_str(
            record,
            &[&["customerEmail"], &["customer", "email"], &["email"]],
        ),
        // contactNumber → customer.phone → phone
        phone: resolve_str(
            record,
            &[&["contactNumber"], &["customer", "phone"], &["phone"]],
        ),
        // packageName → package.name → package
        package_name: resolve_str(
            record,
            &[&["packageName"], &["package", "name"], &["package"]],
        ),
        // amount → pricing.totalAmount → totalAmount → 0
        amount: resolve_num(
            record,
            &[&["amount"], &["pricing", "totalAmount"], &["totalAmount"]],
        ),
        status: BookingStatus::parse_lossy(&resolve_str(record, &[&["status"]])),
        // approvalStatus → approval.status
        approval_status: ApprovalStatus::parse_lossy(&resolve_str(
            record,
            &[&["approvalStatus"], &["approval", "status"]],
        )),
        // agentName → agent.name → agentId → agent
        agent: resolve_str(
            record,
            &[&["agentName"], &["agent", "name"], &["agentId"], &["agent"]],
        ),
        // flight.pnr → pnr
        pnr: resolve_str(record, &[&["flight", "pnr"], &["pnr"]]),
        created_at: resolve_str(record, &[&["createdAt"], &["created_at"]]),
    }
}

// ============================================================================
// Inquiry view-model
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct UiInquiry {
    pub id: String,
    pub customer: String,
    pub email: String,
    pub status: InquiryStatus,
    pub priority: String,
    pub assigned_agent: String,
    pub package_interest: String,
    pub responses: Vec<ResponseEntry>,
    pub created_at: String,
}

pub fn map_inquiry(record: &Value) -> UiInquiry {
    let responses = record
        .get("responses")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| ResponseEntry {
                    message: resolve_str(entry, &[&["message"], &["text"]]),
                    responded_at: DateTime::parse_from_rfc3339(&resolve_str(
                        entry,
                        &[&["respondedAt"], &["timestamp"], &["createdAt"]],
                    ))
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc)),
                })
                .collect()
        })
        .unwrap_or_default();

    UiInquiry {
        id: resolve_str(record, &[&["id"], &["_id"]]),
        customer: resolve_str(
            record,
            &[&["customerName"], &["customer", "name"], &["customer"], &["name"]],
        ),
        email: resolve_str(
            record,
            &[&["customerEmail"], &["customer", "email"], &["email"]],
        ),
        status: InquiryStatus::parse_lossy(&resolve_str(record, &[&["status"]])),
        // priority defaults to normal, not pending
        priority: {
            let p = resolve_str(record, &[&["priority"]]);
            if p.is_empty() { "normal".to_string() } else { p.to_lowercase() }
        },
        // assignedAgent.name → assignedAgent → assignedTo
        assigned_agent: resolve_str(
            record,
            &[&["assignedAgent", "name"], &["assignedAgent"], &["assignedTo"]],
        ),
        // packageInterest.name → packageInterest → subject
        package_interest: resolve_str(
            record,
            &[&["packageInterest", "name"], &["packageInterest"], &["subject"]],
        ),
        responses,
        created_at: resolve_str(record, &[&["createdAt"], &["created_at"]]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_and_nested_shapes_map_identically() {
        let legacy = json!({
            "id": "b1",
            "customer": "Ahmed Ali",
            "email": "a@x.com",
            "totalAmount": 1500,
            "status": "confirmed",
        });
        let nested = json!({
            "id": "b1",
            "customer": { "name": "Ahmed Ali", "email": "a@x.com" },
            "pricing": { "totalAmount": 1500 },
            "status": "confirmed",
        });

        let from_legacy = map_booking(&legacy);
        let from_nested = map_booking(&nested);
        assert_eq!(from_legacy.customer, "Ahmed Ali");
        assert_eq!(from_legacy.customer, from_nested.customer);
        assert_eq!(from_legacy.email, from_nested.email);
        assert_eq!(from_legacy.amount, from_nested.amount);
        assert_eq!(from_legacy.amount, 1500.0);
    }

    #[test]
    fn explicit_amount_wins_over_nested_total() {
        let record = json!({
            "amount": 900,
            "pricing": { "totalAmount": 1500 },
            "totalAmount": 2000,
        });
        assert_eq!(map_booking(&record).amount, 900.0);
    }

    #[test]
    fn numeric_strings_and_garbage() {
        let record = json!({ "amount": "not-a-number", "totalAmount": "$1,500" });
        // malformed head of the chain falls through to the legacy field
        assert_eq!(map_booking(&record).amount, 1500.0);
    }

    #[test]
    fn empty_record_degrades_to_defaults() {
        let mapped = map_booking(&json!({}));
        assert_eq!(mapped.customer, "");
        assert_eq!(mapped.amount, 0.0);
        assert_eq!(mapped.status, BookingStatus::Pending);
        assert_eq!(mapped.approval_status, ApprovalStatus::Pending);
    }

    #[test]
    fn inquiry_responses_and_priority() {
        let record = json!({
            "_id": "q1",
            "customerName": "Fatima",
            "status": "responded",
            "responses": [
                { "message": "We called back", "respondedAt": "2024-01-02T10:00:00Z" }
            ],
        });
        let mapped = map_inquiry(&record);
        assert_eq!(mapped.id, "q1");
        assert_eq!(mapped.status, InquiryStatus::Responded);
        assert_eq!(mapped.priority, "normal");
        assert_eq!(mapped.responses.len(), 1);
        assert_eq!(mapped.responses[0].message, "We called back");
        assert!(mapped.responses[0].responded_at.is_some());
    }

    #[test]
    fn list_extraction_handles_both_wrappings() {
        let bare = json!([{ "id": "a" }]);
        let wrapped = json!({ "bookings": [{ "id": "a" }, { "id": "b" }] });
        assert_eq!(extract_list(&bare, &["bookings"]).len(), 1);
        assert_eq!(extract_list(&wrapped, &["bookings", "data"]).len(), 2);
        assert!(extract_list(&json!({}), &["bookings"]).is_empty());
    }
}
