use crate::slot::BookingFormData;
use crate::{WizardError, WizardResult};
use chrono::Utc;
use safar_core::pnr::sanitize_pnr;
use safar_core::user::UserProfile;
use safar_shared::money::parse_amount;
use serde_json::{json, Value};

/// Build one create-booking request body from a slot and the authenticated
/// user. Pure: no I/O, no clock beyond the booking-date default.
///
/// The body carries the nested representation (`pricing`, `flight`,
/// `hotel`, `visa`, `transport`, `payment`) plus flattened legacy duplicates
/// for older consumers of the same API.
///
/// Errors when customer name, customer email, or package is blank — a final
/// defense even though step validation should have caught it.
pub fn build_booking_payload(slot: &BookingFormData, user: &UserProfile) -> WizardResult<Value> {
    if slot.customer_name.trim().is_empty() {
        return Err(WizardError::MissingField("Customer name"));
    }
    if slot.customer_email.trim().is_empty() {
        return Err(WizardError::MissingField("Customer email"));
    }
    if slot.package_name.trim().is_empty() {
        return Err(WizardError::MissingField("Package"));
    }

    let package_price = parse_amount(&slot.package_price);
    let total_amount = parse_amount(&slot.total_amount);
    let passenger_count = slot.passenger_count.trim().parse::<u32>().unwrap_or(1);

    // Booking date defaults to the departure date, else today.
    let booking_date = if !slot.booking_date.trim().is_empty() {
        slot.booking_date.trim().to_string()
    } else if !slot.departure_date.trim().is_empty() {
        slot.departure_date.trim().to_string()
    } else {
        Utc::now().format("%Y-%m-%d").to_string()
    };

    // Effective agent: explicit form selection, else the user's agent id,
    // else the user id.
    let agent_id = if !slot.agent_id.trim().is_empty() {
        slot.agent_id.trim().to_string()
    } else {
        user.effective_agent_id().to_string()
    };

    let pnr = sanitize_pnr(&slot.pnr);

    Ok(json!({
        "customerName": slot.customer_name.trim(),
        "customerEmail": slot.customer_email.trim(),
        "contactNumber": slot.contact_number.trim(),
        "passengerCount": passenger_count,
        "packageName": slot.package_name.trim(),
        "agentId": agent_id,
        "status": "pending",
        "approvalStatus": "pending",
        "pricing": {
            "packagePrice": package_price,
            "totalAmount": total_amount,
        },
        "flight": {
            "departureCity": slot.departure_city.trim(),
            "arrivalCity": slot.arrival_city.trim(),
            "departureDate": slot.departure_date.trim(),
            "returnDate": slot.return_date.trim(),
            "bookingDate": booking_date,
            "class": slot.flight_class.trim(),
            "pnr": pnr,
        },
        "hotel": {
            "name": slot.hotel_name.trim(),
            "city": slot.hotel_city.trim(),
            "checkIn": slot.check_in.trim(),
            "checkOut": slot.check_out.trim(),
            "roomType": slot.room_type.trim(),
        },
        "visa": {
            "type": slot.visa_type.trim(),
            "number": slot.visa_number.trim(),
            "duration": slot.visa_duration.trim(),
        },
        "transport": {
            "type": slot.transport_type.trim(),
            "pickup": slot.pickup_location.trim(),
            "dropoff": slot.dropoff_location.trim(),
            "date": slot.transport_date.trim(),
        },
        "payment": {
            "method": slot.payment_method.trim(),
            "cardHolder": slot.card_holder.trim(),
            "cardLast4": slot.card_last4.0.clone(),
        },
        // Legacy flat duplicates
        "customer": slot.customer_name.trim(),
        "email": slot.customer_email.trim(),
        "phone": slot.contact_number.trim(),
        "package": slot.package_name.trim(),
        "packagePrice": package_price,
        "totalAmount": total_amount,
        "departureCity": slot.departure_city.trim(),
        "arrivalCity": slot.arrival_city.trim(),
        "departureDate": slot.departure_date.trim(),
        "returnDate": slot.return_date.trim(),
        "bookingDate": booking_date,
        "pnr": pnr,
        "paymentMethod": slot.payment_method.trim(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserProfile {
        UserProfile {
            id: "u-1".into(),
            name: "Desk Admin".into(),
            email: "desk@safar.example".into(),
            role: "admin".into(),
            agent_id: None,
            company_id: Some("co-1".into()),
        }
    }

    fn complete_slot() -> BookingFormData {
        let mut slot = BookingFormData::new();
        slot.customer_name = "Ahmed Ali".into();
        slot.customer_email = "a@x.com".into();
        slot.contact_number = "0300".into();
        slot.passenger_count = "2".into();
        slot.payment_method = "card".into();
        slot.card_holder = "Ahmed Ali".into();
        slot.departure_city = "Karachi".into();
        slot.arrival_city = "Jeddah".into();
        slot.departure_date = "2024-03-01".into();
        slot.return_date = "2024-03-15".into();
        slot.set_pnr("abc123");
        slot.package_name = "Umrah Basic".into();
        slot.total_amount = "1500".into();
        slot
    }

    #[test]
    fn builds_nested_and_legacy_shapes() {
        let payload = build_booking_payload(&complete_slot(), &user()).unwrap();

        assert_eq!(payload["customerName"], "Ahmed Ali");
        assert_eq!(payload["pricing"]["totalAmount"], 1500.0);
        assert_eq!(payload["flight"]["pnr"], "ABC123");
        // flattened duplicates for legacy consumers
        assert_eq!(payload["customer"], "Ahmed Ali");
        assert_eq!(payload["totalAmount"], 1500.0);
        assert_eq!(payload["pnr"], "ABC123");
    }

    #[test]
    fn errors_on_missing_identity_fields_only() {
        let user = user();

        let mut slot = complete_slot();
        slot.customer_name.clear();
        assert!(matches!(
            build_booking_payload(&slot, &user),
            Err(WizardError::MissingField("Customer name"))
        ));

        let mut slot = complete_slot();
        slot.customer_email = "  ".into();
        assert!(matches!(
            build_booking_payload(&slot, &user),
            Err(WizardError::MissingField("Customer email"))
        ));

        let mut slot = complete_slot();
        slot.package_name.clear();
        assert!(matches!(
            build_booking_payload(&slot, &user),
            Err(WizardError::MissingField("Package"))
        ));

        // Everything else may be blank without an error.
        let mut slot = complete_slot();
        slot.departure_city.clear();
        slot.total_amount.clear();
        slot.pnr.clear();
        assert!(build_booking_payload(&slot, &user).is_ok());
    }

    #[test]
    fn coerces_currency_strings() {
        let mut slot = complete_slot();
        slot.total_amount = "$1,500.50".into();
        slot.package_price = "$1,200".into();
        let payload = build_booking_payload(&slot, &user()).unwrap();
        assert_eq!(payload["pricing"]["totalAmount"], 1500.5);
        assert_eq!(payload["pricing"]["packagePrice"], 1200.0);
    }

    #[test]
    fn booking_date_defaults_to_departure() {
        let mut slot = complete_slot();
        slot.booking_date.clear();
        let payload = build_booking_payload(&slot, &user()).unwrap();
        assert_eq!(payload["flight"]["bookingDate"], "2024-03-01");

        slot.departure_date.clear();
        let payload = build_booking_payload(&slot, &user()).unwrap();
        // falls back to today; just assert it is a date-shaped value
        let date = payload["flight"]["bookingDate"].as_str().unwrap();
        assert_eq!(date.len(), 10);
    }

    #[test]
    fn agent_resolution_order() {
        let mut slot = complete_slot();
        let mut user = user();

        // explicit selection wins
        slot.agent_id = "ag-selected".into();
        user.agent_id = Some("ag-own".into());
        let payload = build_booking_payload(&slot, &user).unwrap();
        assert_eq!(payload["agentId"], "ag-selected");

        // then the user's agent id
        slot.agent_id.clear();
        let payload = build_booking_payload(&slot, &user).unwrap();
        assert_eq!(payload["agentId"], "ag-own");

        // then the bare user id
        user.agent_id = None;
        let payload = build_booking_payload(&slot, &user).unwrap();
        assert_eq!(payload["agentId"], "u-1");
    }

    #[test]
    fn card_metadata_only_no_pan() {
        let mut slot = complete_slot();
        slot.set_card_number("4111-1111-1111-9876");
        let payload = build_booking_payload(&slot, &user()).unwrap();
        assert_eq!(payload["payment"]["cardLast4"], "9876");
        // the serialized body must not contain the full number anywhere
        let body = payload.to_string();
        assert!(!body.contains("4111"));
    }
}
