use crate::slot::BookingFormData;
use crate::steps::WizardStep;
use safar_core::pnr::{is_valid_pnr, sanitize_pnr};
use std::collections::BTreeMap;

/// Field-keyed validation errors for one step. Keys are form field ids,
/// values are user-facing messages.
pub type FieldErrors = BTreeMap<&'static str, String>;

fn require(errors: &mut FieldErrors, key: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.insert(key, format!("{} is required", label));
    }
}

/// Step-local validation against one slot's data. An empty map means the
/// step passes.
pub fn validate_step(step: WizardStep, data: &BookingFormData) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match step {
        WizardStep::Contact => {
            require(&mut errors, "customerName", &data.customer_name, "Customer name");
            require(&mut errors, "customerEmail", &data.customer_email, "Email");
            require(&mut errors, "contactNumber", &data.contact_number, "Contact number");
            require(&mut errors, "passengerCount", &data.passenger_count, "Passenger count");
        }
        WizardStep::Credit => {
            // Only the holder is required; PAN/CVV are never collected here.
            require(&mut errors, "cardHolder", &data.card_holder, "Cardholder name");
        }
        WizardStep::Flights => {
            require(&mut errors, "departureCity", &data.departure_city, "Departure city");
            require(&mut errors, "arrivalCity", &data.arrival_city, "Arrival city");
            require(&mut errors, "departureDate", &data.departure_date, "Departure date");
            require(&mut errors, "returnDate", &data.return_date, "Return date");
            require(&mut errors, "bookingDate", &data.booking_date, "Booking date");
            let cleaned = sanitize_pnr(&data.pnr);
            if cleaned.is_empty() {
                errors.insert("pnr", "PNR is required".to_string());
            } else if !is_valid_pnr(&cleaned) {
                errors.insert("pnr", "PNR must be exactly 6 letters or digits".to_string());
            }
        }
        WizardStep::Costing => {
            require(&mut errors, "totalAmount", &data.total_amount, "Total amount");
            require(&mut errors, "packageName", &data.package_name, "Package");
        }
        // Optional enrichment steps carry no required fields.
        WizardStep::Hotels | WizardStep::Visa | WizardStep::Transport => {}
    }

    errors
}

/// Submit-time validation: the two steps carrying cross-cutting required
/// fields, checked together against one slot.
pub fn validate_submit(data: &BookingFormData) -> FieldErrors {
    let mut errors = validate_step(WizardStep::Flights, data);
    errors.extend(validate_step(WizardStep::Costing, data));
    errors
}

/// The step a failing field belongs to, used to jump the wizard somewhere
/// useful for the offending fields.
pub fn step_for_field(field: &str) -> WizardStep {
    match field {
        "customerName" | "customerEmail" | "contactNumber" | "passengerCount" => {
            WizardStep::Contact
        }
        "cardHolder" => WizardStep::Credit,
        "departureCity" | "arrivalCity" | "departureDate" | "returnDate" | "bookingDate"
        | "pnr" => WizardStep::Flights,
        "totalAmount" | "packageName" => WizardStep::Costing,
        _ => WizardStep::Contact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_flights_slot() -> BookingFormData {
        let mut slot = BookingFormData::new();
        slot.departure_city = "Lahore".into();
        slot.arrival_city = "Madinah".into();
        slot.departure_date = "2024-04-01".into();
        slot.return_date = "2024-04-20".into();
        slot.booking_date = "2024-03-15".into();
        slot.pnr = "ABC123".into();
        slot
    }

    #[test]
    fn contact_requires_all_four_fields() {
        let mut slot = BookingFormData::new();
        let errors = validate_step(WizardStep::Contact, &slot);
        assert_eq!(errors.len(), 4);

        slot.customer_name = "Ahmed".into();
        slot.customer_email = "a@x.com".into();
        slot.contact_number = "0300".into();
        slot.passenger_count = "1".into();
        assert!(validate_step(WizardStep::Contact, &slot).is_empty());
    }

    #[test]
    fn credit_requires_only_the_holder() {
        let mut slot = BookingFormData::new();
        assert_eq!(validate_step(WizardStep::Credit, &slot).len(), 1);
        slot.card_holder = "Ahmed".into();
        assert!(validate_step(WizardStep::Credit, &slot).is_empty());
    }

    #[test]
    fn flights_gate_passes_iff_complete() {
        let slot = valid_flights_slot();
        assert!(validate_step(WizardStep::Flights, &slot).is_empty());

        let mut missing_date = slot.clone();
        missing_date.booking_date.clear();
        assert!(validate_step(WizardStep::Flights, &missing_date).contains_key("bookingDate"));
    }

    #[test]
    fn short_pnr_fails_validation() {
        let mut slot = valid_flights_slot();
        slot.pnr = "AB12D".into();
        let errors = validate_step(WizardStep::Flights, &slot);
        assert_eq!(errors.len(), 1);
        assert!(errors["pnr"].contains("6"));
    }

    #[test]
    fn unsanitized_but_recoverable_pnr_passes() {
        // Validation sanitizes redundantly, so raw input that cleans up to
        // 6 characters is accepted.
        let mut slot = valid_flights_slot();
        slot.pnr = "ab c1-23".into();
        assert!(validate_step(WizardStep::Flights, &slot).is_empty());
    }

    #[test]
    fn optional_steps_never_block() {
        let slot = BookingFormData::new();
        assert!(validate_step(WizardStep::Hotels, &slot).is_empty());
        assert!(validate_step(WizardStep::Visa, &slot).is_empty());
        assert!(validate_step(WizardStep::Transport, &slot).is_empty());
    }

    #[test]
    fn submit_checks_flights_and_costing_together() {
        let mut slot = valid_flights_slot();
        let errors = validate_submit(&slot);
        assert!(errors.contains_key("totalAmount"));
        assert!(errors.contains_key("packageName"));

        slot.total_amount = "1500".into();
        slot.package_name = "Umrah Basic".into();
        assert!(validate_submit(&slot).is_empty());
    }

    #[test]
    fn fields_map_back_to_their_steps() {
        assert_eq!(step_for_field("pnr"), WizardStep::Flights);
        assert_eq!(step_for_field("totalAmount"), WizardStep::Costing);
        assert_eq!(step_for_field("cardHolder"), WizardStep::Credit);
    }
}
