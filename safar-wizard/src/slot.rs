use safar_core::pnr::sanitize_pnr;
use safar_shared::pii::{card_last4, Masked};
use serde::{Deserialize, Serialize};

/// One booking slot's form data. A wizard session holds one or more of
/// these; contact and payment fields are shared across slots by copying,
/// trip-specific fields are independent per slot.
///
/// The full card number is never stored: intake reduces it to the last four
/// digits immediately, and only method, holder, and last4 are persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingFormData {
    // Contact
    pub customer_name: String,
    pub customer_email: String,
    pub contact_number: String,
    pub passenger_count: String,

    // Payment metadata
    pub card_holder: String,
    pub payment_method: String,
    pub card_last4: Masked<String>,

    // Agent attribution (optional explicit selection)
    pub agent_id: String,

    // Flight leg
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_date: String,
    pub return_date: String,
    pub booking_date: String,
    pub flight_class: String,
    pub pnr: String,

    // Hotel stay
    pub hotel_name: String,
    pub hotel_city: String,
    pub check_in: String,
    pub check_out: String,
    pub room_type: String,

    // Visa
    pub visa_type: String,
    pub visa_number: String,
    pub visa_duration: String,

    // Transport leg
    pub transport_type: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub transport_date: String,

    // Costing
    pub package_name: String,
    pub package_price: String,
    pub total_amount: String,
}

impl BookingFormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a PNR, sanitized at input time (validation re-checks later).
    pub fn set_pnr(&mut self, raw: &str) {
        self.pnr = sanitize_pnr(raw);
    }

    /// Reduce a raw card number to its last four digits. The raw value is
    /// dropped on the spot.
    pub fn set_card_number(&mut self, raw: &str) {
        self.card_last4 = Masked(card_last4(raw));
    }

    /// A new slot for "add another booking": contact and payment fields are
    /// carried over from this slot, every trip-specific field starts blank.
    pub fn derived_copy(&self) -> Self {
        Self {
            customer_name: self.customer_name.clone(),
            customer_email: self.customer_email.clone(),
            contact_number: self.contact_number.clone(),
            passenger_count: self.passenger_count.clone(),
            card_holder: self.card_holder.clone(),
            payment_method: self.payment_method.clone(),
            card_last4: self.card_last4.clone(),
            agent_id: self.agent_id.clone(),
            ..Self::default()
        }
    }
}
