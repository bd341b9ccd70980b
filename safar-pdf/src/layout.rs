//! Fixed-layout voucher rendering.
//!
//! Sections are painted top to bottom at absolute positions; a page break
//! is inserted whenever the remaining vertical space cannot fit the next
//! block. No reflow, no style system.

use crate::document::VoucherDoc;
use crate::PdfResult;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const MARGIN_RIGHT: f32 = 14.0;
const MARGIN_TOP: f32 = 16.0;
const MARGIN_BOTTOM: f32 = 16.0;

const LINE_HEIGHT: f32 = 5.5;
const SECTION_GAP: f32 = 4.0;
const VALUE_COLUMN: f32 = MARGIN_LEFT + 40.0;

struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
    y: f32,
}

impl<'a> PageCursor<'a> {
    /// Break to a fresh page when the next block will not fit.
    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < MARGIN_BOTTOM {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN_TOP;
        }
    }

    fn advance(&mut self, height: f32) {
        self.y -= height;
    }

    fn text(&self, x: f32, size: f32, bold: bool, content: &str) {
        if content.is_empty() {
            return;
        }
        let font = if bold { self.bold } else { self.regular };
        self.layer.use_text(content, size, Mm(x), Mm(self.y), font);
    }

    fn rule(&self) {
        self.layer.set_outline_color(Color::Rgb(Rgb::new(0.6, 0.6, 0.6, None)));
        self.layer.set_outline_thickness(0.3);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_LEFT), Mm(self.y)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN_RIGHT), Mm(self.y)), false),
            ],
            is_closed: false,
        });
    }

    fn section_header(&mut self, title: &str) {
        self.ensure_space(LINE_HEIGHT * 3.0);
        self.advance(SECTION_GAP);
        self.text(MARGIN_LEFT, 11.0, true, title);
        self.advance(1.5);
        self.rule();
        self.advance(LINE_HEIGHT);
    }

    fn key_value(&mut self, label: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.ensure_space(LINE_HEIGHT);
        self.text(MARGIN_LEFT, 9.0, false, label);
        self.text(VALUE_COLUMN, 9.0, false, value);
        self.advance(LINE_HEIGHT);
    }

    fn table<const N: usize>(
        &mut self,
        headers: [&str; N],
        offsets: [f32; N],
        rows: &[[String; N]],
    ) {
        self.ensure_space(LINE_HEIGHT * 2.0);
        for (header, offset) in headers.iter().zip(offsets) {
            self.text(MARGIN_LEFT + offset, 9.0, true, header);
        }
        self.advance(1.5);
        self.rule();
        self.advance(LINE_HEIGHT - 1.5);
        for row in rows {
            self.ensure_space(LINE_HEIGHT);
            for (cell, offset) in row.iter().zip(offsets) {
                self.text(MARGIN_LEFT + offset, 9.0, false, cell);
            }
            self.advance(LINE_HEIGHT);
        }
    }
}

fn amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Paint the voucher and hand back the finished PDF bytes.
pub fn render(doc: &VoucherDoc) -> PdfResult<Vec<u8>> {
    let title = if doc.reference.is_empty() {
        "Booking Voucher".to_string()
    } else {
        format!("Booking {}", doc.reference)
    };
    let (pdf, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = pdf.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = pdf.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut cursor = PageCursor {
        doc: &pdf,
        layer: pdf.get_page(page).get_layer(layer),
        regular: &regular,
        bold: &bold,
        y: PAGE_HEIGHT - MARGIN_TOP,
    };

    // Header
    cursor.text(MARGIN_LEFT, 16.0, true, "Safar Travels");
    cursor.advance(6.0);
    cursor.text(MARGIN_LEFT, 10.0, false, "Hajj & Umrah Booking Voucher");
    cursor.advance(3.0);
    cursor.rule();
    cursor.advance(LINE_HEIGHT);

    // Reference / status banner
    if !doc.reference.is_empty() {
        cursor.text(MARGIN_LEFT, 10.0, true, &format!("Reference: {}", doc.reference));
    }
    cursor.text(
        120.0,
        10.0,
        true,
        &format!("Status: {} / {}", doc.status, doc.approval_status),
    );
    cursor.advance(LINE_HEIGHT);

    // Profit summary
    cursor.section_header("Summary");
    cursor.key_value("Total Sale", &amount(doc.total_amount));
    cursor.key_value("Total Cost", &amount(doc.total_cost));
    cursor.ensure_space(LINE_HEIGHT);
    cursor.text(MARGIN_LEFT, 9.0, true, "Profit");
    cursor.text(VALUE_COLUMN, 9.0, true, &amount(doc.profit));
    cursor.advance(LINE_HEIGHT);

    // Traveler info
    cursor.section_header("Traveler");
    cursor.key_value("Name", &doc.customer);
    cursor.key_value("Email", &doc.email);
    cursor.key_value("Phone", &doc.phone);
    cursor.key_value("Passengers", &doc.passengers);
    cursor.key_value("Agent", &doc.agent);
    cursor.key_value("Package", &doc.package_name);

    // Dates
    cursor.section_header("Dates");
    cursor.key_value("Booking Date", &doc.booking_date);
    cursor.key_value("Departure", &doc.departure_date);
    cursor.key_value("Return", &doc.return_date);

    // Flight
    cursor.section_header("Flight");
    if !doc.departure_city.is_empty() || !doc.arrival_city.is_empty() {
        cursor.key_value(
            "Route",
            &format!("{} - {}", doc.departure_city, doc.arrival_city),
        );
    }
    cursor.key_value("Class", &doc.flight_class);
    cursor.key_value("PNR", &doc.pnr);

    // Hotel / visa / transport tables
    if !doc.hotel_rows.is_empty() {
        cursor.section_header("Hotel");
        cursor.table(
            ["Hotel", "City", "Check-in", "Check-out"],
            [0.0, 70.0, 110.0, 150.0],
            &doc.hotel_rows,
        );
    }
    if !doc.visa_rows.is_empty() {
        cursor.section_header("Visa");
        cursor.table(
            ["Type", "Number", "Duration"],
            [0.0, 70.0, 130.0],
            &doc.visa_rows,
        );
    }
    if !doc.transport_rows.is_empty() {
        cursor.section_header("Transport");
        cursor.table(
            ["Type", "Pickup", "Dropoff", "Date"],
            [0.0, 50.0, 100.0, 150.0],
            &doc.transport_rows,
        );
    }

    // Costing
    if !doc.cost_lines.is_empty() {
        cursor.section_header("Costing");
        let rows: Vec<[String; 3]> = doc
            .cost_lines
            .iter()
            .map(|line| [line.label.clone(), amount(line.cost), amount(line.sale)])
            .collect();
        cursor.table(["Item", "Cost", "Sale"], [0.0, 100.0, 140.0], &rows);
        cursor.ensure_space(LINE_HEIGHT);
        cursor.text(MARGIN_LEFT, 9.0, true, "Total");
        cursor.text(MARGIN_LEFT + 140.0, 9.0, true, &amount(doc.total_amount));
        cursor.advance(LINE_HEIGHT);
    }

    // Payment
    cursor.section_header("Payment");
    cursor.key_value("Method", &doc.payment_method);
    cursor.key_value("Cardholder", &doc.card_holder);
    if !doc.card_last4.is_empty() {
        cursor.key_value("Card", &format!("**** {}", doc.card_last4));
    }

    // Footer
    cursor.ensure_space(LINE_HEIGHT * 2.0);
    cursor.advance(SECTION_GAP);
    cursor.rule();
    cursor.advance(LINE_HEIGHT);
    let footer = if doc.created_at.is_empty() {
        "Generated by Safar Back-Office".to_string()
    } else {
        format!("Created {} - Generated by Safar Back-Office", doc.created_at)
    };
    cursor.text(MARGIN_LEFT, 8.0, false, &footer);

    tracing::debug!("Rendered voucher for '{}'", doc.reference);
    Ok(pdf.save_to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_a_populated_voucher() {
        let record = json!({
            "id": "b-42",
            "customerName": "Ahmed Ali",
            "customerEmail": "a@x.com",
            "status": "confirmed",
            "packageName": "Umrah Basic",
            "pricing": { "totalAmount": 1500, "lineItems": [
                { "label": "Flight", "cost": 600, "sale": 800 },
                { "label": "Hotel", "cost": 500, "sale": 700 },
            ]},
            "flight": { "departureCity": "Karachi", "arrivalCity": "Jeddah", "pnr": "ABC123" },
            "hotel": { "name": "Hilton Makkah", "city": "Makkah" },
        });
        let doc = VoucherDoc::normalize(&record);
        let bytes = render(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn renders_an_empty_record_without_panicking() {
        let doc = VoucherDoc::normalize(&json!({}));
        let bytes = render(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_tables_spill_onto_extra_pages() {
        let hotels: Vec<_> = (0..80)
            .map(|i| json!({ "name": format!("Hotel {}", i), "city": "Makkah" }))
            .collect();
        let doc = VoucherDoc::normalize(&json!({ "hotels": hotels, "totalAmount": 100 }));
        let bytes = render(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
