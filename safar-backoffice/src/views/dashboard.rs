use safar_client::{ApiClient, ClientResult};
use safar_core::booking::{ApprovalStatus, BookingStatus};
use safar_core::inquiry::InquiryStatus;
use safar_core::mapper::{map_booking, map_inquiry, UiBooking, UiInquiry};

/// Aggregates recomputed from the mapped lists on every load.
#[derive(Debug, Default, PartialEq)]
pub struct DashboardStats {
    pub total_bookings: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    pub awaiting_approval: usize,
    pub revenue: f64,
    pub total_inquiries: usize,
    pub open_inquiries: usize,
}

pub fn compute(bookings: &[UiBooking], inquiries: &[UiInquiry]) -> DashboardStats {
    let mut stats = DashboardStats {
        total_bookings: bookings.len(),
        total_inquiries: inquiries.len(),
        ..DashboardStats::default()
    };

    for booking in bookings {
        match booking.status {
            BookingStatus::Pending => stats.pending += 1,
            BookingStatus::Confirmed => stats.confirmed += 1,
            BookingStatus::Cancelled => stats.cancelled += 1,
        }
        if booking.approval_status == ApprovalStatus::Pending {
            stats.awaiting_approval += 1;
        }
        // cancelled bookings do not count toward revenue
        if booking.status != BookingStatus::Cancelled {
            stats.revenue += booking.amount;
        }
    }

    stats.open_inquiries = inquiries
        .iter()
        .filter(|inquiry| inquiry.status != InquiryStatus::Closed)
        .count();

    stats
}

pub fn render(stats: &DashboardStats) -> String {
    format!(
        "Bookings:   {} total ({} pending, {} confirmed, {} cancelled)\n\
         Approvals:  {} awaiting review\n\
         Revenue:    {:.2}\n\
         Inquiries:  {} total, {} open\n",
        stats.total_bookings,
        stats.pending,
        stats.confirmed,
        stats.cancelled,
        stats.awaiting_approval,
        stats.revenue,
        stats.total_inquiries,
        stats.open_inquiries,
    )
}

pub async fn show(api: &mut ApiClient) -> ClientResult<DashboardStats> {
    let bookings: Vec<UiBooking> = api
        .list_bookings(false)
        .await?
        .iter()
        .map(map_booking)
        .collect();
    let inquiries: Vec<UiInquiry> = api
        .list_inquiries()
        .await?
        .iter()
        .map(map_inquiry)
        .collect();
    Ok(compute(&bookings, &inquiries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn aggregates_statuses_and_revenue() {
        let bookings: Vec<UiBooking> = [
            json!({ "id": "1", "status": "confirmed", "totalAmount": 1000, "approvalStatus": "approved" }),
            json!({ "id": "2", "status": "pending", "totalAmount": 500 }),
            json!({ "id": "3", "status": "cancelled", "totalAmount": 800, "approvalStatus": "rejected" }),
        ]
        .iter()
        .map(map_booking)
        .collect();
        let inquiries: Vec<UiInquiry> = [
            json!({ "id": "q1", "status": "pending" }),
            json!({ "id": "q2", "status": "closed" }),
        ]
        .iter()
        .map(map_inquiry)
        .collect();

        let stats = compute(&bookings, &inquiries);
        assert_eq!(stats.total_bookings, 3);
        assert_eq!(stats.confirmed, 1);
        assert_eq!(stats.cancelled, 1);
        // booking 2 has no approvalStatus, so it is pending review
        assert_eq!(stats.awaiting_approval, 1);
        assert_eq!(stats.revenue, 1500.0);
        assert_eq!(stats.open_inquiries, 1);
    }

    #[test]
    fn empty_lists_render_cleanly() {
        let stats = compute(&[], &[]);
        let rendered = render(&stats);
        assert!(rendered.contains("0 total"));
    }
}
