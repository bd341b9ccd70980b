use crate::error::ClientResult;
use crate::http::ApiClient;
use async_trait::async_trait;
use reqwest::Method;
use safar_core::booking::{ApprovalStatus, BookingStatus};
use safar_core::mapper::extract_list;
use serde_json::{json, Value};

/// The one call the wizard submit loop needs, behind a trait so the loop
/// can be exercised without a network.
#[async_trait]
pub trait CreateBooking {
    async fn create_booking(&mut self, payload: &Value) -> ClientResult<Value>;
}

#[async_trait]
impl CreateBooking for ApiClient {
    async fn create_booking(&mut self, payload: &Value) -> ClientResult<Value> {
        ApiClient::create_booking(self, payload).await
    }
}

impl ApiClient {
    /// All bookings, or only the ones attributed to the current agent.
    pub async fn list_bookings(&mut self, mine: bool) -> ClientResult<Vec<Value>> {
        let path = if mine {
            "/api/bookings/my"
        } else {
            "/api/bookings"
        };
        let body = self.send(self.request(Method::GET, path)).await?;
        Ok(extract_list(&body, &["bookings", "data"]))
    }

    pub async fn get_booking(&mut self, id: &str, expand: bool) -> ClientResult<Value> {
        let path = if expand {
            format!("/api/bookings/{}?expand=full", id)
        } else {
            format!("/api/bookings/{}", id)
        };
        let body = self.send(self.request(Method::GET, &path)).await?;
        // fetch-one may wrap the record the same way lists do
        Ok(body.get("booking").cloned().unwrap_or(body))
    }

    pub async fn create_booking(&mut self, payload: &Value) -> ClientResult<Value> {
        tracing::debug!("Creating booking for {}", payload["customerName"]);
        let body = self
            .send(self.request(Method::POST, "/api/bookings").json(payload))
            .await?;
        Ok(body.get("booking").cloned().unwrap_or(body))
    }

    pub async fn update_booking(&mut self, id: &str, fields: &Value) -> ClientResult<Value> {
        let path = format!("/api/bookings/{}", id);
        self.send(self.request(Method::PUT, &path).json(fields))
            .await
    }

    pub async fn set_booking_status(
        &mut self,
        id: &str,
        status: BookingStatus,
    ) -> ClientResult<Value> {
        self.update_booking(id, &json!({ "status": status })).await
    }

    pub async fn set_approval_status(
        &mut self,
        id: &str,
        approval: ApprovalStatus,
    ) -> ClientResult<Value> {
        self.update_booking(id, &json!({ "approvalStatus": approval }))
            .await
    }

    /// Re-attribute a booking to another agent.
    pub async fn assign_booking(&mut self, id: &str, agent_id: &str) -> ClientResult<Value> {
        self.update_booking(id, &json!({ "agentId": agent_id })).await
    }

    pub async fn delete_booking(&mut self, id: &str) -> ClientResult<()> {
        let path = format!("/api/bookings/{}", id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    /// Server-rendered PDF for one booking.
    pub async fn booking_pdf(&mut self, id: &str) -> ClientResult<Vec<u8>> {
        let path = format!("/api/bookings/{}/pdf", id);
        self.send_bytes(self.request(Method::GET, &path)).await
    }

    /// Versioned variant: the caller posts the full record, useful when the
    /// booking only exists locally.
    pub async fn booking_pdf_v2(&mut self, record: &Value) -> ClientResult<Vec<u8>> {
        self.send_bytes(self.request(Method::POST, "/api/v2/bookings/pdf").json(record))
            .await
    }
}
