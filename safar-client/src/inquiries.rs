use crate::error::ClientResult;
use crate::http::ApiClient;
use reqwest::Method;
use safar_core::inquiry::InquiryStatus;
use safar_core::mapper::extract_list;
use serde_json::{json, Value};

impl ApiClient {
    pub async fn list_inquiries(&mut self) -> ClientResult<Vec<Value>> {
        let body = self.send(self.request(Method::GET, "/api/inquiries")).await?;
        Ok(extract_list(&body, &["inquiries", "data"]))
    }

    /// Append one entry to the inquiry's response thread.
    pub async fn respond_inquiry(&mut self, id: &str, message: &str) -> ClientResult<Value> {
        let path = format!("/api/inquiries/{}/respond", id);
        self.send(
            self.request(Method::POST, &path)
                .json(&json!({ "message": message })),
        )
        .await
    }

    pub async fn set_inquiry_status(
        &mut self,
        id: &str,
        status: InquiryStatus,
    ) -> ClientResult<Value> {
        let path = format!("/api/inquiries/{}", id);
        self.send(
            self.request(Method::PUT, &path)
                .json(&json!({ "status": status })),
        )
        .await
    }

    /// Assign an agent; the backend can create a booking from the inquiry
    /// as a side effect when asked to.
    pub async fn assign_inquiry(
        &mut self,
        id: &str,
        agent_id: &str,
        create_booking: bool,
    ) -> ClientResult<Value> {
        let path = format!("/api/inquiries/{}/assign", id);
        self.send(self.request(Method::POST, &path).json(&json!({
            "agentId": agent_id,
            "createBooking": create_booking,
        })))
        .await
    }
}
