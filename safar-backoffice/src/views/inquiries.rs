use super::cell;
use safar_client::{ApiClient, ClientResult};
use safar_core::mapper::{map_inquiry, UiInquiry};

#[derive(Debug, Default)]
pub struct InquiriesView {
    rows: Vec<UiInquiry>,
}

impl InquiriesView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[UiInquiry] {
        &self.rows
    }

    pub async fn refresh(&mut self, api: &mut ApiClient) -> ClientResult<()> {
        let records = api.list_inquiries().await?;
        self.rows = records.iter().map(map_inquiry).collect();
        tracing::debug!("Loaded {} inquiries", self.rows.len());
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{}{}{}{}{}{}{}\n",
            cell("ID", 12),
            cell("CUSTOMER", 22),
            cell("INTEREST", 20),
            cell("STATUS", 11),
            cell("PRIORITY", 10),
            cell("AGENT", 14),
            cell("REPLIES", 8),
        ));
        for row in &self.rows {
            out.push_str(&format!(
                "{}{}{}{}{}{}{}\n",
                cell(&row.id, 12),
                cell(&row.customer, 22),
                cell(&row.package_interest, 20),
                cell(row.status.as_str(), 11),
                cell(&row.priority, 10),
                cell(&row.assigned_agent, 14),
                cell(&row.responses.len().to_string(), 8),
            ));
        }
        out.push_str(&format!("{} inquiry(ies)\n", self.rows.len()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_shows_response_counts() {
        let records = [json!({
            "_id": "q-1",
            "customerName": "Fatima",
            "status": "responded",
            "responses": [{ "message": "called back" }],
        })];
        let view = InquiriesView {
            rows: records.iter().map(map_inquiry).collect(),
        };
        let rendered = view.render();
        assert!(rendered.contains("q-1"));
        assert!(rendered.contains("responded"));
        assert!(rendered.contains("1 inquiry(ies)"));
    }
}
