use super::cell;
use safar_client::{ApiClient, ClientResult};
use safar_core::mapper::{map_booking, UiBooking};

/// In-memory bookings list: rows are view-models recomputed on every
/// refresh, never a source of truth.
#[derive(Debug, Default)]
pub struct BookingsView {
    rows: Vec<UiBooking>,
}

impl BookingsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[UiBooking] {
        &self.rows
    }

    pub async fn refresh(&mut self, api: &mut ApiClient, mine: bool) -> ClientResult<()> {
        let records = api.list_bookings(mine).await?;
        self.rows = records.iter().map(map_booking).collect();
        tracing::debug!("Loaded {} bookings", self.rows.len());
        Ok(())
    }

    /// Delete with optimistic local removal: the row disappears before the
    /// DELETE is issued and is restored if the call fails.
    pub async fn delete(&mut self, api: &mut ApiClient, id: &str) -> ClientResult<()> {
        let removed = take_row(&mut self.rows, id);
        match api.delete_booking(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                if let Some((position, row)) = removed {
                    restore_row(&mut self.rows, position, row);
                }
                Err(err)
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{}{}{}{}{}{}{}\n",
            cell("ID", 12),
            cell("CUSTOMER", 22),
            cell("PACKAGE", 18),
            cell("AMOUNT", 10),
            cell("STATUS", 11),
            cell("APPROVAL", 10),
            cell("AGENT", 14),
        ));
        for row in &self.rows {
            out.push_str(&format!(
                "{}{}{}{}{}{}{}\n",
                cell(&row.id, 12),
                cell(&row.customer, 22),
                cell(&row.package_name, 18),
                cell(&format!("{:.2}", row.amount), 10),
                cell(row.status.as_str(), 11),
                cell(row.approval_status.as_str(), 10),
                cell(&row.agent, 14),
            ));
        }
        out.push_str(&format!("{} booking(s)\n", self.rows.len()));
        out
    }
}

fn take_row(rows: &mut Vec<UiBooking>, id: &str) -> Option<(usize, UiBooking)> {
    let position = rows.iter().position(|row| row.id == id)?;
    Some((position, rows.remove(position)))
}

fn restore_row(rows: &mut Vec<UiBooking>, position: usize, row: UiBooking) {
    let position = position.min(rows.len());
    rows.insert(position, row);
}

#[cfg(test)]
mod tests {
    use super::*;
    use safar_core::mapper::map_booking;
    use serde_json::json;

    fn rows() -> Vec<UiBooking> {
        [
            json!({ "id": "b-1", "customerName": "Ahmed" }),
            json!({ "id": "b-2", "customerName": "Fatima" }),
            json!({ "id": "b-3", "customerName": "Yusuf" }),
        ]
        .iter()
        .map(map_booking)
        .collect()
    }

    #[test]
    fn optimistic_removal_and_rollback_keep_order() {
        let mut rows = rows();
        let removed = take_row(&mut rows, "b-2").unwrap();
        assert_eq!(rows.len(), 2);

        restore_row(&mut rows, removed.0, removed.1);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].id, "b-2");
    }

    #[test]
    fn removing_an_unknown_id_is_a_noop() {
        let mut rows = rows();
        assert!(take_row(&mut rows, "nope").is_none());
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn render_contains_headers_and_rows() {
        let view = BookingsView { rows: rows() };
        let rendered = view.render();
        assert!(rendered.contains("CUSTOMER"));
        assert!(rendered.contains("Fatima"));
        assert!(rendered.contains("3 booking(s)"));
    }
}
