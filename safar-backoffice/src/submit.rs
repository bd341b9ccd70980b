use safar_client::{ClientError, CreateBooking};
use safar_core::user::UserProfile;
use safar_wizard::{BookingWizard, WizardError};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    /// A create call failed part-way through the batch. Slots created
    /// before the failure are NOT rolled back; the remaining ones were
    /// never issued.
    #[error("Booking {} of {total} failed: {source}", .created.len() + 1)]
    Aborted {
        total: usize,
        created: Vec<Value>,
        source: ClientError,
    },
}

/// Submit every wizard slot as one create-request each, sequentially and in
/// slot order.
///
/// Validation runs across all slots first; a failing slot becomes active
/// with its errors populated and nothing is sent. Each created record is
/// reported through `on_created` as soon as its POST answers. On full
/// success the wizard resets to its initial state.
pub async fn submit_wizard<A, F>(
    wizard: &mut BookingWizard,
    user: &UserProfile,
    api: &mut A,
    mut on_created: F,
) -> Result<Vec<Value>, SubmitError>
where
    A: CreateBooking + Send,
    F: FnMut(&Value),
{
    wizard.prepare_submit()?;
    let payloads = wizard.build_payloads(user)?;
    let total = payloads.len();

    let mut created = Vec::with_capacity(total);
    for payload in payloads {
        match api.create_booking(&payload).await {
            Ok(record) => {
                on_created(&record);
                created.push(record);
            }
            Err(source) => {
                tracing::error!(
                    "Booking creation failed after {} of {} succeeded: {}",
                    created.len(),
                    total,
                    source
                );
                return Err(SubmitError::Aborted {
                    total,
                    created,
                    source,
                });
            }
        }
    }

    wizard.reset();
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use safar_wizard::BookingFormData;
    use serde_json::json;

    /// Counts create calls; fails every call whose index is in `fail_at`.
    struct FakeApi {
        calls: usize,
        fail_at: Option<usize>,
    }

    #[async_trait]
    impl CreateBooking for FakeApi {
        async fn create_booking(
            &mut self,
            payload: &Value,
        ) -> safar_client::ClientResult<Value> {
            let index = self.calls;
            self.calls += 1;
            if self.fail_at == Some(index) {
                return Err(ClientError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(json!({
                "id": format!("b-{}", index),
                "customerName": payload["customerName"],
            }))
        }
    }

    fn user() -> UserProfile {
        UserProfile {
            id: "u-1".into(),
            role: "admin".into(),
            ..UserProfile::default()
        }
    }

    fn complete_slot() -> BookingFormData {
        let mut slot = BookingFormData::new();
        slot.customer_name = "Ahmed Ali".into();
        slot.customer_email = "a@x.com".into();
        slot.contact_number = "0300".into();
        slot.passenger_count = "1".into();
        slot.departure_city = "Karachi".into();
        slot.arrival_city = "Jeddah".into();
        slot.departure_date = "2024-03-01".into();
        slot.return_date = "2024-03-15".into();
        slot.booking_date = "2024-02-20".into();
        slot.set_pnr("abc123");
        slot.package_name = "Umrah Basic".into();
        slot.total_amount = "1500".into();
        slot
    }

    #[tokio::test]
    async fn validation_failure_issues_no_network_calls() {
        let mut incomplete = complete_slot();
        incomplete.total_amount.clear();
        let mut wizard = BookingWizard::from_slots(vec![complete_slot(), incomplete]);
        let mut api = FakeApi { calls: 0, fail_at: None };

        let result = submit_wizard(&mut wizard, &user(), &mut api, |_| {}).await;

        assert!(matches!(
            result,
            Err(SubmitError::Wizard(WizardError::SubmitBlocked { slot: 1 }))
        ));
        assert_eq!(api.calls, 0);
        assert_eq!(wizard.active_index(), 1);
        assert!(wizard.errors().contains_key("totalAmount"));
    }

    #[tokio::test]
    async fn happy_path_creates_one_booking_per_slot_and_resets() {
        let mut wizard = BookingWizard::from_slots(vec![complete_slot(), complete_slot()]);
        let mut api = FakeApi { calls: 0, fail_at: None };
        let mut reported = Vec::new();

        let created = submit_wizard(&mut wizard, &user(), &mut api, |record| {
            reported.push(record["id"].as_str().unwrap().to_string());
        })
        .await
        .unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(api.calls, 2);
        assert_eq!(reported, vec!["b-0", "b-1"]);
        // wizard is back to its initial state
        assert_eq!(wizard.slots().len(), 1);
        assert_eq!(wizard.active_slot().customer_name, "");
    }

    #[tokio::test]
    async fn mid_batch_failure_aborts_the_rest_without_rollback() {
        let mut wizard =
            BookingWizard::from_slots(vec![complete_slot(), complete_slot(), complete_slot()]);
        let mut api = FakeApi { calls: 0, fail_at: Some(1) };

        let result = submit_wizard(&mut wizard, &user(), &mut api, |_| {}).await;

        match result {
            Err(SubmitError::Aborted { total, created, source }) => {
                assert_eq!(total, 3);
                // the first create stands, the third was never issued
                assert_eq!(created.len(), 1);
                assert_eq!(api.calls, 2);
                assert!(matches!(source, ClientError::Api { status: 500, .. }));
            }
            other => panic!("expected Aborted, got {:?}", other.map(|v| v.len())),
        }
        // failed submission leaves the wizard intact for correction
        assert_eq!(wizard.slots().len(), 3);
    }

    #[test]
    fn payload_shape_matches_the_api_contract() {
        // end-to-end shape check: one slot in, one POST body out
        let wizard = BookingWizard::from_slots(vec![complete_slot()]);
        let payloads = wizard.build_payloads(&user()).unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["customerName"], "Ahmed Ali");
        assert_eq!(payloads[0]["pricing"]["totalAmount"], 1500.0);
        assert_eq!(payloads[0]["flight"]["pnr"], "ABC123");
    }
}
