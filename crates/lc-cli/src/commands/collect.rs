use lc_api_types::ScheduleId;
use lc_core::session::Session;
use lc_core::widgets::payment_collection::{PaymentCollection, PaymentMethod};

use super::{friendly_error, Api};

/// Run the `collect` subcommand: record a payment against one installment.
pub async fn run<S: Session>(
    api: &Api<S>,
    schedule: ScheduleId,
    amount: &str,
    method: PaymentMethod,
) -> anyhow::Result<()> {
    let schedules = api.list_schedules().await.map_err(friendly_error)?;
    let Some(loan) = schedules.iter().find(|s| s.id == schedule).map(|s| s.loan) else {
        anyhow::bail!("Schedule #{schedule} not found");
    };

    let mut collection = PaymentCollection::new(loan);
    let ticket = collection.activate();
    collection.settle(ticket, Ok(schedules));
    collection.select(Some(schedule));
    collection.set_method(method);
    collection.set_amount(amount);

    let Some(dispatch) = collection.begin_collect()? else {
        return Ok(());
    };
    let result = api.collect_payment(dispatch.schedule, &dispatch.request).await;
    let notice = collection.finish_collect(&dispatch, result);
    if !notice.is_success() {
        anyhow::bail!(notice.message);
    }
    println!("{}", notice.message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::Json as JsonBody,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use lc_core::widgets::payment_collection::{COLLECT_FAILED, COLLECT_OK};
    use serde_json::json;

    use super::super::test_support::{authed, serve};
    use super::*;

    fn schedules() -> Router {
        Router::new().route(
            "/api/auth/loan-schedules/",
            get(|| async { Json(json!([{"id": 9, "loan": 4, "installment_no": 1}])) }),
        )
    }

    #[tokio::test]
    async fn collects_payment() {
        let app = schedules().route(
            "/api/auth/loan-schedules/{id}/collect/",
            post(|JsonBody(body): JsonBody<serde_json::Value>| async move {
                assert_eq!(body["payment_method"], "card");
                assert_eq!(body["paid_amount"], "250.50");
                Json(json!({}))
            }),
        );
        let url = serve(app).await;
        assert!(run(&authed(&url), 9, "250.50", PaymentMethod::Card).await.is_ok());
        assert!(!COLLECT_OK.is_empty());
    }

    #[tokio::test]
    async fn rejects_bad_amount_before_sending() {
        // Only the schedule list is served; a POST would 404.
        let url = serve(schedules()).await;
        let err = run(&authed(&url), 9, "0", PaymentMethod::Cash)
            .await
            .unwrap_err()
            .to_string();
        assert_eq!(err, "Amount must be greater than zero");
    }

    #[tokio::test]
    async fn server_failure_uses_generic_message() {
        let app = schedules().route(
            "/api/auth/loan-schedules/{id}/collect/",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))) }),
        );
        let url = serve(app).await;
        let err = run(&authed(&url), 9, "10", PaymentMethod::Upi)
            .await
            .unwrap_err()
            .to_string();
        assert_eq!(err, COLLECT_FAILED);
    }
}
