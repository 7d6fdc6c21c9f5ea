use lc_api_types::LoanId;
use lc_core::format::{display_date, or_placeholder, rupees};
use lc_core::session::Session;
use lc_core::widgets::loan_detail::{DetailView, LoanDetail, LOAN_NOT_FOUND, NO_DUES};
use lc_core::widgets::loan_history::{LoanRow, NO_LOANS};
use lc_core::widgets::BadgeTone;

use super::{friendly_error, render_table, Api};

/// Run the `loans` subcommand: list every loan, or one loan with its dues.
pub async fn run<S: Session>(api: &Api<S>, id: Option<LoanId>) -> anyhow::Result<()> {
    match id {
        None => {
            let loans = api.list_loans().await.map_err(friendly_error)?;
            println!("{}", render_loans(&loans.iter().map(LoanRow::from_loan).collect::<Vec<_>>()));
        }
        Some(id) => {
            let mut detail = LoanDetail::new(id);
            let ticket = detail.activate();
            let result = api.loan_details(id).await.map_err(friendly_error)?;
            detail.settle(ticket, Ok(result));
            println!("{}", render_detail(&detail));
        }
    }
    Ok(())
}

pub fn render_loans(rows: &[LoanRow]) -> String {
    if rows.is_empty() {
        return NO_LOANS.to_string();
    }
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.loan_id.clone(),
                r.customer.clone(),
                r.loan_type.clone(),
                r.principal.clone(),
                r.total_due_count.clone(),
                r.due_amount.clone(),
                r.interest.clone(),
                r.repayment_mode.clone(),
                r.status.clone(),
                r.applied_on.clone(),
            ]
        })
        .collect();
    render_table(
        &[
            "Loan ID", "Customer", "Type", "Principal", "Dues", "Due Amount", "Interest %",
            "Mode", "Status", "Applied On",
        ],
        &rows,
    )
}

fn render_detail(detail: &LoanDetail) -> String {
    match detail.view() {
        None | Some(DetailView::NotFound) => LOAN_NOT_FOUND.to_string(),
        Some(DetailView::Found { loan, schedules }) => {
            let mut out = format!(
                "Loan #{}  {}\n  amount:   {}\n  interest: {}%\n  status:   {}\n\n",
                loan.id,
                or_placeholder(loan.customer_name.as_deref()),
                rupees(&loan.loan_amount),
                loan.interest_rate,
                loan.status,
            );
            if schedules.is_empty() {
                out.push_str(NO_DUES);
            } else {
                let rows: Vec<Vec<String>> = schedules
                    .iter()
                    .map(|s| {
                        let marker = match BadgeTone::for_status(&s.status) {
                            BadgeTone::Success => "",
                            BadgeTone::Danger => " *",
                        };
                        vec![
                            s.installment_no.to_string(),
                            display_date(&s.due_date),
                            rupees(&s.total_due),
                            format!("{}{marker}", s.status),
                        ]
                    })
                    .collect();
                out.push_str(&render_table(&["#", "Due Date", "Total Due", "Status"], &rows));
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    use super::super::test_support::{anonymous, authed, serve};
    use super::*;

    #[tokio::test]
    async fn lists_loans() {
        let app = Router::new().route(
            "/api/auth/loans/",
            get(|headers: axum::http::HeaderMap| async move {
                assert_eq!(headers["authorization"], "Token t0k3n");
                Json(json!([{"loan_id": 1, "customer": {"full_name": "A"}, "principal_amount": 1000}]))
            }),
        );
        let url = serve(app).await;
        assert!(run(&authed(&url), None).await.is_ok());
    }

    #[tokio::test]
    async fn shows_one_loan_with_dues() {
        let app = Router::new().route(
            "/api/auth/loans/{id}/details/",
            get(|Path(id): Path<i64>| async move {
                assert_eq!(id, 7);
                Json(json!({
                    "loan": {"id": 7, "customer_name": "Asha", "loan_amount": "5000.00",
                             "interest_rate": "12.5", "status": "active"},
                    "schedules": [{"id": 1, "loan": 7, "installment_no": 1,
                                   "due_date": "2025-11-01", "total_due": "450.00", "status": "Paid"}]
                }))
            }),
        );
        let url = serve(app).await;
        assert!(run(&authed(&url), Some(7)).await.is_ok());
    }

    #[tokio::test]
    async fn surfaces_backend_error() {
        let app = Router::new().route(
            "/api/auth/loans/",
            get(|| async { (StatusCode::FORBIDDEN, Json(json!({"detail": "Invalid token."}))) }),
        );
        let url = serve(app).await;
        let err = run(&authed(&url), None).await.unwrap_err().to_string();
        assert!(err.contains("Invalid token."));
        assert!(err.contains("403"));
    }

    #[tokio::test]
    async fn anonymous_session_sends_nothing() {
        // No server at all: the request must never be attempted.
        let err = run(&anonymous("http://127.0.0.1:9"), None)
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("Not logged in"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        assert_eq!(render_loans(&[]), NO_LOANS);
    }

    #[test]
    fn missing_loan_renders_not_found() {
        let mut detail = LoanDetail::new(3);
        let ticket = detail.activate();
        detail.settle(ticket, Ok(Default::default()));
        assert_eq!(render_detail(&detail), LOAN_NOT_FOUND);
    }
}
