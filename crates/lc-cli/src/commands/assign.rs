use lc_api_types::{AgentId, ScheduleId};
use lc_core::session::Session;
use lc_core::widgets::schedule_board::ScheduleBoard;

use super::{friendly_error, Api};

/// Run the `assign` subcommand: give one installment to a collection agent.
///
/// The board is loaded first so the confirmation can name the agent.
pub async fn run<S: Session>(api: &Api<S>, schedule: ScheduleId, agent: AgentId) -> anyhow::Result<()> {
    let data = api.schedule_board().await.map_err(friendly_error)?;
    let mut board = ScheduleBoard::new();
    let ticket = board.activate();
    board.settle(ticket, Ok(data));

    if board
        .data()
        .is_some_and(|b| !b.schedules.iter().any(|s| s.id == schedule))
    {
        anyhow::bail!("Schedule #{schedule} not found");
    }

    board.select_agent(schedule, Some(agent));
    let Some(dispatch) = board.begin_assign(schedule)? else {
        return Ok(());
    };
    let result = api.assign_schedule(dispatch.schedule, dispatch.agent).await;
    let notice = board.finish_assign(dispatch, result);
    if !notice.is_success() {
        anyhow::bail!(notice.message);
    }
    println!("{}", notice.message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Json as JsonBody, Path},
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;

    use super::super::test_support::{authed, serve};
    use super::*;

    fn board_routes() -> Router {
        Router::new()
            .route(
                "/api/auth/loan-schedules/",
                get(|| async {
                    Json(json!([{"id": 5, "loan": 1, "installment_no": 2, "assigned_to": null}]))
                }),
            )
            .route(
                "/api/auth/agents/",
                get(|| async { Json(json!([{"id": 3, "username": "ravi_agent"}])) }),
            )
    }

    #[tokio::test]
    async fn assigns_schedule() {
        let app = board_routes().route(
            "/api/auth/loan-schedules/{id}/assign/",
            post(|Path(id): Path<i64>, JsonBody(body): JsonBody<serde_json::Value>| async move {
                assert_eq!(id, 5);
                assert_eq!(body["assigned_to"], 3);
                Json(json!({"assigned_to": 3}))
            }),
        );
        let url = serve(app).await;
        assert!(run(&authed(&url), 5, 3).await.is_ok());
    }

    #[tokio::test]
    async fn backend_rejection_is_an_error() {
        let app = board_routes().route(
            "/api/auth/loan-schedules/{id}/assign/",
            post(|| async { (StatusCode::BAD_REQUEST, Json(json!({"error": "Agent is inactive"}))) }),
        );
        let url = serve(app).await;
        let err = run(&authed(&url), 5, 3).await.unwrap_err().to_string();
        assert_eq!(err, "Agent is inactive");
    }

    #[tokio::test]
    async fn unknown_schedule_is_rejected_locally() {
        let url = serve(board_routes()).await;
        let err = run(&authed(&url), 99, 3).await.unwrap_err().to_string();
        assert_eq!(err, "Schedule #99 not found");
    }
}
