use lc_core::session::Session;
use lc_core::widgets::assigned_loans::{AssignedLoans, NONE_ASSIGNED};
use lc_core::widgets::schedule_board::{ScheduleBoard, ScheduleRow};

use super::{friendly_error, render_table, Api};

/// Run the `schedules` subcommand. With `mine`, only installments assigned
/// to the logged-in agent are shown.
pub async fn run<S: Session>(api: &Api<S>, mine: bool) -> anyhow::Result<()> {
    let data = api.schedule_board().await.map_err(friendly_error)?;

    if mine {
        let mut view = AssignedLoans::new(api.session().username());
        let ticket = view.activate();
        view.settle(ticket, Ok(data.clone()));
        let mut board = ScheduleBoard::new();
        let ticket = board.activate();
        let assigned = view.assigned().unwrap_or_default();
        board.settle(ticket, Ok((assigned, data.1)));
        match board.rows() {
            Some(rows) if !rows.is_empty() => println!("{}", render_schedules(&rows)),
            _ => println!("{NONE_ASSIGNED}"),
        }
        return Ok(());
    }

    let mut board = ScheduleBoard::new();
    let ticket = board.activate();
    board.settle(ticket, Ok(data));
    println!("{}", render_schedules(&board.rows().unwrap_or_default()));
    Ok(())
}

pub fn render_schedules(rows: &[ScheduleRow]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.loan.clone(),
                r.installment_no.clone(),
                r.due_date.clone(),
                r.principal.clone(),
                r.interest.clone(),
                r.total_due.clone(),
                r.remaining_principal.clone(),
                r.status.clone(),
                r.assigned_agent.clone(),
            ]
        })
        .collect();
    render_table(
        &[
            "ID", "Loan", "#", "Due Date", "Principal", "Interest", "Total Due", "Remaining",
            "Status", "Agent",
        ],
        &rows,
    )
}
