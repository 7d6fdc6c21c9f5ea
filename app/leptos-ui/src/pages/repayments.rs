use lc_api_types::ScheduleId;
use lc_core::widgets::ScheduleBoard;
use lc_core::Notice;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::bulk_reminder::BulkReminderTool;
use crate::components::modals::EscalationModal;
use crate::components::notes::ManualPaymentForm;
use crate::components::spinner::fetch_status;
use crate::components::status_badge::StatusBadge;
use crate::state::{use_console_state, Mounted};

/// Repayment schedules with agent assignment, escalation notes, manual
/// payments and bulk reminders.
#[component]
pub fn RepaymentsPage() -> impl IntoView {
    let state = use_console_state();
    let mounted = Mounted::track();
    let board = RwSignal::new(ScheduleBoard::new());
    let (escalating, set_escalating) = signal(Option::<ScheduleId>::None);

    let do_refresh = {
        let mounted = mounted.clone();
        move || {
            let Some(ticket) = board.try_update(ScheduleBoard::activate) else {
                return;
            };
            let api = state.api();
            let mounted = mounted.clone();
            spawn_local(async move {
                // Schedules and agents together; either failing fails both.
                let result = api.schedule_board().await;
                if mounted.get() {
                    board.update(|b| {
                        b.settle(ticket, result);
                    });
                }
            });
        }
    };

    let assign = move |schedule: ScheduleId| {
        let dispatch = match board.try_update(|b| b.begin_assign(schedule)) {
            Some(Ok(Some(dispatch))) => dispatch,
            Some(Err(err)) => {
                state.notify(Notice::error(err.to_string()));
                return;
            }
            _ => return,
        };
        let api = state.api();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api.assign_schedule(dispatch.schedule, dispatch.agent).await;
            if !mounted.get() {
                return;
            }
            if let Some(notice) = board.try_update(|b| b.finish_assign(dispatch, result)) {
                state.notify(notice);
            }
        });
    };

    do_refresh();

    view! {
        <div class="page repayments-page">
            <div class="page-header">
                <h2>"Repayment Schedules"</h2>
                <button class="btn btn-outline-secondary" on:click={
                    let do_refresh = do_refresh.clone();
                    move |_| do_refresh()
                }>"Refresh"</button>
            </div>

            {move || board.with(|b| {
                if let Some(status) = fetch_status(b.state(), "Loading schedules...") {
                    return status;
                }
                let agents = b.data().map(|d| d.agents.clone()).unwrap_or_default();
                let rows = b.rows().unwrap_or_default();
                view! {
                    <table class="table table-striped">
                        <thead>
                            <tr>
                                <th>"Loan"</th>
                                <th>"Installment"</th>
                                <th>"Due Date"</th>
                                <th>"Principal"</th>
                                <th>"Interest"</th>
                                <th>"Total Due"</th>
                                <th>"Remaining Principal"</th>
                                <th>"Status"</th>
                                <th>"Assigned To"</th>
                                <th>"Assign Agent"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows
                                .into_iter()
                                .map(|row| {
                                    let id = row.id;
                                    let selection = b.selection(id);
                                    let busy = b.is_busy(id);
                                    let assign = assign.clone();
                                    let options = agents
                                        .iter()
                                        .map(|a| view! {
                                            <option value=a.id.to_string() selected={selection == Some(a.id)}>
                                                {a.username.clone()}
                                            </option>
                                        })
                                        .collect_view();
                                    view! {
                                        <tr>
                                            <td>{row.loan}</td>
                                            <td>{row.installment_no}</td>
                                            <td>{row.due_date}</td>
                                            <td>{row.principal}</td>
                                            <td>{row.interest}</td>
                                            <td>{row.total_due}</td>
                                            <td>{row.remaining_principal}</td>
                                            <td><StatusBadge status=row.status /></td>
                                            <td>{row.assigned_agent}</td>
                                            <td>
                                                <select
                                                    class="form-select form-select-sm"
                                                    disabled=busy
                                                    on:change=move |ev| {
                                                        let agent = event_target_value(&ev).parse().ok();
                                                        board.update(|b| b.select_agent(id, agent));
                                                    }
                                                >
                                                    <option value="">"Select agent"</option>
                                                    {options}
                                                </select>
                                            </td>
                                            <td class="text-nowrap">
                                                <button
                                                    class="btn btn-sm btn-primary me-1"
                                                    disabled=busy
                                                    on:click=move |_| assign(id)
                                                >
                                                    {if busy { "Assigning..." } else { "Assign" }}
                                                </button>
                                                <button
                                                    class="btn btn-sm btn-outline-warning"
                                                    on:click=move |_| set_escalating.set(Some(id))
                                                >
                                                    "Escalate"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_any()
            })}

            <div class="row mt-4">
                <div class="col"><ManualPaymentForm /></div>
                <div class="col"><BulkReminderTool /></div>
            </div>

            {move || escalating.get().map(|id| view! {
                <EscalationModal
                    title=format!("Escalate schedule #{id}")
                    on_close=Callback::new(move |_: ()| set_escalating.set(None))
                />
            })}
        </div>
    }
}
