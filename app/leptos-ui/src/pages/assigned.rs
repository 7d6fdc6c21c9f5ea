use lc_api_types::LoanId;
use lc_core::format::{display_date, rupees};
use lc_core::widgets::assigned_loans::NONE_ASSIGNED;
use lc_core::widgets::AssignedLoans;
use lc_core::Session;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::payment_panel::PaymentPanel;
use crate::components::spinner::fetch_status;
use crate::components::status_badge::StatusBadge;
use crate::state::{use_console_state, Mounted};

/// Installments assigned to the signed-in collection agent.
#[component]
pub fn AssignedPage() -> impl IntoView {
    let state = use_console_state();
    let mounted = Mounted::track();
    let assigned = RwSignal::new(AssignedLoans::new(state.session().username()));
    let (collecting, set_collecting) = signal(Option::<LoanId>::None);

    if let Some(ticket) = assigned.try_update(AssignedLoans::activate) {
        let api = state.api();
        spawn_local(async move {
            let result = api.schedule_board().await;
            if mounted.get() {
                assigned.update(|a| {
                    a.settle(ticket, result);
                });
            }
        });
    }

    view! {
        <div class="page assigned-page">
            <div class="page-header">
                <h2>"My Collections"</h2>
                {move || assigned.with(|a| a.current_agent().map(|agent| view! {
                    <span class="text-muted">"Agent: "{agent.username.clone()}</span>
                }))}
            </div>
            {move || assigned.with(|a| {
                if let Some(status) = fetch_status(a.state(), "Loading assigned loans...") {
                    return status;
                }
                let schedules = a.assigned().unwrap_or_default();
                if schedules.is_empty() {
                    return view! { <p class="text-muted">{NONE_ASSIGNED}</p> }.into_any();
                }
                view! {
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Loan"</th>
                                <th>"Installment"</th>
                                <th>"Due Date"</th>
                                <th>"Total Due"</th>
                                <th>"Status"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {schedules
                                .into_iter()
                                .map(|s| {
                                    let loan = s.loan;
                                    view! {
                                        <tr>
                                            <td>{loan}</td>
                                            <td>{s.installment_no}</td>
                                            <td>{display_date(&s.due_date)}</td>
                                            <td>{rupees(&s.total_due)}</td>
                                            <td><StatusBadge status=s.status /></td>
                                            <td>
                                                <button
                                                    class="btn btn-sm btn-success"
                                                    on:click=move |_| set_collecting.set(Some(loan))
                                                >
                                                    "Collect"
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
            {move || collecting.get().map(|loan| view! {
                <PaymentPanel loan on_close=Callback::new(move |_: ()| set_collecting.set(None)) />
            })}
        </div>
    }
}
