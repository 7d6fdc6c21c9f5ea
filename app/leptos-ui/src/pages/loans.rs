use lc_api_types::LoanId;
use lc_core::format::{display_date, or_placeholder, rupees};
use lc_core::widgets::loan_detail::{LOAN_NOT_FOUND, NO_DUES};
use lc_core::widgets::loan_history::NO_LOANS;
use lc_core::widgets::{DetailView, LoanDetail, LoanHistory};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::loan_application::LoanApplicationPanel;
use crate::components::spinner::fetch_status;
use crate::components::status_badge::StatusBadge;
use crate::state::{use_console_state, Mounted};

// ---------------------------------------------------------------------------
// Loan detail
// ---------------------------------------------------------------------------

/// One loan with its outstanding installments. Remounted per loan.
#[component]
fn LoanDetailPanel(loan_id: LoanId, on_close: Callback<()>) -> impl IntoView {
    let state = use_console_state();
    let mounted = Mounted::track();
    let detail = RwSignal::new(LoanDetail::new(loan_id));

    if let Some(ticket) = detail.try_update(LoanDetail::activate) {
        let api = state.api();
        spawn_local(async move {
            let result = api.loan_details(loan_id).await;
            if mounted.get() {
                detail.update(|d| {
                    d.settle(ticket, result);
                });
            }
        });
    }

    view! {
        <div class="loan-detail card p-3 mt-3">
            <div class="d-flex justify-content-between">
                <h5>"Loan #"{loan_id}</h5>
                <button class="btn-close" aria-label="Close" on:click=move |_| on_close.run(())></button>
            </div>
            {move || detail.with(|d| {
                if let Some(status) = fetch_status(d.state(), "Loading loan details...") {
                    return status;
                }
                match d.view() {
                    Some(DetailView::Found { loan, schedules }) => {
                        let summary = view! {
                            <p>
                                <strong>"Customer: "</strong>{or_placeholder(loan.customer_name.as_deref())}
                                " | "<strong>"Amount: "</strong>{rupees(&loan.loan_amount)}
                                " | "<strong>"Interest: "</strong>{loan.interest_rate.to_string()}"%"
                                " | "<strong>"Status: "</strong>{loan.status.clone()}
                            </p>
                        };
                        let dues = if schedules.is_empty() {
                            view! { <p class="text-muted">{NO_DUES}</p> }.into_any()
                        } else {
                            view! {
                                <table class="table table-sm">
                                    <thead>
                                        <tr>
                                            <th>"Installment"</th>
                                            <th>"Due Date"</th>
                                            <th>"Total Due"</th>
                                            <th>"Status"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {schedules
                                            .iter()
                                            .map(|s| view! {
                                                <tr>
                                                    <td>{s.installment_no}</td>
                                                    <td>{display_date(&s.due_date)}</td>
                                                    <td>{rupees(&s.total_due)}</td>
                                                    <td><StatusBadge status=s.status.clone() /></td>
                                                </tr>
                                            })
                                            .collect_view()}
                                    </tbody>
                                </table>
                            }
                            .into_any()
                        };
                        view! { {summary} {dues} }.into_any()
                    }
                    _ => view! { <p class="text-muted">{LOAN_NOT_FOUND}</p> }.into_any(),
                }
            })}
        </div>
    }
}

// ---------------------------------------------------------------------------
// Loan history page
// ---------------------------------------------------------------------------

#[component]
pub fn LoansPage() -> impl IntoView {
    let state = use_console_state();
    let mounted = Mounted::track();
    let history = RwSignal::new(LoanHistory::new());
    let (selected, set_selected) = signal(Option::<LoanId>::None);

    let do_refresh = move || {
        let Some(ticket) = history.try_update(LoanHistory::activate) else {
            return;
        };
        let api = state.api();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api.list_loans().await;
            if mounted.get() {
                history.update(|h| {
                    h.settle(ticket, result);
                });
            }
        });
    };

    // Initial fetch
    do_refresh();

    let (applying, set_applying) = signal(false);
    let on_submitted = {
        let do_refresh = do_refresh.clone();
        Callback::new(move |_: ()| do_refresh())
    };
    let on_close_application = Callback::new(move |_: ()| set_applying.set(false));

    view! {
        <div class="page loans-page">
            <div class="page-header">
                <h2>"Loan History"</h2>
                <button class="btn btn-primary me-2" on:click=move |_| set_applying.update(|open| *open = !*open)>
                    "New Application"
                </button>
                <button class="btn btn-outline-secondary" on:click=move |_| do_refresh()>"Refresh"</button>
            </div>
            {move || applying.get().then(|| view! {
                <LoanApplicationPanel on_submitted on_close=on_close_application />
            })}
            {move || history.with(|h| {
                if let Some(status) = fetch_status(h.state(), "Loading loans...") {
                    return status;
                }
                let rows = h.rows().unwrap_or_default();
                if rows.is_empty() {
                    return view! { <p class="text-muted">{NO_LOANS}</p> }.into_any();
                }
                view! {
                    <table class="table table-hover">
                        <thead>
                            <tr>
                                <th>"Loan ID"</th>
                                <th>"Customer"</th>
                                <th>"Loan Type"</th>
                                <th>"Principal"</th>
                                <th>"Total Dues"</th>
                                <th>"Due Amount"</th>
                                <th>"Interest %"</th>
                                <th>"Repayment Mode"</th>
                                <th>"Status"</th>
                                <th>"Applied On"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows
                                .into_iter()
                                .map(|row| {
                                    let id = row.loan_id.parse::<LoanId>().ok();
                                    view! {
                                        <tr
                                            class="clickable"
                                            class:table-active=(move || id.is_some() && selected.get() == id)
                                            on:click=move |_| set_selected.set(id)
                                        >
                                            <td>{row.loan_id}</td>
                                            <td>{row.customer}</td>
                                            <td>{row.loan_type}</td>
                                            <td>{row.principal}</td>
                                            <td>{row.total_due_count}</td>
                                            <td>{row.due_amount}</td>
                                            <td>{row.interest}</td>
                                            <td>{row.repayment_mode}</td>
                                            <td>{row.status}</td>
                                            <td>{row.applied_on}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_any()
            })}
            {move || selected.get().map(|loan_id| view! {
                <LoanDetailPanel loan_id on_close=Callback::new(move |_: ()| set_selected.set(None)) />
            })}
        </div>
    }
}
