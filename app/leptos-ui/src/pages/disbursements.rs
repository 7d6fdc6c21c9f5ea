use lc_core::format::rupees;
use lc_core::widgets::transactions::demo_transactions;
use lc_core::widgets::{TransactionAction, TransactionDesk};
use lc_core::Notice;
use leptos::prelude::*;

use crate::components::modals::ConfirmModal;
use crate::components::notes::NoteEntry;
use crate::components::records::AuditLogView;
use crate::components::status_badge::StatusIndicator;
use crate::state::{timestamp, use_console_state};

const STATUSES: [&str; 4] = ["Pending", "Success", "Failed", "Rejected"];
const KINDS: [&str; 2] = ["Disbursement", "Refund"];

/// Disbursement approvals. Entirely local: actions change the row status,
/// write an audit entry and post a notice.
#[component]
pub fn DisbursementsPage() -> impl IntoView {
    let state = use_console_state();
    let desk = RwSignal::new(TransactionDesk::new(demo_transactions()));
    let audit = Signal::derive(move || desk.with(|d| d.audit().entries().to_vec()));

    let on_confirm = Callback::new(move |_: ()| {
        if let Some(Some(notice)) = desk.try_update(|d| d.confirm(&timestamp())) {
            state.notify(notice);
        }
    });
    let on_cancel = Callback::new(move |_: ()| desk.update(TransactionDesk::cancel));
    let on_note = Callback::new(move |note: String| {
        desk.update(|d| d.add_note(&note, &timestamp()));
        state.notify(Notice::success("Note added to the audit log."));
    });

    view! {
        <div class="page disbursements-page">
            <div class="page-header"><h2>"Disbursements"</h2></div>

            <div class="filters d-flex gap-2 mb-3">
                <select
                    class="form-select"
                    prop:value=move || desk.with(|d| d.filter().status.clone())
                    on:change=move |ev| desk.update(|d| d.set_status_filter(event_target_value(&ev)))
                >
                    <option value="">"All Statuses"</option>
                    {STATUSES.map(|s| view! { <option value=s>{s}</option> }).into_iter().collect_view()}
                </select>
                <select
                    class="form-select"
                    prop:value=move || desk.with(|d| d.filter().kind.clone())
                    on:change=move |ev| desk.update(|d| d.set_kind_filter(event_target_value(&ev)))
                >
                    <option value="">"All Types"</option>
                    {KINDS.map(|k| view! { <option value=k>{k}</option> }).into_iter().collect_view()}
                </select>
                <input
                    type="date"
                    class="form-control"
                    prop:value=move || desk.with(|d| d.filter().date.clone())
                    on:input=move |ev| desk.update(|d| d.set_date_filter(event_target_value(&ev)))
                />
                <button class="btn btn-outline-secondary" on:click=move |_| desk.update(TransactionDesk::reset_filters)>
                    "Reset"
                </button>
            </div>

            {move || desk.with(|d| {
                let rows = d.visible();
                if rows.is_empty() {
                    return view! { <p class="text-muted">"No transactions match the filters."</p> }.into_any();
                }
                view! {
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"User"</th>
                                <th>"Amount"</th>
                                <th>"Type"</th>
                                <th>"Date"</th>
                                <th>"Status"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows
                                .into_iter()
                                .map(|t| {
                                    let id = t.id;
                                    let pending = t.status == "Pending";
                                    view! {
                                        <tr>
                                            <td>{id}</td>
                                            <td>{t.user.clone()}</td>
                                            <td>{rupees(&t.amount)}</td>
                                            <td>{t.kind.clone()}</td>
                                            <td>{t.date.clone()}</td>
                                            <td><StatusIndicator status=t.status.clone() /></td>
                                            <td>
                                                <button
                                                    class="btn btn-sm btn-success me-1"
                                                    disabled={!pending}
                                                    on:click=move |_| desk.update(|d| d.request(TransactionAction::Approve, id))
                                                >
                                                    "Approve"
                                                </button>
                                                <button
                                                    class="btn btn-sm btn-danger"
                                                    disabled={!pending}
                                                    on:click=move |_| desk.update(|d| d.request(TransactionAction::Reject, id))
                                                >
                                                    "Reject"
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
                <div class="col">
                    <div class="card p-3">
                        <h5>"Internal Notes"</h5>
                        <NoteEntry on_add=on_note />
                    </div>
                </div>
                <div class="col"><AuditLogView entries=audit /></div>
            </div>

            {move || desk.with(|d| d.pending().map(|p| p.prompt())).map(|message| view! {
                <ConfirmModal message on_confirm on_cancel />
            })}
        </div>
    }
}
