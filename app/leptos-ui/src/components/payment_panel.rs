use lc_api_types::LoanId;
use lc_core::format::{display_date, rupees};
use lc_core::widgets::{PaymentCollection, PaymentMethod};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::spinner::fetch_status;
use crate::state::{use_console_state, Mounted};

/// Collect a payment against one of a loan's installments.
#[component]
pub fn PaymentPanel(loan: LoanId, on_close: Callback<()>) -> impl IntoView {
    let state = use_console_state();
    let mounted = Mounted::track();
    let collection = RwSignal::new(PaymentCollection::new(loan));

    if let Some(ticket) = collection.try_update(PaymentCollection::activate) {
        let api = state.api();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api.list_schedules().await;
            if mounted.get() {
                collection.update(|c| {
                    c.settle(ticket, result);
                });
            }
        });
    }

    // Only the fetch state drives the form's structure; typing must not
    // rebuild it.
    let schedules = Memo::new(move |_| collection.with(|c| c.state().clone()));

    let collect = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let dispatch = match collection.try_update(PaymentCollection::begin_collect) {
            Some(Ok(Some(dispatch))) => dispatch,
            Some(Err(err)) => {
                state.notify(lc_core::Notice::error(err.to_string()));
                return;
            }
            _ => return,
        };
        let api = state.api();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api.collect_payment(dispatch.schedule, &dispatch.request).await;
            if !mounted.get() {
                return;
            }
            if let Some(notice) = collection.try_update(|c| c.finish_collect(&dispatch, result)) {
                state.notify(notice);
            }
        });
    };

    view! {
        <div class="payment-panel card p-3">
            <div class="d-flex justify-content-between">
                <h5>"Collect Payment - Loan #"{loan}</h5>
                <button class="btn-close" aria-label="Close" on:click=move |_| on_close.run(())></button>
            </div>
            {move || schedules.with(|st| match fetch_status(st, "Loading installments...") {
                Some(status) => status,
                None => {
                    let options = st
                        .data()
                        .map(|list| {
                            list.iter()
                                .map(|s| {
                                    let label = format!(
                                        "#{} - due {} - {}",
                                        s.installment_no,
                                        display_date(&s.due_date),
                                        rupees(&s.total_due)
                                    );
                                    view! { <option value=s.id.to_string()>{label}</option> }
                                })
                                .collect_view()
                        });
                    view! {
                        <form on:submit=collect.clone()>
                            <select
                                class="form-select mb-2"
                                on:change=move |ev| {
                                    let id = event_target_value(&ev).parse().ok();
                                    collection.update(|c| c.select(id));
                                }
                            >
                                <option value="">"Select installment"</option>
                                {options}
                            </select>
                            <select
                                class="form-select mb-2"
                                on:change=move |ev| {
                                    if let Ok(method) = event_target_value(&ev).parse::<PaymentMethod>() {
                                        collection.update(|c| c.set_method(method));
                                    }
                                }
                            >
                                {PaymentMethod::ALL
                                    .into_iter()
                                    .map(|m| view! { <option value=m.as_str()>{m.label()}</option> })
                                    .collect_view()}
                            </select>
                            <input
                                type="number"
                                class="form-control mb-2"
                                placeholder="Amount"
                                prop:value=move || collection.with(|c| c.amount().to_string())
                                on:input=move |ev| collection.update(|c| c.set_amount(event_target_value(&ev)))
                            />
                            <button
                                type="submit"
                                class="btn btn-success"
                                disabled=move || collection.with(PaymentCollection::is_collecting)
                            >
                                {move || if collection.with(PaymentCollection::is_collecting) {
                                    "Collecting..."
                                } else {
                                    "Collect"
                                }}
                            </button>
                        </form>
                    }
                    .into_any()
                }
            })}
        </div>
    }
}
