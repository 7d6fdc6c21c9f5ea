use lc_core::format::PLACEHOLDER;
use lc_core::widgets::loan_application::STEPS;
use lc_core::widgets::{LoanApplication, RepaymentMode};
use lc_core::ResourceState;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::spinner::fetch_status;
use crate::state::{use_console_state, Mounted};

fn money(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.2}")).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Three-step loan application. `on_submitted` fires after a successful
/// submission so the owner can refresh its list.
#[component]
pub fn LoanApplicationPanel(on_submitted: Callback<()>, on_close: Callback<()>) -> impl IntoView {
    let state = use_console_state();
    let mounted = Mounted::track();
    let app = RwSignal::new(LoanApplication::new());

    if let Some(ticket) = app.try_update(LoanApplication::activate) {
        let api = state.api();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api.loan_form_options().await;
            if mounted.get() {
                app.update(|a| {
                    a.settle(ticket, result);
                });
            }
        });
    }

    // Structure follows the fetch state and the step; field edits do not
    // rebuild it.
    let options = Memo::new(move |_| app.with(|a| a.state().clone()));
    let step = Memo::new(move |_| app.with(LoanApplication::step));

    let submit = move |_: leptos::ev::MouseEvent| {
        let Some(Ok(Some(request))) = app.try_update(LoanApplication::begin_submit) else {
            return;
        };
        let api = state.api();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api.create_loan(&request).await;
            if !mounted.get() {
                return;
            }
            if let Some(notice) = app.try_update(|a| a.finish_submit(result)) {
                let ok = notice.is_success();
                state.notify(notice);
                if ok {
                    on_submitted.run(());
                }
            }
        });
    };

    let customer_step = move || {
        let customers = options.with(|st| st.data().map(|o| o.customers.clone()).unwrap_or_default());
        view! {
            <section>
                <h5>"Step 1: Select Customer"</h5>
                <select
                    class="form-select mb-2"
                    prop:value=move || app.with(|a| a.selected_customer().map(|c| c.customer_id.to_string()).unwrap_or_default())
                    on:change=move |ev| app.update(|a| a.select_customer(event_target_value(&ev).parse().ok()))
                >
                    <option value="">"-- Select Customer --"</option>
                    {customers
                        .into_iter()
                        .map(|c| {
                            let label = format!("{} - {}", c.full_name, c.customer_code);
                            view! { <option value=c.customer_id.to_string()>{label}</option> }
                        })
                        .collect_view()}
                </select>
                {move || app.with(|a| a.selected_customer().cloned()).map(|c| view! {
                    <div class="customer-info">
                        <p><strong>"Name: "</strong>{c.full_name}</p>
                        <p><strong>"Code: "</strong>{c.customer_code}</p>
                        <p><strong>"Phone: "</strong>{c.phone}</p>
                        <p><strong>"Email: "</strong>{c.email.unwrap_or_else(|| PLACEHOLDER.to_string())}</p>
                    </div>
                })}
            </section>
        }
    };

    let terms_step = move || {
        let loan_types = options.with(|st| st.data().map(|o| o.loan_types.clone()).unwrap_or_default());
        view! {
            <section>
                <h5>"Step 2: Loan Details"</h5>
                <label class="form-label">"Loan Amount *"</label>
                <input
                    type="number"
                    class="form-control mb-2"
                    min="1000"
                    prop:value=move || app.with(|a| a.principal().to_string())
                    on:input=move |ev| app.update(|a| a.set_principal(event_target_value(&ev)))
                />
                <label class="form-label">"Loan Type *"</label>
                <select
                    class="form-select mb-2"
                    prop:value=move || app.with(|a| a.loan_type().map(|t| t.to_string()).unwrap_or_default())
                    on:change=move |ev| app.update(|a| a.select_loan_type(event_target_value(&ev).parse().ok()))
                >
                    <option value="">"-- Select Loan Type --"</option>
                    {loan_types
                        .into_iter()
                        .map(|t| view! { <option value=t.loan_type_id.to_string()>{t.name}</option> })
                        .collect_view()}
                </select>
                <label class="form-label">"Repayment Period (Months) *"</label>
                <input
                    type="number"
                    class="form-control mb-2"
                    min="1"
                    max="60"
                    prop:value=move || app.with(|a| a.months().to_string())
                    on:input=move |ev| app.update(|a| a.set_months(event_target_value(&ev)))
                />
                <label class="form-label">"Interest Rate (%) *"</label>
                <input
                    type="number"
                    class="form-control mb-2"
                    step="0.1"
                    prop:value=move || app.with(|a| a.interest().to_string())
                    on:input=move |ev| app.update(|a| a.set_interest(event_target_value(&ev)))
                />
                <label class="form-label">"Monthly EMI (Auto-calculated)"</label>
                <input
                    class="form-control mb-2"
                    readonly
                    prop:value=move || app.with(|a| money(a.emi()))
                />
                <label class="form-label">"Repayment Mode *"</label>
                <select
                    class="form-select mb-2"
                    prop:value=move || app.with(|a| a.mode().map(RepaymentMode::as_str).unwrap_or_default())
                    on:change=move |ev| app.update(|a| a.set_mode(event_target_value(&ev).parse().ok()))
                >
                    <option value="">"-- Select Repayment Mode --"</option>
                    {RepaymentMode::ALL
                        .into_iter()
                        .map(|m| view! { <option value=m.as_str()>{m.label()}</option> })
                        .collect_view()}
                </select>
            </section>
        }
    };

    let review_step = move || {
        view! {
            <section>
                <h5>"Step 3: Review & Submit"</h5>
                {move || app.with(|a| {
                    let customer = a
                        .selected_customer()
                        .map(|c| format!("{} ({})", c.full_name, c.customer_code))
                        .unwrap_or_else(|| PLACEHOLDER.to_string());
                    view! {
                        <dl class="review">
                            <dt>"Customer"</dt><dd>{customer}</dd>
                            <dt>"Loan Amount"</dt><dd>{a.principal().to_string()}</dd>
                            <dt>"Interest Rate"</dt><dd>{a.interest().to_string()}"% per annum"</dd>
                            <dt>"Repayment Period"</dt><dd>{a.months().to_string()}" months"</dd>
                            <dt>"Monthly EMI"</dt><dd>{money(a.emi())}</dd>
                            <dt>"Repayment Mode"</dt><dd>{a.mode().map(RepaymentMode::label).unwrap_or(PLACEHOLDER)}</dd>
                            <dt>"Total Payable"</dt><dd>{money(a.total_payable())}</dd>
                        </dl>
                    }
                })}
                <label class="form-label">"Created By (User ID) *"</label>
                <input
                    type="number"
                    class="form-control mb-2"
                    placeholder="Enter your user ID"
                    prop:value=move || app.with(|a| a.created_by().to_string())
                    on:input=move |ev| app.update(|a| a.set_created_by(event_target_value(&ev)))
                />
                <button
                    class="btn btn-primary"
                    disabled=move || app.with(LoanApplication::is_submitting)
                    on:click=submit.clone()
                >
                    {move || if app.with(LoanApplication::is_submitting) { "Submitting..." } else { "Submit Application" }}
                </button>
                {move || app.with(|a| a.error().map(ToString::to_string)).map(|e| view! {
                    <p class="text-danger mt-2">{e}</p>
                })}
            </section>
        }
    };

    view! {
        <div class="loan-application card p-3 mb-3">
            <div class="d-flex justify-content-between">
                <h4>"New Loan Application"</h4>
                <button class="btn-close" aria-label="Close" on:click=move |_| on_close.run(())></button>
            </div>
            <div class="progress mb-3">
                <div
                    class="progress-bar"
                    style=move || format!("width: {}%", app.with(LoanApplication::progress))
                ></div>
            </div>
            {move || {
                if let Some(status) = options.with(|st| fetch_status(st, "Loading customers and loan types...")) {
                    return status;
                }
                match step.get() {
                    1 => customer_step().into_any(),
                    2 => terms_step().into_any(),
                    _ => review_step().into_any(),
                }
            }}
            <div class="d-flex gap-2 mt-3">
                {move || (step.get() > 1).then(|| view! {
                    <button class="btn btn-secondary" on:click=move |_| app.update(LoanApplication::prev)>"Previous"</button>
                })}
                {move || (step.get() < STEPS && matches!(options.get(), ResourceState::Ready(_))).then(|| view! {
                    <button class="btn btn-primary" on:click=move |_| app.update(LoanApplication::next)>"Next"</button>
                })}
            </div>
            {move || app.with(|a| a.outcome().cloned()).map(|notice| view! {
                <p class=notice.level.css_class()>{notice.message}</p>
            })}
        </div>
    }
}
