use lc_api_types::Customer;
use lc_core::widgets::{CustomerEditor, CustomerField, NewCustomerForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::state::{use_console_state, Mounted};

const NEW_FIELDS: [CustomerField; 6] = [
    CustomerField::Code,
    CustomerField::FullName,
    CustomerField::Nickname,
    CustomerField::Phone,
    CustomerField::Email,
    CustomerField::Aadhar,
];

const EDIT_FIELDS: [CustomerField; 6] = [
    CustomerField::FullName,
    CustomerField::Phone,
    CustomerField::Email,
    CustomerField::Nickname,
    CustomerField::Aadhar,
    CustomerField::Code,
];

fn input_type(field: CustomerField) -> &'static str {
    if field == CustomerField::Email {
        "email"
    } else {
        "text"
    }
}

/// New customer form. The created record is handed to `on_created`.
#[component]
pub fn AddCustomerForm(on_created: Callback<Customer>) -> impl IntoView {
    let state = use_console_state();
    let mounted = Mounted::track();
    let form = RwSignal::new(NewCustomerForm::new());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(Ok(Some(body))) = form.try_update(NewCustomerForm::begin_create) else {
            return;
        };
        let api = state.api();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api.create_customer(&body).await;
            if !mounted.get() {
                return;
            }
            if let Some((notice, created)) = form.try_update(|f| f.finish_create(result)) {
                state.notify(notice);
                if let Some(customer) = created {
                    on_created.run(customer);
                }
            }
        });
    };

    let field_input = move |field: CustomerField| {
        let label = if field.is_required() {
            format!("{} *", field.label())
        } else {
            field.label().to_string()
        };
        view! {
            <div class="col-md-6">
                <label class="form-label">{label.clone()}</label>
                <input
                    class="form-control"
                    class:is-invalid=(move || form.with(|f| f.is_missing(field)))
                    type=input_type(field)
                    placeholder=label
                    prop:value=move || form.with(|f| f.value(field).to_string())
                    on:input=move |ev| form.update(|f| f.set(field, event_target_value(&ev)))
                />
                {move || form.with(|f| f.is_missing(field)).then(|| view! {
                    <div class="invalid-feedback">"This field is required"</div>
                })}
            </div>
        }
    };

    view! {
        <form class="add-customer card p-3 mb-3 row g-3" on:submit=submit>
            <h5>"Add New Customer"</h5>
            {NEW_FIELDS.into_iter().map(field_input).collect_view()}
            <div class="col-12">
                <label class="form-label">"Address"</label>
                <textarea
                    class="form-control"
                    rows="3"
                    placeholder="Enter full address"
                    prop:value=move || form.with(|f| f.value(CustomerField::Address).to_string())
                    on:input=move |ev| form.update(|f| f.set(CustomerField::Address, event_target_value(&ev)))
                ></textarea>
            </div>
            <div class="col-12">
                <label class="form-label">"Document URL"</label>
                <input
                    class="form-control"
                    placeholder="Link to Aadhar/ID document (optional)"
                    prop:value=move || form.with(|f| f.value(CustomerField::DocumentUrl).to_string())
                    on:input=move |ev| form.update(|f| f.set(CustomerField::DocumentUrl, event_target_value(&ev)))
                />
            </div>
            {move || form.with(|f| f.error().map(ToString::to_string)).map(|e| view! {
                <p class="text-danger">{e}</p>
            })}
            <div class="col-12">
                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled=move || form.with(NewCustomerForm::is_saving)
                >
                    {move || if form.with(NewCustomerForm::is_saving) { "Saving..." } else { "Save Customer" }}
                </button>
            </div>
            {move || form.with(|f| f.outcome().cloned()).map(|notice| view! {
                <p class=notice.level.css_class()>{notice.message}</p>
            })}
        </form>
    }
}

/// Read-only customer details with an Edit/Save toggle. The server's copy of
/// a saved edit goes to `on_updated`.
#[component]
pub fn EditCustomerCard(customer: Customer, on_updated: Callback<Customer>) -> impl IntoView {
    let state = use_console_state();
    let mounted = Mounted::track();
    let editor = RwSignal::new(CustomerEditor::new(&customer));
    let editing = Memo::new(move |_| editor.with(CustomerEditor::is_editing));

    let toggle = move |_| {
        if !editor.with_untracked(CustomerEditor::is_editing) {
            editor.update(CustomerEditor::edit);
            return;
        }
        let Some(Ok(Some((id, body)))) = editor.try_update(CustomerEditor::begin_save) else {
            return;
        };
        let api = state.api();
        let mounted = mounted.clone();
        spawn_local(async move {
            let result = api.update_customer(id, &body).await;
            if !mounted.get() {
                return;
            }
            if let Some((notice, updated)) = editor.try_update(|e| e.finish_save(result)) {
                state.notify(notice);
                if let Some(customer) = updated {
                    on_updated.run(customer);
                }
            }
        });
    };

    let field_input = move |field: CustomerField| {
        view! {
            <div class="col-md-6">
                <label class="form-label fw-bold">{field.label()}</label>
                <input
                    class="form-control"
                    type=input_type(field)
                    disabled=move || !editing.get()
                    prop:value=move || editor.with(|e| e.value(field).to_string())
                    on:input=move |ev| editor.update(|e| e.set(field, event_target_value(&ev)))
                />
            </div>
        }
    };

    view! {
        <div class="edit-customer card mb-3">
            <div class="card-header d-flex justify-content-between align-items-center">
                <span>"Edit Customer Info"</span>
                <div>
                    {move || editing.get().then(|| view! {
                        <button
                            type="button"
                            class="btn btn-sm btn-outline-secondary me-1"
                            on:click=move |_| editor.update(CustomerEditor::cancel)
                        >
                            "Cancel"
                        </button>
                    })}
                    <button
                        type="button"
                        class="btn btn-sm"
                        class:btn-success=(move || editing.get())
                        class:btn-light=(move || !editing.get())
                        disabled=move || editor.with(CustomerEditor::is_saving)
                        on:click=toggle
                    >
                        {move || match (editor.with(CustomerEditor::is_saving), editing.get()) {
                            (true, _) => "Saving...",
                            (false, true) => "Save",
                            (false, false) => "Edit",
                        }}
                    </button>
                </div>
            </div>
            <div class="card-body">
                {move || editor.with(|e| e.error().map(str::to_string)).map(|e| view! {
                    <div class="alert alert-danger">{e}</div>
                })}
                <div class="row g-3">
                    {EDIT_FIELDS.into_iter().map(field_input).collect_view()}
                    <div class="col-12">
                        <label class="form-label fw-bold">"Address"</label>
                        <textarea
                            class="form-control"
                            disabled=move || !editing.get()
                            prop:value=move || editor.with(|e| e.value(CustomerField::Address).to_string())
                            on:input=move |ev| editor.update(|e| e.set(CustomerField::Address, event_target_value(&ev)))
                        ></textarea>
                    </div>
                </div>
            </div>
        </div>
    }
}
