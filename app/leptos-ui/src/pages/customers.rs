use std::collections::HashMap;

use lc_api_types::{Activity, Customer, CustomerId};
use lc_core::format::or_placeholder;
use lc_core::widgets::customers::{timeline, NO_CUSTOMERS};
use lc_core::widgets::CustomerDirectory;
use lc_core::Notice;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::customer_forms::{AddCustomerForm, EditCustomerCard};
use crate::components::document_uploader::DocumentUploaderPanel;
use crate::components::notes::{NoteEntry, TagEditor};
use crate::components::records::{ActivityTimeline, ProfileCardView};
use crate::components::spinner::fetch_status;
use crate::state::{today, use_console_state, Mounted};

#[component]
pub fn CustomersPage() -> impl IntoView {
    let state = use_console_state();
    let mounted = Mounted::track();
    let directory = RwSignal::new(CustomerDirectory::new());
    let (selected, set_selected) = signal(Option::<CustomerId>::None);
    // Notes logged this session, per customer. Not sent to the backend.
    let activities = RwSignal::new(HashMap::<CustomerId, Vec<Activity>>::new());

    if let Some(ticket) = directory.try_update(CustomerDirectory::activate) {
        let api = state.api();
        spawn_local(async move {
            let result = api.list_customers().await;
            if mounted.get() {
                directory.update(|d| {
                    d.settle(ticket, result);
                });
            }
        });
    }

    let select = move |id: CustomerId| {
        directory.update(|d| d.select(Some(id)));
        set_selected.set(Some(id));
    };

    let (adding, set_adding) = signal(false);
    let on_created = Callback::new(move |customer: Customer| directory.update(|d| d.insert(customer)));
    let on_updated = Callback::new(move |customer: Customer| {
        directory.update(|d| {
            d.apply_update(customer);
        });
    });

    view! {
        <div class="page customers-page">
            <div class="page-header">
                <h2>"Customers"</h2>
                <button class="btn btn-primary" on:click=move |_| set_adding.update(|open| *open = !*open)>
                    {move || if adding.get() { "Close Form" } else { "Add Customer" }}
                </button>
            </div>
            {move || adding.get().then(|| view! { <AddCustomerForm on_created /> })}
            {move || directory.with(|d| {
                if let Some(status) = fetch_status(d.state(), "Loading customers...") {
                    return status;
                }
                let customers = d.state().data().cloned().unwrap_or_default();
                if customers.is_empty() {
                    return view! { <p class="text-muted">{NO_CUSTOMERS}</p> }.into_any();
                }
                view! {
                    <table class="table table-hover">
                        <thead>
                            <tr>
                                <th>"Code"</th>
                                <th>"Name"</th>
                                <th>"Phone"</th>
                                <th>"Email"</th>
                                <th>"Segment"</th>
                                <th>"Tags"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {customers
                                .into_iter()
                                .map(|c| {
                                    let id = c.customer_id;
                                    view! {
                                        <tr
                                            class="clickable"
                                            class:table-active=(move || selected.get() == Some(id))
                                            on:click=move |_| select(id)
                                        >
                                            <td>{c.customer_code}</td>
                                            <td>{c.full_name}</td>
                                            <td>{c.phone}</td>
                                            <td>{or_placeholder(c.email.as_deref())}</td>
                                            <td>{or_placeholder(c.segment.as_deref())}</td>
                                            <td>{c.tags.join(", ")}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_any()
            })}

            // Keyed on the selection only, so tag edits do not remount it.
            {move || selected.get().and_then(|id| {
                let customer = directory.with_untracked(|d| d.selected().cloned())?;
                let on_tags = Callback::new(move |tags: Vec<String>| {
                    directory.update(|d| d.set_tags(id, tags));
                });
                let on_note = Callback::new(move |note: String| {
                    activities.update(|all| {
                        all.entry(id).or_default().push(Activity {
                            date: today(),
                            activity: note,
                        });
                    });
                    state.notify(Notice::success("Note added."));
                });
                let log = Signal::derive(move || {
                    timeline(activities.with(|all| all.get(&id).cloned().unwrap_or_default()))
                });
                Some(view! {
                    <div class="row mt-3">
                        <div class="col-md-4">
                            {move || directory.with(CustomerDirectory::profile).map(|card| view! { <ProfileCardView card /> })}
                            <EditCustomerCard customer=customer.clone() on_updated />
                            <div class="card p-3 mt-2">
                                <h5>"Tags"</h5>
                                <TagEditor tags=customer.tags.clone() on_change=on_tags />
                            </div>
                        </div>
                        <div class="col-md-4">
                            <div class="card p-3">
                                <h5>"Log Communication"</h5>
                                <NoteEntry on_add=on_note placeholder="Call summary, visit notes..." />
                            </div>
                            <ActivityTimeline activities=log />
                        </div>
                        <div class="col-md-4">
                            <DocumentUploaderPanel customer=id />
                        </div>
                    </div>
                })
            })}
        </div>
    }
}
