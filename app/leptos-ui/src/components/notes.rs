//! Local-only inputs: notes, manual payments and tags. None of these talk to
//! the backend; accepted input is handed to the parent or confirmed with a
//! notice.

use lc_core::widgets::{ManualPaymentDraft, NoteDraft, TagSet};
use leptos::prelude::*;

use crate::state::use_console_state;

#[component]
fn FieldError(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    move || error.get().map(|e| view! { <div class="text-danger field-error">{e}</div> })
}

/// Free-text note box. Accepted notes go to `on_add`.
#[component]
pub fn NoteEntry(
    on_add: Callback<String>,
    #[prop(default = "Add a note...")] placeholder: &'static str,
) -> impl IntoView {
    let draft = RwSignal::new(NoteDraft::new());
    let error = Signal::derive(move || draft.with(|d| d.error().map(ToString::to_string)));

    let submit = move |_| {
        if let Some(Ok(note)) = draft.try_update(NoteDraft::submit) {
            on_add.run(note);
        }
    };

    view! {
        <div class="note-entry">
            <textarea
                class="form-control"
                rows="3"
                placeholder=placeholder
                prop:value=move || draft.with(|d| d.text().to_string())
                on:input=move |ev| draft.update(|d| d.set_text(event_target_value(&ev)))
            ></textarea>
            <FieldError error />
            <button class="btn btn-primary mt-2" on:click=submit>"Add Note"</button>
        </div>
    }
}

/// Record a payment taken outside the system. Confirmation only.
#[component]
pub fn ManualPaymentForm() -> impl IntoView {
    let state = use_console_state();
    let draft = RwSignal::new(ManualPaymentDraft::new());
    let error = Signal::derive(move || draft.with(|d| d.error().map(ToString::to_string)));

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(Ok(notice)) = draft.try_update(ManualPaymentDraft::submit) {
            state.notify(notice);
        }
    };

    view! {
        <form class="manual-payment card p-3" on:submit=submit>
            <h5>"Add Manual Payment"</h5>
            <input
                type="number"
                class="form-control"
                placeholder="Enter amount"
                prop:value=move || draft.with(|d| d.amount().to_string())
                on:input=move |ev| draft.update(|d| d.set_amount(event_target_value(&ev)))
            />
            <FieldError error />
            <button type="submit" class="btn btn-success mt-2">"Submit"</button>
        </form>
    }
}

/// Tag chips with an add box. The full tag list goes to `on_change` after
/// every accepted add or remove.
#[component]
pub fn TagEditor(tags: Vec<String>, on_change: Callback<Vec<String>>) -> impl IntoView {
    let set = RwSignal::new(TagSet::new(tags));
    let error = Signal::derive(move || set.with(|s| s.error().map(ToString::to_string)));

    let add = move || {
        if let Some(Ok(())) = set.try_update(TagSet::add) {
            on_change.run(set.with_untracked(|s| s.tags().to_vec()));
        }
    };
    let remove = move |tag: String| {
        if set.try_update(|s| s.remove(&tag)).unwrap_or(false) {
            on_change.run(set.with_untracked(|s| s.tags().to_vec()));
        }
    };

    view! {
        <div class="tag-editor">
            <div class="tag-list">
                {move || set.with(|s| {
                    s.tags()
                        .iter()
                        .cloned()
                        .map(|tag| {
                            let label = tag.clone();
                            view! {
                                <span class="badge bg-secondary me-1">
                                    {label}
                                    <button
                                        class="tag-remove"
                                        aria-label="Remove tag"
                                        on:click=move |_| remove(tag.clone())
                                    >
                                        "\u{00d7}"
                                    </button>
                                </span>
                            }
                        })
                        .collect_view()
                })}
            </div>
            <div class="input-group mt-2">
                <input
                    class="form-control"
                    placeholder="New tag"
                    prop:value=move || set.with(|s| s.input().to_string())
                    on:input=move |ev| set.update(|s| s.set_input(event_target_value(&ev)))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            add();
                        }
                    }
                />
                <button class="btn btn-outline-primary" on:click=move |_| add()>"Add Tag"</button>
            </div>
            <FieldError error />
        </div>
    }
}
