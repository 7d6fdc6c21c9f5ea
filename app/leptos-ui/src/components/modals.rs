use lc_core::widgets::EscalationDraft;
use leptos::prelude::*;

use crate::state::use_console_state;

/// Escalation notes for one installment. The parent mounts the modal and is
/// told through `on_close` when it should go away.
#[component]
pub fn EscalationModal(title: String, on_close: Callback<()>) -> impl IntoView {
    let state = use_console_state();
    let draft = RwSignal::new(EscalationDraft::new());
    draft.update(EscalationDraft::open);

    let close = move || {
        draft.update(EscalationDraft::close);
        on_close.run(());
    };
    let save = move |_| {
        if let Some(Ok(notice)) = draft.try_update(EscalationDraft::save) {
            state.notify(notice);
            close();
        }
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| close()></div>
        <div class="modal-dialog" role="dialog" aria-modal="true">
            <div class="modal-header">
                <h5 class="modal-title">{title}</h5>
                <button class="btn-close" aria-label="Close" on:click=move |_| close()></button>
            </div>
            <div class="modal-body">
                <textarea
                    class="form-control"
                    rows="4"
                    placeholder="Describe the escalation..."
                    prop:value=move || draft.with(|d| d.notes().to_string())
                    on:input=move |ev| draft.update(|d| d.set_notes(event_target_value(&ev)))
                ></textarea>
                {move || draft.with(|d| d.error().map(|e| view! {
                    <div class="text-danger field-error">{e.to_string()}</div>
                }))}
            </div>
            <div class="modal-footer">
                <button class="btn btn-secondary" on:click=move |_| close()>"Cancel"</button>
                <button class="btn btn-primary" on:click=save>"Save Notes"</button>
            </div>
        </div>
    }
}

/// Yes/no prompt replacing a blocking browser dialog.
#[component]
pub fn ConfirmModal(
    message: String,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="modal-backdrop" on:click=move |_| on_cancel.run(())></div>
        <div class="modal-dialog modal-sm" role="alertdialog" aria-modal="true">
            <div class="modal-body">
                <p>{message}</p>
            </div>
            <div class="modal-footer">
                <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                <button class="btn btn-primary" on:click=move |_| on_confirm.run(())>"Confirm"</button>
            </div>
        </div>
    }
}
