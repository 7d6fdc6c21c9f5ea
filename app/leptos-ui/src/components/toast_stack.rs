use leptos::prelude::*;

use crate::state::use_console_state;

/// Stack of visible notices, oldest on top. Each toast dismisses itself
/// after the board's duration or when its close button is clicked.
#[component]
pub fn ToastStack() -> impl IntoView {
    let state = use_console_state();
    let notices = state.notices;

    view! {
        <div class="toast-stack" aria-live="polite">
            {move || notices.with(|board| {
                board
                    .visible()
                    .iter()
                    .map(|posted| {
                        let id = posted.id;
                        let level = posted.notice.level;
                        let message = posted.notice.message.clone();
                        view! {
                            <div class=level.css_class() role="alert">
                                <strong class="notice-prefix">{level.prefix()}</strong>
                                " "
                                <span class="notice-message">{message}</span>
                                <button
                                    class="notice-close"
                                    aria-label="Dismiss"
                                    on:click=move |_| {
                                        notices.update(|b| {
                                            b.dismiss(id);
                                        });
                                    }
                                >
                                    "\u{00d7}"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            })}
        </div>
    }
}
