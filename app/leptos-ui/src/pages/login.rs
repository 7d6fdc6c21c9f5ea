use lc_core::Notice;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::state::use_console_state;

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = use_console_state();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let email = email.get_untracked().trim().to_string();
        let password = password.get_untracked();
        if email.is_empty() || password.is_empty() {
            set_error_msg.set(Some("Email and password are required".into()));
            return;
        }
        set_error_msg.set(None);
        set_submitting.set(true);

        let api = state.api();
        let session = state.session();
        spawn_local(async move {
            match api.login(&email, &password).await {
                Ok(login) if !login.token.trim().is_empty() => match session.store(&login) {
                    Ok(()) => {
                        tracing::info!(user = %login.user.username, "signed in");
                        state.refresh_session();
                        state.notify(Notice::success("Login successful!"));
                    }
                    Err(e) => set_error_msg.set(Some(format!("Could not save session: {e}"))),
                },
                Ok(_) => set_error_msg.set(Some(LOGIN_FAILED.into())),
                Err(err) => {
                    tracing::warn!(error = %err, "login failed");
                    set_error_msg.set(Some(err.action_message(LOGIN_FAILED)));
                }
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-card card p-4" on:submit=submit>
                <h3>"Loan Console"</h3>
                <p class="text-muted">"Sign in to continue"</p>
                <input
                    type="email"
                    class="form-control mb-2"
                    placeholder="Email"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    class="form-control mb-2"
                    placeholder="Password"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || error_msg.get().map(|e| view! { <div class="text-danger mb-2">{e}</div> })}
                <button type="submit" class="btn btn-primary w-100" disabled=submitting>
                    {move || if submitting.get() { "Signing in..." } else { "Login" }}
                </button>
            </form>
        </div>
    }
}
