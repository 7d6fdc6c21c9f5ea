use gloo_timers::future::TimeoutFuture;
use lc_core::widgets::{BulkReminder, ReminderChannel, ReminderSender, SimulatedSender};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::state::{use_console_state, Mounted};

/// Delay before the simulated gateway answers, so the busy state is visible.
const SIMULATED_LATENCY_MS: u32 = 1_500;

/// Send payment reminders to every overdue customer over SMS or email.
#[component]
pub fn BulkReminderTool() -> impl IntoView {
    let state = use_console_state();
    let mounted = Mounted::track();
    let tool = RwSignal::new(BulkReminder::new());

    let send = move |channel: ReminderChannel| {
        let Some(channel) = tool.try_update(|t| t.begin_send(channel)).flatten() else {
            return;
        };
        let mounted = mounted.clone();
        spawn_local(async move {
            TimeoutFuture::new(SIMULATED_LATENCY_MS).await;
            let result = SimulatedSender.send(channel).await;
            if !mounted.get() {
                return;
            }
            if let Some(notice) = tool.try_update(|t| t.finish_send(channel, result).notice.clone()) {
                state.notify(notice);
            }
        });
    };
    let send_sms = send.clone();

    view! {
        <div class="bulk-reminder card p-3">
            <h5>"Bulk Reminders"</h5>
            <div class="btn-group">
                <button
                    class="btn btn-outline-primary"
                    disabled=move || tool.with(BulkReminder::is_sending)
                    on:click=move |_| send_sms(ReminderChannel::Sms)
                >
                    "Send "{ReminderChannel::Sms.label()}
                </button>
                <button
                    class="btn btn-outline-primary"
                    disabled=move || tool.with(BulkReminder::is_sending)
                    on:click=move |_| send(ReminderChannel::Email)
                >
                    "Send "{ReminderChannel::Email.label()}
                </button>
            </div>
            {move || tool.with(BulkReminder::is_sending).then(|| view! {
                <p class="text-muted">"Sending..."</p>
            })}
            {move || tool.with(|t| t.last().cloned()).map(|outcome| view! {
                <p class=outcome.notice.level.css_class()>
                    {outcome.channel.label()}": "{outcome.notice.message}
                </p>
            })}
        </div>
    }
}
