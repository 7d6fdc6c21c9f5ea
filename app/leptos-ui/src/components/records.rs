//! Read-only displays: audit log, activity timeline, customer profile card.

use lc_api_types::Activity;
use lc_core::widgets::audit::NO_ACTIONS;
use lc_core::widgets::customers::NO_ACTIVITY;
use lc_core::widgets::{AuditEntry, ProfileCard};
use leptos::prelude::*;

#[component]
pub fn AuditLogView(#[prop(into)] entries: Signal<Vec<AuditEntry>>) -> impl IntoView {
    view! {
        <div class="audit-log card p-3">
            <h5>"Audit Log"</h5>
            {move || {
                let entries = entries.get();
                if entries.is_empty() {
                    view! { <p class="text-muted">{NO_ACTIONS}</p> }.into_any()
                } else {
                    view! {
                        <ul class="list-group">
                            {entries
                                .into_iter()
                                .map(|e| view! {
                                    <li class="list-group-item">
                                        <strong>{e.user}</strong>" "{e.action}
                                        <span class="text-muted float-end">{e.timestamp}</span>
                                    </li>
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

/// Activities newest first. Callers pass them already ordered.
#[component]
pub fn ActivityTimeline(#[prop(into)] activities: Signal<Vec<Activity>>) -> impl IntoView {
    view! {
        <div class="timeline card p-3">
            <h5>"Communication Timeline"</h5>
            {move || {
                let activities = activities.get();
                if activities.is_empty() {
                    view! { <p class="text-muted">{NO_ACTIVITY}</p> }.into_any()
                } else {
                    view! {
                        <ul class="timeline-list">
                            {activities
                                .into_iter()
                                .map(|a| view! {
                                    <li class="timeline-item">
                                        <span class="timeline-date">{a.date}</span>
                                        <span class="timeline-text">{a.activity}</span>
                                    </li>
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

#[component]
pub fn ProfileCardView(card: ProfileCard) -> impl IntoView {
    view! {
        <div class="profile-card card p-3">
            <h4>{card.name}</h4>
            <p><strong>"Contact: "</strong>{card.contact}</p>
            <p><strong>"Segment: "</strong>{card.segment}</p>
            <p><strong>"Relationship Score: "</strong>{card.relationship_score}</p>
        </div>
    }
}
