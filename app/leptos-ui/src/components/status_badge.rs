use lc_core::widgets::{BadgeTone, IndicatorColor};
use leptos::prelude::*;

#[component]
pub fn StatusBadge(status: String) -> impl IntoView {
    let class = BadgeTone::for_status(&status).css_class();
    view! { <span class=class>{status}</span> }
}

/// Coloured dot followed by the status text.
#[component]
pub fn StatusIndicator(status: String) -> impl IntoView {
    let style = format!(
        "display:inline-block;width:10px;height:10px;border-radius:50%;margin-right:6px;background-color:{}",
        IndicatorColor::for_status(&status).css()
    );
    view! {
        <span class="status-indicator">
            <span style=style></span>
            {status}
        </span>
    }
}
