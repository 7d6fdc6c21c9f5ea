use lc_core::ResourceState;
use leptos::prelude::*;

/// Animated SVG loading spinner.
/// Sizes: "sm" (16px), "md" (24px), "lg" (32px)
#[component]
pub fn Spinner(
    #[prop(default = "md")] size: &'static str,
    #[prop(default = "")] label: &'static str,
) -> impl IntoView {
    let px = match size {
        "sm" => 16,
        "lg" => 32,
        _ => 24,
    };
    let svg = format!(
        r##"<svg width="{px}" height="{px}" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg" class="svg-spinner">
  <circle cx="12" cy="12" r="10" fill="none" stroke="rgba(13,110,253,0.15)" stroke-width="2.5"/>
  <path d="M12 2a10 10 0 0 1 10 10" fill="none" stroke="#0d6efd" stroke-width="2.5" stroke-linecap="round">
    <animateTransform attributeName="transform" type="rotate" from="0 12 12" to="360 12 12" dur="0.9s" repeatCount="indefinite"/>
  </path>
</svg>"##
    );
    let size_class = format!("spinner-container spinner-container-{}", size);
    view! {
        <div class={size_class} role="status">
            <span class="svg-spinner-wrap" inner_html=svg></span>
            {(!label.is_empty()).then(|| view! {
                <span class="spinner-label">{label}</span>
            })}
        </div>
    }
}

/// Inline failure line for a widget whose fetch failed.
#[component]
pub fn LoadError(message: String) -> impl IntoView {
    view! { <p class="text-danger load-error">{message}</p> }
}

/// Spinner while loading, the failure line once failed, `None` when ready.
pub fn fetch_status<T>(state: &ResourceState<T>, loading_label: &'static str) -> Option<AnyView> {
    match state {
        ResourceState::Loading => Some(view! { <Spinner label=loading_label /> }.into_any()),
        ResourceState::Failed(message) => {
            Some(view! { <LoadError message=message.clone() /> }.into_any())
        }
        ResourceState::Ready(_) => None,
    }
}
