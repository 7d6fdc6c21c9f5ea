use leptos::prelude::*;

pub mod api;
pub mod components;
pub mod pages;
pub mod state;

use components::nav_bar::{NavBar, Tab};
use components::toast_stack::ToastStack;
use wasm_bindgen::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let state = state::provide_console_state();
    let (current_tab, set_current_tab) = signal(Tab::Loans);

    view! {
        {move || if state.signed_in() {
            view! {
                <NavBar current_tab=current_tab set_current_tab=set_current_tab />
                <div class="content">
                    {move || match current_tab.get() {
                        Tab::Loans => view! { <pages::loans::LoansPage /> }.into_any(),
                        Tab::Repayments => view! { <pages::repayments::RepaymentsPage /> }.into_any(),
                        Tab::Assigned => view! { <pages::assigned::AssignedPage /> }.into_any(),
                        Tab::Customers => view! { <pages::customers::CustomersPage /> }.into_any(),
                        Tab::Disbursements => view! { <pages::disbursements::DisbursementsPage /> }.into_any(),
                    }}
                </div>
            }
            .into_any()
        } else {
            view! { <pages::login::LoginPage /> }.into_any()
        }}
        <ToastStack />
    }
}

#[wasm_bindgen(start)]
pub fn mount() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    lc_telemetry::logging::init_browser_logging("lc-console");
    leptos::mount::mount_to_body(App);
}
