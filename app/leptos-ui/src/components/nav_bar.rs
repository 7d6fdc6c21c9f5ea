use leptos::prelude::*;

use crate::state::use_console_state;

/// Top-level console pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Loans,
    Repayments,
    Assigned,
    Customers,
    Disbursements,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Loans,
        Tab::Repayments,
        Tab::Assigned,
        Tab::Customers,
        Tab::Disbursements,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Loans => "Loan History",
            Tab::Repayments => "Repayments",
            Tab::Assigned => "My Collections",
            Tab::Customers => "Customers",
            Tab::Disbursements => "Disbursements",
        }
    }

    /// Keyboard shortcut letter shown next to the label.
    pub fn shortcut(self) -> &'static str {
        match self {
            Tab::Loans => "L",
            Tab::Repayments => "R",
            Tab::Assigned => "M",
            Tab::Customers => "C",
            Tab::Disbursements => "D",
        }
    }
}

/// Inline SVG icon for a nav item. Lucide-style 18x18 stroke icons.
fn nav_icon(tab: Tab) -> impl IntoView {
    let svg = match tab {
        // file-text
        Tab::Loans => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M14 2H6a2 2 0 00-2 2v16a2 2 0 002 2h12a2 2 0 002-2V8z"/><polyline points="14 2 14 8 20 8"/><line x1="16" y1="13" x2="8" y2="13"/><line x1="16" y1="17" x2="8" y2="17"/></svg>"#,
        // calendar
        Tab::Repayments => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect x="3" y="4" width="18" height="18" rx="2"/><line x1="16" y1="2" x2="16" y2="6"/><line x1="8" y1="2" x2="8" y2="6"/><line x1="3" y1="10" x2="21" y2="10"/></svg>"#,
        // clipboard-check
        Tab::Assigned => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M16 4h2a2 2 0 012 2v14a2 2 0 01-2 2H6a2 2 0 01-2-2V6a2 2 0 012-2h2"/><rect x="8" y="2" width="8" height="4" rx="1"/><polyline points="9 14 11 16 15 12"/></svg>"#,
        // users
        Tab::Customers => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M17 21v-2a4 4 0 00-4-4H5a4 4 0 00-4 4v2"/><circle cx="9" cy="7" r="4"/><path d="M23 21v-2a4 4 0 00-3-3.87"/><path d="M16 3.13a4 4 0 010 7.75"/></svg>"#,
        // credit-card
        Tab::Disbursements => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect x="1" y="4" width="22" height="16" rx="2"/><line x1="1" y1="10" x2="23" y2="10"/></svg>"#,
    };
    view! { <span class="sidebar-item-icon" inner_html=svg></span> }
}

#[component]
fn NavItem(tab: Tab, current_tab: ReadSignal<Tab>, set_current_tab: WriteSignal<Tab>) -> impl IntoView {
    view! {
        <button
            class="sidebar-item"
            class:active=(move || current_tab.get() == tab)
            on:click=move |_| set_current_tab.set(tab)
        >
            {nav_icon(tab)}
            <span class="sidebar-item-label">{tab.label()}</span>
            <span class="sidebar-shortcut-badge">{tab.shortcut()}</span>
        </button>
    }
}

#[component]
pub fn NavBar(current_tab: ReadSignal<Tab>, set_current_tab: WriteSignal<Tab>) -> impl IntoView {
    let state = use_console_state();

    view! {
        <aside class="sidebar" aria-label="Main navigation">
            <div class="sidebar-header">
                <div class="sidebar-brand">
                    <div class="sidebar-brand-icon" aria-hidden="true">"LC"</div>
                    <div>
                        <div class="sidebar-brand-name">"Loan Console"</div>
                        <div class="sidebar-brand-badge">"v0.1.0"</div>
                    </div>
                </div>
            </div>

            <nav class="sidebar-nav" aria-label="Page navigation">
                <div class="sidebar-section-label">"Lending"</div>
                <NavItem tab=Tab::Loans current_tab set_current_tab />
                <NavItem tab=Tab::Repayments current_tab set_current_tab />
                <NavItem tab=Tab::Assigned current_tab set_current_tab />

                <div class="sidebar-section-label">"Relationships"</div>
                <NavItem tab=Tab::Customers current_tab set_current_tab />

                <div class="sidebar-section-label">"Finance"</div>
                <NavItem tab=Tab::Disbursements current_tab set_current_tab />
            </nav>

            <div class="sidebar-footer">
                <span class="sidebar-user">{move || state.user.get().unwrap_or_default()}</span>
                <button class="sidebar-footer-link" on:click=move |_| state.sign_out()>
                    "Log out"
                </button>
            </div>
        </aside>
    }
}
