//! Customer directory, profile card and communication timeline.

use lc_api_types::{Activity, Customer, CustomerId};

use crate::error::ApiError;
use crate::format::{or_placeholder, PLACEHOLDER};
use crate::resource::{FetchTicket, Resource, ResourceState};

pub const CUSTOMERS_FAILED: &str = "Failed to fetch customers.";
pub const NO_CUSTOMERS: &str = "No customers found.";
pub const NO_ACTIVITY: &str = "No activity recorded yet.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    pub name: String,
    pub contact: String,
    pub segment: String,
    pub relationship_score: String,
}

impl ProfileCard {
    pub fn from_customer(c: &Customer) -> Self {
        Self {
            name: or_placeholder(Some(&c.full_name)),
            contact: or_placeholder(Some(&c.phone)),
            segment: or_placeholder(c.segment.as_deref()),
            relationship_score: c
                .relationship_score
                .map(|s| s.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDirectory {
    customers: Resource<Vec<Customer>>,
    selected: Option<CustomerId>,
}

impl Default for CustomerDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self {
            customers: Resource::new(CUSTOMERS_FAILED),
            selected: None,
        }
    }

    pub fn state(&self) -> &ResourceState<Vec<Customer>> {
        self.customers.state()
    }

    pub fn activate(&mut self) -> FetchTicket {
        self.customers.activate()
    }

    pub fn deactivate(&mut self) {
        self.customers.deactivate();
    }

    pub fn settle(&mut self, ticket: FetchTicket, result: Result<Vec<Customer>, ApiError>) -> bool {
        self.customers.settle(ticket, result)
    }

    pub fn select(&mut self, id: Option<CustomerId>) {
        self.selected = id;
    }

    pub fn selected(&self) -> Option<&Customer> {
        let id = self.selected?;
        self.customers
            .data()?
            .iter()
            .find(|c| c.customer_id == id)
    }

    pub fn profile(&self) -> Option<ProfileCard> {
        self.selected().map(ProfileCard::from_customer)
    }

    /// Add a customer the backend just created, selecting nothing.
    pub fn insert(&mut self, customer: Customer) {
        self.customers.patch(|list| list.push(customer));
    }

    /// Swap in the server's copy of an edited customer. Local tags survive
    /// when the reply carries none.
    pub fn apply_update(&mut self, updated: Customer) -> bool {
        let mut found = false;
        self.customers.patch(|list| {
            if let Some(c) = list.iter_mut().find(|c| c.customer_id == updated.customer_id) {
                let tags = std::mem::take(&mut c.tags);
                *c = updated;
                if c.tags.is_empty() {
                    c.tags = tags;
                }
                found = true;
            }
        });
        found
    }

    /// Replace the tags of one customer after a local edit.
    pub fn set_tags(&mut self, id: CustomerId, tags: Vec<String>) {
        self.customers.patch(|list| {
            if let Some(c) = list.iter_mut().find(|c| c.customer_id == id) {
                c.tags = tags;
            }
        });
    }
}

/// Newest first when dates parse; otherwise the given order is kept.
pub fn timeline(mut activities: Vec<Activity>) -> Vec<Activity> {
    activities.sort_by(|a, b| {
        match (lc_api_types::parse_date(&a.date), lc_api_types::parse_date(&b.date)) {
            (Some(x), Some(y)) => y.cmp(&x),
            _ => std::cmp::Ordering::Equal,
        }
    });
    activities
}
