//! The remote list-fetch lifecycle shared by every remote-bound widget.
//!
//! A [`Resource`] is in exactly one of `Loading`, `Ready(data)` or
//! `Failed(message)`. Activation hands out a [`FetchTicket`]; only the ticket
//! of the current activation may settle the resource, so a result arriving
//! after deactivation (or after a newer activation) is dropped.

use std::future::Future;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ResourceState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResourceState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Proof of one activation; settles the resource at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource<T> {
    state: ResourceState<T>,
    generation: u64,
    live: bool,
    failure_message: &'static str,
}

impl<T> Resource<T> {
    /// `failure_message` is what the widget shows for any transport or
    /// backend failure.
    pub fn new(failure_message: &'static str) -> Self {
        Self {
            state: ResourceState::Loading,
            generation: 0,
            live: false,
            failure_message,
        }
    }

    pub fn state(&self) -> &ResourceState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        self.state.data()
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Start a fetch: the resource is `Loading` until the ticket settles.
    pub fn activate(&mut self) -> FetchTicket {
        self.generation += 1;
        self.live = true;
        self.state = ResourceState::Loading;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Stop accepting results from any outstanding ticket.
    pub fn deactivate(&mut self) {
        self.generation += 1;
        self.live = false;
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.live && ticket.generation == self.generation
    }

    /// Commit a fetch result. Returns `false` when the ticket is stale and
    /// the result was discarded.
    pub fn settle(&mut self, ticket: FetchTicket, result: Result<T, ApiError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!("discarding stale fetch result");
            return false;
        }
        self.state = match result {
            Ok(data) => ResourceState::Ready(data),
            Err(err) => {
                tracing::warn!(error = %err, "fetch failed");
                ResourceState::Failed(err.fetch_message(self.failure_message))
            }
        };
        true
    }

    /// Fail immediately without a request, e.g. for a missing route param.
    pub fn fail(&mut self, ticket: FetchTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.state = ResourceState::Failed(message.into());
        true
    }

    /// Apply a server-confirmed change to ready data. Returns whether the
    /// closure ran.
    pub fn patch(&mut self, f: impl FnOnce(&mut T)) -> bool {
        match &mut self.state {
            ResourceState::Ready(data) => {
                f(data);
                true
            }
            _ => false,
        }
    }

    /// Activate, await `fetch`, settle. For callers that own the resource
    /// across the await (CLI, tests).
    pub async fn load<F>(&mut self, fetch: F) -> &ResourceState<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let ticket = self.activate();
        let result = fetch.await;
        self.settle(ticket, result);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_loading_and_not_live() {
        let r: Resource<Vec<u32>> = Resource::new("boom");
        assert!(r.state().is_loading());
        assert!(!r.is_live());
    }

    #[test]
    fn settle_ok_and_err() {
        let mut r = Resource::new("Failed to fetch");
        let t = r.activate();
        assert!(r.settle(t, Ok(vec![1, 2])));
        assert_eq!(r.data(), Some(&vec![1, 2]));

        let t = r.activate();
        assert!(r.state().is_loading());
        assert!(r.settle(t, Err(ApiError::Transport("refused".into()))));
        assert_eq!(r.state().error(), Some("Failed to fetch"));
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut r = Resource::new("x");
        let first = r.activate();
        let second = r.activate();
        assert!(!r.settle(first, Ok(1)));
        assert!(r.state().is_loading());
        assert!(r.settle(second, Ok(2)));
        assert_eq!(r.data(), Some(&2));
    }

    #[test]
    fn deactivated_resource_ignores_results() {
        let mut r = Resource::new("x");
        let t = r.activate();
        r.deactivate();
        assert!(!r.settle(t, Ok(5)));
        assert!(r.state().is_loading());
    }

    #[test]
    fn patch_only_touches_ready_data() {
        let mut r: Resource<Vec<u32>> = Resource::new("x");
        assert!(!r.patch(|v| v.push(1)));
        let t = r.activate();
        r.settle(t, Ok(vec![]));
        assert!(r.patch(|v| v.push(1)));
        assert_eq!(r.data(), Some(&vec![1]));
    }
}
