//! One view's remote data: `idle → loading → ready | failed`.

use std::future::Future;

use tracing::{debug, warn};

use crate::client::ClientError;

/// What a view renders.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ResourceState<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResourceState<U> {
        match self {
            ResourceState::Idle => ResourceState::Idle,
            ResourceState::Loading => ResourceState::Loading,
            ResourceState::Ready(value) => ResourceState::Ready(f(value)),
            ResourceState::Failed(message) => ResourceState::Failed(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Identifies one fetch. Only the most recent ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Resource<T> {
    phase: Phase,
    data: Option<T>,
    generation: u64,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self { phase: Phase::Idle, data: None, generation: 0 }
    }
}

impl<T> Resource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `loading`. Any ticket handed out earlier becomes stale.
    pub fn start(&mut self) -> Ticket {
        self.generation += 1;
        self.phase = Phase::Loading;
        Ticket(self.generation)
    }

    /// Record a fetch result. A failure keeps the last good payload around
    /// but the view shows the error. Returns false for a stale ticket, whose
    /// result is dropped.
    pub fn finish(&mut self, ticket: Ticket, result: Result<T, ClientError>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }

        match result {
            Ok(data) => {
                self.data = Some(data);
                self.phase = Phase::Ready;
            }
            Err(err) if err.is_validation() => {
                debug!(error = %err, "weather request rejected before sending");
                self.phase = Phase::Failed(err.to_string());
            }
            Err(err) => {
                warn!(error = %err, "weather fetch failed");
                self.phase = Phase::Failed(err.to_string());
            }
        }
        true
    }

    /// `start`, await `fetch`, `finish`.
    pub async fn load<F>(&mut self, fetch: F)
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        let ticket = self.start();
        let result = fetch.await;
        self.finish(ticket, result);
    }

    pub fn state(&self) -> ResourceState<&T> {
        match (&self.phase, &self.data) {
            (Phase::Idle, _) => ResourceState::Idle,
            (Phase::Loading, _) => ResourceState::Loading,
            (Phase::Failed(message), _) => ResourceState::Failed(message.clone()),
            (Phase::Ready, Some(data)) => ResourceState::Ready(data),
            (Phase::Ready, None) => ResourceState::Idle,
        }
    }

    /// State with the payload passed through a presentation transform.
    pub fn view<U>(&self, transform: impl FnOnce(&T) -> U) -> ResourceState<U> {
        self.state().map(transform)
    }

    /// Last successfully fetched payload, even while failed or loading.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> ClientError {
        ClientError::Transport { detail: "connection refused".into() }
    }

    #[test]
    fn starts_idle() {
        let resource: Resource<u32> = Resource::new();
        assert_eq!(resource.state(), ResourceState::Idle);
    }

    #[tokio::test]
    async fn load_success_then_failure_keeps_data() {
        let mut resource = Resource::new();

        resource.load(async { Ok(7u32) }).await;
        assert_eq!(resource.state(), ResourceState::Ready(&7));

        resource.load(async { Err(transport()) }).await;
        assert_eq!(resource.state(), ResourceState::Failed("Failed to fetch weather data".into()));
        assert_eq!(resource.data(), Some(&7));
    }

    #[test]
    fn loading_is_visible_between_start_and_finish() {
        let mut resource: Resource<u32> = Resource::new();
        let ticket = resource.start();
        assert_eq!(resource.state(), ResourceState::Loading);
        assert!(resource.finish(ticket, Ok(1)));
        assert_eq!(resource.view(|n| n * 10), ResourceState::Ready(10));
    }

    #[test]
    fn rejected_request_surfaces_its_message() {
        let mut resource: Resource<u32> = Resource::new();
        let ticket = resource.start();

        assert!(resource.finish(ticket, Err(ClientError::InvalidDays(20))));
        let ResourceState::Failed(message) = resource.state() else {
            panic!("expected failure");
        };
        assert_eq!(message, ClientError::InvalidDays(20).to_string());
        assert!(ClientError::InvalidDays(20).is_validation());
        assert!(!transport().is_validation());
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut resource = Resource::new();
        let first = resource.start();
        let second = resource.start();

        assert!(resource.finish(second, Ok("new")));
        assert!(!resource.finish(first, Ok("old")));
        assert_eq!(resource.state(), ResourceState::Ready(&"new"));
    }
}
