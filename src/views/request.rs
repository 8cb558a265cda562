//! Request generations.
//!
//! Each view model issues a fresh [`RequestGeneration`] whenever it starts a
//! fetch. Results come back tagged with the generation they were issued
//! for, and only a result carrying the latest one is applied. Leaving a view
//! or switching to another slug bumps the counter, so late responses fall on
//! the floor instead of overwriting newer state.

use std::fmt;

/// Opaque token identifying one outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic generation counter for one kind of request.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
    outstanding: bool,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding any outstanding one.
    pub fn issue(&mut self) -> RequestGeneration {
        self.latest += 1;
        self.outstanding = true;
        RequestGeneration(self.latest)
    }

    /// Whether `generation` is the latest one issued and still awaited.
    pub fn is_current(&self, generation: RequestGeneration) -> bool {
        self.outstanding && generation.0 == self.latest
    }

    /// Accept a result for `generation`.
    ///
    /// Returns `false` for stale or already-completed generations; the
    /// caller must then discard the result.
    pub fn complete(&mut self, generation: RequestGeneration) -> bool {
        if self.is_current(generation) {
            self.outstanding = false;
            true
        } else {
            false
        }
    }

    /// Forget any outstanding request without starting a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
        self.outstanding = false;
    }

    pub fn is_outstanding(&self) -> bool {
        self.outstanding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_generation_is_accepted_once() {
        let mut tracker = RequestTracker::new();
        let generation = tracker.issue();
        assert!(tracker.is_outstanding());
        assert!(tracker.complete(generation));
        assert!(!tracker.complete(generation));
        assert!(!tracker.is_outstanding());
    }

    #[test]
    fn test_superseded_generation_is_rejected() {
        let mut tracker = RequestTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();

        assert!(!tracker.complete(first));
        assert!(tracker.complete(second));
    }

    #[test]
    fn test_invalidate_drops_outstanding() {
        let mut tracker = RequestTracker::new();
        let generation = tracker.issue();
        tracker.invalidate();
        assert!(!tracker.complete(generation));
    }

    #[test]
    fn test_generations_are_monotonic() {
        let mut tracker = RequestTracker::new();
        let a = tracker.issue();
        tracker.invalidate();
        let b = tracker.issue();
        assert!(b > a);
        assert_eq!(b.to_string(), format!("#{}", b.value()));
    }
}
