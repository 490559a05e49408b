//! Request sequencing.
//!
//! Responses arrive in whatever order the network delivers them. Each request
//! gets a sequence number from a single monotonically increasing counter, and
//! only the most recently issued request of a kind may update state. A slow
//! search for `"a"` resolving after the search for `"ab"` is dropped.

use super::request::{RequestKind, ResponseTag};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    last_issued: u64,
    latest: HashMap<RequestKind, u64>,
}

impl RequestTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a tag for a new request, superseding any in-flight request
    /// of the same kind.
    pub fn issue(&mut self, kind: RequestKind) -> ResponseTag {
        self.last_issued += 1;
        self.latest.insert(kind, self.last_issued);
        ResponseTag { kind, seq: self.last_issued }
    }

    /// Returns `true` if `tag` belongs to the latest request of its kind and
    /// marks that request as settled. Duplicates and superseded responses are
    /// rejected.
    pub fn accept(&mut self, tag: ResponseTag) -> bool {
        if self.latest.get(&tag.kind) == Some(&tag.seq) {
            self.latest.remove(&tag.kind);
            true
        } else {
            false
        }
    }

    /// Whether a request of `kind` is still awaiting its response.
    #[must_use]
    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.latest.contains_key(&kind)
    }

    /// Makes every in-flight request stale.
    pub fn invalidate(&mut self) {
        self.latest.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_increase_across_kinds() {
        let mut tracker = RequestTracker::new();
        let a = tracker.issue(RequestKind::Results);
        let b = tracker.issue(RequestKind::Summary);
        let c = tracker.issue(RequestKind::Results);
        assert!(a.seq < b.seq && b.seq < c.seq);
    }

    #[test]
    fn test_superseded_response_is_rejected_in_either_order() {
        let mut tracker = RequestTracker::new();
        let older = tracker.issue(RequestKind::Results);
        let newer = tracker.issue(RequestKind::Results);
        assert!(!tracker.accept(older));
        assert!(tracker.accept(newer));

        let mut tracker = RequestTracker::new();
        let older = tracker.issue(RequestKind::Results);
        let newer = tracker.issue(RequestKind::Results);
        assert!(tracker.accept(newer));
        assert!(!tracker.accept(older));
    }

    #[test]
    fn test_kinds_are_tracked_independently() {
        let mut tracker = RequestTracker::new();
        let results = tracker.issue(RequestKind::Results);
        let summary = tracker.issue(RequestKind::Summary);
        assert!(tracker.accept(results));
        assert!(tracker.is_pending(RequestKind::Summary));
        assert!(tracker.accept(summary));
        assert!(!tracker.is_pending(RequestKind::Summary));
    }

    #[test]
    fn test_duplicate_delivery_is_rejected() {
        let mut tracker = RequestTracker::new();
        let tag = tracker.issue(RequestKind::Feedback);
        assert!(tracker.accept(tag));
        assert!(!tracker.accept(tag));
    }

    #[test]
    fn test_invalidate_drops_everything_in_flight() {
        let mut tracker = RequestTracker::new();
        let results = tracker.issue(RequestKind::Results);
        let summary = tracker.issue(RequestKind::Summary);
        tracker.invalidate();
        assert!(!tracker.accept(results));
        assert!(!tracker.accept(summary));

        let fresh = tracker.issue(RequestKind::Results);
        assert!(fresh.seq > summary.seq);
        assert!(tracker.accept(fresh));
    }
}
