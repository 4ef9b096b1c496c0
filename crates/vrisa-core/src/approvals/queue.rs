//! Pending-request queue with a confirmation-gated decision step

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::Decision;

/// A staged decision awaiting confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDecision {
    /// Chosen action
    pub decision: Decision,
    /// Queue position it targets
    pub index: usize,
}

/// Ordered queue of requests awaiting an admin decision
///
/// One machine per queue, reused indefinitely: `idle` until a decision is
/// staged with [`ApprovalQueue::request_accept`] or
/// [`ApprovalQueue::request_reject`], then `confirm-pending` until
/// [`ApprovalQueue::confirm`] removes the target or
/// [`ApprovalQueue::cancel`] returns to `idle` untouched. Staging while a
/// confirmation is already pending overwrites the staged target. Requests
/// are `pending` while present; accepted and rejected are terminal and
/// modeled by removal.
#[derive(Debug)]
pub struct ApprovalQueue<T> {
    requests: Vec<T>,
    pending: Option<PendingDecision>,
}

impl<T> Default for ApprovalQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ApprovalQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            pending: None,
        }
    }

    /// Create a queue from an initial snapshot of requests
    pub fn from_requests(requests: Vec<T>) -> Self {
        Self {
            requests,
            pending: None,
        }
    }

    /// Append a newly arrived request
    pub fn submit(&mut self, request: T) {
        self.requests.push(request);
    }

    /// Requests still awaiting a decision, in arrival order
    pub fn pending_requests(&self) -> &[T] {
        &self.requests
    }

    /// Number of requests awaiting a decision
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Stage an accept decision for the request at `index`
    pub fn request_accept(&mut self, index: usize) -> Result<()> {
        self.stage(Decision::Accept, index)
    }

    /// Stage a reject decision for the request at `index`
    pub fn request_reject(&mut self, index: usize) -> Result<()> {
        self.stage(Decision::Reject, index)
    }

    fn stage(&mut self, decision: Decision, index: usize) -> Result<()> {
        if index >= self.requests.len() {
            return Err(Error::not_found("request", index));
        }

        debug!(?decision, index, "decision staged");
        self.pending = Some(PendingDecision { decision, index });
        Ok(())
    }

    /// Apply the staged decision, if any
    ///
    /// Removes the targeted request — accept and reject both remove the
    /// entry; no audit record is kept — and returns the decision with it.
    /// `Ok(None)` when nothing is staged. A staged index that no longer
    /// resolves clears the staged state and reports NotFound instead of
    /// touching the queue.
    pub fn confirm(&mut self) -> Result<Option<(Decision, T)>> {
        let Some(staged) = self.pending.take() else {
            return Ok(None);
        };

        if staged.index >= self.requests.len() {
            warn!(index = staged.index, "staged request index no longer resolves");
            return Err(Error::not_found("request", staged.index));
        }

        let request = self.requests.remove(staged.index);
        debug!(decision = ?staged.decision, index = staged.index, "request resolved");
        Ok(Some((staged.decision, request)))
    }

    /// Discard the staged decision without touching the queue
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// The staged decision, if a confirmation is pending
    pub fn pending_decision(&self) -> Option<PendingDecision> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn queue(entries: &[&str]) -> ApprovalQueue<String> {
        ApprovalQueue::from_requests(entries.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn accept_then_confirm_removes_the_target() {
        let mut q = queue(&["a", "b", "c"]);

        q.request_accept(1).unwrap();
        let (decision, removed) = q.confirm().unwrap().unwrap();

        assert_eq!(decision, Decision::Accept);
        assert_eq!(removed, "b");
        assert_eq!(q.pending_requests(), ["a", "c"]);
    }

    #[test]
    fn reject_then_confirm_is_behaviorally_identical() {
        let mut q = queue(&["a", "b", "c"]);

        q.request_reject(1).unwrap();
        let (decision, removed) = q.confirm().unwrap().unwrap();

        assert_eq!(decision, Decision::Reject);
        assert_eq!(removed, "b");
        assert_eq!(q.pending_requests(), ["a", "c"]);
    }

    #[test]
    fn reject_confirm_then_accept_cancel_scenario() {
        // queue = [A, B]; reject(0); confirm -> [B]; accept(0); cancel -> [B]
        let mut q = queue(&["RequestA", "RequestB"]);

        q.request_reject(0).unwrap();
        q.confirm().unwrap();
        assert_eq!(q.pending_requests(), ["RequestB"]);

        q.request_accept(0).unwrap();
        q.cancel();
        assert_eq!(q.pending_requests(), ["RequestB"]);
        assert_eq!(q.pending_decision(), None);
    }

    #[test]
    fn staging_on_an_empty_queue_is_rejected() {
        let mut q: ApprovalQueue<String> = ApprovalQueue::new();

        for index in [0, 3, 17] {
            let err = q.request_accept(index).unwrap_err();
            assert!(matches!(err, Error::NotFound { .. }));
        }
        assert!(q.is_empty());
        assert_eq!(q.confirm().unwrap(), None);
    }

    #[test]
    fn confirm_when_idle_is_a_silent_no_op() {
        let mut q = queue(&["a"]);

        assert_eq!(q.confirm().unwrap(), None);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn cancel_leaves_the_queue_unchanged() {
        let mut q = queue(&["a", "b"]);
        let before = q.pending_requests().to_vec();

        q.request_accept(0).unwrap();
        q.cancel();

        assert_eq!(q.pending_requests(), before.as_slice());
    }

    #[test]
    fn second_stage_overwrites_the_first() {
        let mut q = queue(&["a", "b"]);

        q.request_accept(0).unwrap();
        q.request_reject(1).unwrap();

        assert_eq!(
            q.pending_decision(),
            Some(PendingDecision {
                decision: Decision::Reject,
                index: 1,
            })
        );

        let (decision, removed) = q.confirm().unwrap().unwrap();
        assert_eq!(decision, Decision::Reject);
        assert_eq!(removed, "b");
        assert_eq!(q.pending_requests(), ["a"]);
    }

    #[test]
    fn confirm_clears_the_staged_state() {
        let mut q = queue(&["a"]);

        q.request_accept(0).unwrap();
        q.confirm().unwrap();

        assert_eq!(q.pending_decision(), None);
        assert_eq!(q.confirm().unwrap(), None);
    }

    #[test]
    fn out_of_bounds_stage_keeps_previous_staging() {
        let mut q = queue(&["a", "b"]);

        q.request_accept(1).unwrap();
        assert!(q.request_reject(9).is_err());

        assert_eq!(
            q.pending_decision(),
            Some(PendingDecision {
                decision: Decision::Accept,
                index: 1,
            })
        );
    }

    #[test]
    fn submit_appends_in_arrival_order() {
        let mut q: ApprovalQueue<String> = ApprovalQueue::new();

        q.submit("first".to_string());
        q.submit("second".to_string());

        assert_eq!(q.pending_requests(), ["first", "second"]);
    }
}
