//! Submission flow state machine for the recommendation and detection forms.
//!
//! `Idle → Submitting → Succeeded | Failed`, with at-most-one-in-flight per
//! form instance and ticketed completion so a result arriving after the user
//! moved on is a no-op.

use cropmate_core::error::{CropmateError, Result};
use std::future::Future;

/// Returned by [`SubmissionFlow::begin`] while a submission is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionInFlight;

impl std::fmt::Display for SubmissionInFlight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A submission is already in flight")
    }
}

impl std::error::Error for SubmissionInFlight {}

/// Proof of which attempt a completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// The observable state of one form's submission flow.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState<R> {
    Idle,
    Submitting,
    Succeeded(R),
    Failed(CropmateError),
}

/// One form instance's submission lifecycle.
pub struct SubmissionFlow<R> {
    state: SubmissionState<R>,
    attempt: u64,
}

impl<R> SubmissionFlow<R> {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            attempt: 0,
        }
    }

    pub fn state(&self) -> &SubmissionState<R> {
        &self.state
    }

    /// True while a request is outstanding; surfaces disable the submit
    /// control on this.
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting)
    }

    /// Starts an attempt. Fails while one is already in flight, which is
    /// what prevents concurrent duplicate requests for the same form.
    pub fn begin(&mut self) -> std::result::Result<Ticket, SubmissionInFlight> {
        if self.is_submitting() {
            return Err(SubmissionInFlight);
        }
        self.attempt += 1;
        self.state = SubmissionState::Submitting;
        Ok(Ticket(self.attempt))
    }

    /// Applies a successful result. Returns false (and changes nothing)
    /// when the ticket belongs to an abandoned attempt.
    pub fn complete(&mut self, ticket: Ticket, result: R) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.state = SubmissionState::Succeeded(result);
        true
    }

    /// Applies a failure. The flow stays re-submittable: the next `begin`
    /// starts a fresh attempt.
    pub fn fail(&mut self, ticket: Ticket, error: CropmateError) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.state = SubmissionState::Failed(error);
        true
    }

    /// Runs one attempt end to end: begins, awaits the operation, and
    /// records the terminal state before handing the outcome back.
    pub async fn submit<Fut>(&mut self, op: Fut) -> Result<R>
    where
        R: Clone,
        Fut: Future<Output = Result<R>>,
    {
        let ticket = self
            .begin()
            .map_err(|busy| CropmateError::invalid_input("submission", busy.to_string()))?;
        match op.await {
            Ok(result) => {
                self.complete(ticket, result.clone());
                Ok(result)
            }
            Err(error) => {
                self.fail(ticket, error.clone());
                Err(error)
            }
        }
    }

    /// "Submit another" / "analyze again": back to idle, discarding the
    /// previous result and orphaning any outstanding attempt.
    pub fn reset(&mut self) {
        self.attempt += 1;
        self.state = SubmissionState::Idle;
    }

    fn accepts(&self, ticket: Ticket) -> bool {
        self.is_submitting() && ticket == Ticket(self.attempt)
    }
}

impl<R> Default for SubmissionFlow<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut flow = SubmissionFlow::new();
        assert_eq!(*flow.state(), SubmissionState::Idle);

        let ticket = flow.begin().unwrap();
        assert!(flow.is_submitting());

        assert!(flow.complete(ticket, 42));
        assert_eq!(*flow.state(), SubmissionState::Succeeded(42));
    }

    #[test]
    fn test_begin_while_submitting_is_rejected() {
        let mut flow = SubmissionFlow::<()>::new();
        flow.begin().unwrap();
        assert_eq!(flow.begin().unwrap_err(), SubmissionInFlight);
    }

    #[test]
    fn test_late_result_after_reset_is_a_no_op() {
        let mut flow = SubmissionFlow::new();
        let ticket = flow.begin().unwrap();

        // The user navigated away before the response arrived.
        flow.reset();
        assert!(!flow.complete(ticket, 42));
        assert_eq!(*flow.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_stale_ticket_does_not_touch_a_newer_attempt() {
        let mut flow = SubmissionFlow::new();
        let stale = flow.begin().unwrap();
        flow.reset();
        let fresh = flow.begin().unwrap();

        assert!(!flow.complete(stale, 1));
        assert!(flow.is_submitting());
        assert!(flow.complete(fresh, 2));
        assert_eq!(*flow.state(), SubmissionState::Succeeded(2));
    }

    #[tokio::test]
    async fn test_submit_records_success() {
        let mut flow = SubmissionFlow::new();
        let value = flow.submit(async { Ok(7u32) }).await.unwrap();
        assert_eq!(value, 7);
        assert_eq!(*flow.state(), SubmissionState::Succeeded(7));
    }

    #[tokio::test]
    async fn test_submit_records_failure_and_stays_resubmittable() {
        let mut flow = SubmissionFlow::<u32>::new();
        let err = flow
            .submit(async { Err(CropmateError::network("down")) })
            .await
            .unwrap_err();
        assert!(err.is_network());
        assert!(matches!(flow.state(), SubmissionState::Failed(_)));

        assert_eq!(flow.submit(async { Ok(7) }).await.unwrap(), 7);
        assert_eq!(*flow.state(), SubmissionState::Succeeded(7));
    }

    #[test]
    fn test_failure_leaves_flow_resubmittable() {
        let mut flow = SubmissionFlow::<u32>::new();
        let ticket = flow.begin().unwrap();
        assert!(flow.fail(ticket, CropmateError::network("down")));
        assert!(matches!(flow.state(), SubmissionState::Failed(_)));

        // No automatic retry: resubmission is an explicit new attempt.
        let retry = flow.begin().unwrap();
        assert!(flow.complete(retry, 7));
        assert_eq!(*flow.state(), SubmissionState::Succeeded(7));
    }
}
