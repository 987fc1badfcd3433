//! Swap lifecycle state machine
//!
//! `idle -> pending -> success | error`, with `success -> idle` once the
//! reset delay elapses. Every submit gets a fresh attempt number so a stale
//! reset timer cannot clobber a newer attempt.

use crate::domain::entities::SwapOutcome;
use crate::shared::error::SwapError;
use crate::shared::types::SwapResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct SwapStateMachine {
    status: SwapStatus,
    attempt: u64,
}

impl SwapStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SwapStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == SwapStatus::Pending
    }

    /// Enter `pending` for a new attempt
    pub fn begin(&mut self) -> SwapResult<u64> {
        if self.is_pending() {
            return Err(SwapError::validation("A swap is already in progress"));
        }
        self.attempt += 1;
        self.status = SwapStatus::Pending;
        Ok(self.attempt)
    }

    /// Land a pending attempt in `success` or `error`.
    ///
    /// Outcomes of attempts other than the current pending one are ignored.
    pub fn finish(&mut self, attempt: u64, outcome: &SwapOutcome) -> SwapStatus {
        if attempt == self.attempt && self.is_pending() {
            self.status = if outcome.is_success() {
                SwapStatus::Success
            } else {
                SwapStatus::Error
            };
        }
        self.status
    }

    /// Return to `idle` after a success, if no newer attempt started since
    pub fn reset_after_success(&mut self, attempt: u64) -> bool {
        if attempt == self.attempt && self.status == SwapStatus::Success {
            self.status = SwapStatus::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed() -> SwapOutcome {
        SwapOutcome::Failed(SwapError::execution("reverted"))
    }

    #[test]
    fn test_initial_state() {
        assert_eq!(SwapStateMachine::new().status(), SwapStatus::Idle);
    }

    #[test]
    fn test_error_stays_until_next_submit() {
        let mut machine = SwapStateMachine::new();
        let attempt = machine.begin().expect("begin");
        assert_eq!(machine.status(), SwapStatus::Pending);

        assert_eq!(machine.finish(attempt, &failed()), SwapStatus::Error);
        assert!(!machine.reset_after_success(attempt));
        assert_eq!(machine.status(), SwapStatus::Error);

        let next = machine.begin().expect("begin again");
        assert_eq!(next, attempt + 1);
        assert_eq!(machine.status(), SwapStatus::Pending);
    }

    #[test]
    fn test_cannot_begin_while_pending() {
        let mut machine = SwapStateMachine::new();
        machine.begin().expect("begin");
        assert!(machine.begin().is_err());
    }

    #[test]
    fn test_stale_finish_is_ignored() {
        let mut machine = SwapStateMachine::new();
        let first = machine.begin().expect("begin");
        machine.finish(first, &failed());
        let second = machine.begin().expect("begin");

        assert_eq!(machine.finish(first, &failed()), SwapStatus::Pending);
        assert_eq!(machine.finish(second, &failed()), SwapStatus::Error);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&SwapStatus::Pending).expect("serialize");
        assert_eq!(json, "\"pending\"");
    }
}
