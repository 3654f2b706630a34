//! Prediction cycle state machine
//!
//! One cycle walks Idle → Validating → CheckingHealth → Requesting and ends in
//! Succeeded or Failed, after which `Finish` returns it to Idle.
//!
//! Valid transitions:
//! 1. Idle           → Validating      (on: Submit)
//! 2. Validating     → CheckingHealth  (on: InputAccepted)
//! 3. Validating     → Failed          (on: InputRejected)
//! 4. CheckingHealth → Requesting      (on: BackendAvailable)
//! 5. CheckingHealth → Failed          (on: BackendUnavailable)
//! 6. Requesting     → Succeeded       (on: ResponseAccepted)
//! 7. Requesting     → Failed          (on: RequestFailed)
//! 8. Succeeded      → Idle            (on: Finish)
//! 9. Failed         → Idle            (on: Finish)

use crate::errors::{AppError, Result};

/// Orchestrator states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleState {
    Idle,
    Validating,
    CheckingHealth,
    Requesting,
    Succeeded,
    Failed,
}

/// Events that drive a cycle forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    Submit,
    InputAccepted,
    InputRejected,
    BackendAvailable,
    BackendUnavailable,
    ResponseAccepted,
    RequestFailed,
    Finish,
}

impl CycleState {
    /// Succeeded and Failed end a cycle
    pub fn is_terminal(&self) -> bool {
        matches!(self, CycleState::Succeeded | CycleState::Failed)
    }

    /// A cycle is running between Submit and its terminal state
    pub fn is_busy(&self) -> bool {
        !matches!(self, CycleState::Idle) && !self.is_terminal()
    }

    /// Next state for `event`, or an error if the edge does not exist
    pub fn transition(&self, event: CycleEvent) -> Result<CycleState> {
        use CycleEvent::*;
        use CycleState::*;

        let next = match (self, event) {
            (Idle, Submit) => Validating,

            (Validating, InputAccepted) => CheckingHealth,
            (Validating, InputRejected) => Failed,

            (CheckingHealth, BackendAvailable) => Requesting,
            (CheckingHealth, BackendUnavailable) => Failed,

            (Requesting, ResponseAccepted) => Succeeded,
            (Requesting, RequestFailed) => Failed,

            (Succeeded, Finish) | (Failed, Finish) => Idle,

            (from, event) => {
                return Err(AppError::InvalidTransition {
                    from: format!("{:?}", from),
                    event: format!("{:?}", event),
                });
            }
        };

        Ok(next)
    }

    /// Human-readable state name
    pub fn display_name(&self) -> &'static str {
        match self {
            CycleState::Idle => "Idle",
            CycleState::Validating => "Validating input",
            CycleState::CheckingHealth => "Checking backend",
            CycleState::Requesting => "Analyzing text",
            CycleState::Succeeded => "Completed",
            CycleState::Failed => "Failed",
        }
    }
}
