//! Per-call operation lifecycle using rust-fsm.
//!
//! Every asynchronous operation gets its own machine:
//!
//! ```text
//! ┌──────┐ Dispatch ┌─────────┐ Fulfill ┌───────────┐
//! │ Idle │ ───────► │ Pending │ ──────► │ Fulfilled │
//! └──────┘          └────┬────┘         └───────────┘
//!                        │ Reject       ┌───────────┐
//!                        └────────────► │ Rejected  │
//!                                       └───────────┘
//! ```
//!
//! Fulfilled and Rejected accept no input, so an operation settles exactly
//! once and cannot be restarted; a retry is a new call with a new machine.

use crate::{Operation, SessionError, SessionResult};
use rust_fsm::*;

state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub operation_lifecycle(Idle)

    Idle => {
        Dispatch => Pending
    },
    Pending => {
        Fulfill => Fulfilled,
        Reject => Rejected
    }
}

pub use operation_lifecycle::Input as LifecycleInput;
pub use operation_lifecycle::State as LifecycleState;
pub use operation_lifecycle::StateMachine as LifecycleMachine;

/// Consumer-facing view of a lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

impl From<&LifecycleState> for LifecyclePhase {
    fn from(state: &LifecycleState) -> Self {
        match state {
            LifecycleState::Idle => LifecyclePhase::Idle,
            LifecycleState::Pending => LifecyclePhase::Pending,
            LifecycleState::Fulfilled => LifecyclePhase::Fulfilled,
            LifecycleState::Rejected => LifecyclePhase::Rejected,
        }
    }
}

/// Lifecycle of one dispatched operation, tagged with its dispatch sequence.
pub struct OperationLifecycle {
    operation: Operation,
    sequence: u64,
    machine: LifecycleMachine,
}

impl OperationLifecycle {
    pub fn new(operation: Operation, sequence: u64) -> Self {
        Self {
            operation,
            sequence,
            machine: LifecycleMachine::new(),
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        LifecyclePhase::from(self.machine.state())
    }

    /// Feed an input to the machine, returning the new phase.
    pub fn advance(&mut self, input: &LifecycleInput) -> SessionResult<LifecyclePhase> {
        let from = self.phase();
        self.machine.consume(input).map_err(|_| {
            SessionError::InvalidLifecycleTransition(format!(
                "Cannot apply {:?} to {} #{} in phase {:?}",
                input,
                self.operation.name(),
                self.sequence,
                from
            ))
        })?;
        Ok(self.phase())
    }
}
