//! Five-step signup wizard, the flow that submits it, and its HTTP session surface.
//!
//! The wizard itself is a pure state machine; [`SignupFlow`] and [`SignupSessions`] own
//! the single asynchronous `createUser` call and gate re-entry while it is pending.

pub mod flow;
pub mod options;
pub mod router;
pub mod sessions;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use flow::{Destination, Navigator, SignupFlow};
pub use options::{FieldOfStudy, Goal, Interest, Status};
pub use router::signup_router;
pub use sessions::{SessionSubmission, SignupSessionError, SignupSessions, SignupView, WizardAction};
pub use wizard::{
    Retreat, SignupFields, SignupWizard, SubmissionOutcome, SubmissionState, SubmissionTicket,
    WizardError, WizardStep,
};
