use super::options::{FieldOfStudy, Goal, Interest, Status};
use crate::backend::{BackendError, NewUserProfile, UserProfile};
use serde::Serialize;
use std::fmt;

/// The five data-collection steps, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Name,
    Status,
    FieldOfStudy,
    Interests,
    Goal,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::Name;
    pub const LAST: WizardStep = WizardStep::Goal;

    pub fn number(self) -> u8 {
        match self {
            WizardStep::Name => 1,
            WizardStep::Status => 2,
            WizardStep::FieldOfStudy => 3,
            WizardStep::Interests => 4,
            WizardStep::Goal => 5,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            WizardStep::Name => Some(WizardStep::Status),
            WizardStep::Status => Some(WizardStep::FieldOfStudy),
            WizardStep::FieldOfStudy => Some(WizardStep::Interests),
            WizardStep::Interests => Some(WizardStep::Goal),
            WizardStep::Goal => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            WizardStep::Name => None,
            WizardStep::Status => Some(WizardStep::Name),
            WizardStep::FieldOfStudy => Some(WizardStep::Status),
            WizardStep::Interests => Some(WizardStep::FieldOfStudy),
            WizardStep::Goal => Some(WizardStep::Interests),
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            WizardStep::Name => "What's your first name?",
            WizardStep::Status => "What is your current status?",
            WizardStep::FieldOfStudy => "What is your primary field of study?",
            WizardStep::Interests => "What are a few topics you're curious about?",
            WizardStep::Goal => "What's your main goal right now?",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Field state collected across the steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignupFields {
    pub name: String,
    pub status: Option<Status>,
    pub field_of_study: Option<FieldOfStudy>,
    /// Selection order is preserved.
    pub interests: Vec<Interest>,
    pub goal: Option<Goal>,
}

impl SignupFields {
    pub fn is_complete(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Name => !self.name.trim().is_empty(),
            WizardStep::Status => self.status.is_some(),
            WizardStep::FieldOfStudy => self.field_of_study.is_some(),
            WizardStep::Interests => !self.interests.is_empty(),
            WizardStep::Goal => self.goal.is_some(),
        }
    }

    pub fn interests_label(&self) -> String {
        self.interests
            .iter()
            .map(|interest| interest.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Builds the backend payload, naming the first step that is still missing data.
    pub fn to_profile(&self) -> Result<NewUserProfile, WizardError> {
        let missing = |step| WizardError::Incomplete { step };

        if !self.is_complete(WizardStep::Name) {
            return Err(missing(WizardStep::Name));
        }
        let status = self.status.ok_or(missing(WizardStep::Status))?;
        let field_of_study = self.field_of_study.ok_or(missing(WizardStep::FieldOfStudy))?;
        if !self.is_complete(WizardStep::Interests) {
            return Err(missing(WizardStep::Interests));
        }
        let goal = self.goal.ok_or(missing(WizardStep::Goal))?;

        Ok(NewUserProfile {
            name: self.name.trim().to_string(),
            status: status.label().to_string(),
            field_of_study: field_of_study.label().to_string(),
            interests: self.interests_label(),
            goal: goal.label().to_string(),
        })
    }
}

/// Where the current submission attempt stands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending {
        attempt: u32,
    },
    Failed {
        attempt: u32,
        message: String,
    },
}

/// Proof that a submission attempt was started, carrying the profile snapshot to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    attempt: u32,
    profile: NewUserProfile,
}

impl SubmissionTicket {
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn profile(&self) -> &NewUserProfile {
        &self.profile
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Created(UserProfile),
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    Moved(WizardStep),
    /// Retreating from the first step leaves the wizard entirely.
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("step {step} is incomplete")]
    Incomplete { step: WizardStep },
    #[error("step 5 is the last step; submit the signup instead")]
    AlreadyFinalStep,
    #[error("this action belongs to step {expected}, but the wizard is on step {actual}")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },
    #[error("a signup submission is already in progress")]
    SubmissionPending,
    #[error("submission attempt {attempt} is no longer current")]
    StaleTicket { attempt: u32 },
}

impl WizardError {
    /// Action attempted while a completion predicate (or step precondition) does not hold.
    pub fn is_validation_gap(&self) -> bool {
        matches!(
            self,
            Self::Incomplete { .. } | Self::WrongStep { .. } | Self::AlreadyFinalStep
        )
    }
}

/// Five-step signup state machine.
///
/// Field setters are accepted on any step and while a submission is pending; the profile
/// sent to the backend is the snapshot taken by [`SignupWizard::begin_submission`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignupWizard {
    step: WizardStep,
    fields: SignupFields,
    submission: SubmissionState,
    #[serde(skip)]
    attempts: u32,
}

impl SignupWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn fields(&self) -> &SignupFields {
        &self.fields
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.submission, SubmissionState::Pending { .. })
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fields.name = name.into();
    }

    pub fn select_status(&mut self, status: Status) {
        self.fields.status = Some(status);
    }

    pub fn select_field_of_study(&mut self, field_of_study: FieldOfStudy) {
        self.fields.field_of_study = Some(field_of_study);
    }

    pub fn select_goal(&mut self, goal: Goal) {
        self.fields.goal = Some(goal);
    }

    /// Adds the interest if absent, removes it if present. Only valid on step 4.
    pub fn toggle_interest(&mut self, interest: Interest) -> Result<bool, WizardError> {
        if self.step != WizardStep::Interests {
            return Err(WizardError::WrongStep {
                expected: WizardStep::Interests,
                actual: self.step,
            });
        }

        let interests = &mut self.fields.interests;
        if let Some(position) = interests.iter().position(|selected| *selected == interest) {
            interests.remove(position);
            Ok(false)
        } else {
            interests.push(interest);
            Ok(true)
        }
    }

    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        self.fields.is_complete(step)
    }

    pub fn can_advance(&self) -> bool {
        self.step != WizardStep::LAST && self.is_step_complete(self.step)
    }

    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::LAST && !self.is_pending() && self.fields.to_profile().is_ok()
    }

    /// Moves forward one step. On error the state is left untouched.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let next = self.step.next().ok_or(WizardError::AlreadyFinalStep)?;
        if !self.is_step_complete(self.step) {
            return Err(WizardError::Incomplete { step: self.step });
        }
        self.step = next;
        Ok(next)
    }

    pub fn retreat(&mut self) -> Retreat {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                Retreat::Moved(previous)
            }
            None => Retreat::Exit,
        }
    }

    /// Starts a submission attempt. Rejected while another attempt is pending.
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, WizardError> {
        if self.is_pending() {
            return Err(WizardError::SubmissionPending);
        }
        if self.step != WizardStep::LAST {
            return Err(WizardError::WrongStep {
                expected: WizardStep::LAST,
                actual: self.step,
            });
        }

        let profile = self.fields.to_profile()?;
        self.attempts += 1;
        self.submission = SubmissionState::Pending {
            attempt: self.attempts,
        };

        Ok(SubmissionTicket {
            attempt: self.attempts,
            profile,
        })
    }

    /// Resolves the pending attempt. Success discards all entered state; failure keeps it
    /// and records a retryable message.
    pub fn finish_submission(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<UserProfile, BackendError>,
    ) -> Result<SubmissionOutcome, WizardError> {
        match self.submission {
            SubmissionState::Pending { attempt } if attempt == ticket.attempt => {}
            _ => {
                return Err(WizardError::StaleTicket {
                    attempt: ticket.attempt,
                })
            }
        }

        match result {
            Ok(user) => {
                *self = Self {
                    attempts: self.attempts,
                    ..Self::default()
                };
                Ok(SubmissionOutcome::Created(user))
            }
            Err(err) => {
                let message = format!("Error during signup: {err}");
                self.submission = SubmissionState::Failed {
                    attempt: ticket.attempt,
                    message: message.clone(),
                };
                Ok(SubmissionOutcome::Failed { message })
            }
        }
    }
}
