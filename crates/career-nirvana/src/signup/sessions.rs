use super::flow::Destination;
use super::options::{FieldOfStudy, Goal, Interest, Status};
use super::wizard::{
    Retreat, SignupFields, SignupWizard, SubmissionOutcome, SubmissionState, WizardError,
    WizardStep,
};
use crate::backend::{CareerBackend, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One user interaction against an open signup wizard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum WizardAction {
    SetName(String),
    SelectStatus(Status),
    SelectFieldOfStudy(FieldOfStudy),
    ToggleInterest(Interest),
    SelectGoal(Goal),
    Advance,
    Retreat,
}

/// Serializable snapshot of a wizard session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupView {
    pub session_id: Uuid,
    pub step: u8,
    pub step_key: WizardStep,
    pub prompt: &'static str,
    pub fields: SignupFields,
    pub can_advance: bool,
    pub can_submit: bool,
    pub submission: SubmissionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

impl SignupView {
    fn of(session_id: Uuid, wizard: &SignupWizard) -> Self {
        Self {
            session_id,
            step: wizard.step().number(),
            step_key: wizard.step(),
            prompt: wizard.step().prompt(),
            fields: wizard.fields().clone(),
            can_advance: wizard.can_advance(),
            can_submit: wizard.can_submit(),
            submission: wizard.submission().clone(),
            redirect: None,
        }
    }

    fn leaving(mut self, destination: Destination) -> Self {
        self.redirect = Some(destination.path());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSubmission {
    Created {
        user: UserProfile,
        redirect: &'static str,
    },
    Failed {
        message: String,
        view: SignupView,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupSessionError {
    #[error("signup session {0} not found")]
    UnknownSession(Uuid),
    #[error(transparent)]
    Wizard(#[from] WizardError),
}

/// In-memory wizards keyed by an opaque session id.
pub struct SignupSessions<B> {
    backend: B,
    wizards: Mutex<HashMap<Uuid, SignupWizard>>,
}

impl<B> SignupSessions<B>
where
    B: CareerBackend,
{
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            wizards: Mutex::new(HashMap::new()),
        }
    }

    pub async fn open(&self) -> SignupView {
        let session_id = Uuid::new_v4();
        let wizard = SignupWizard::new();
        let view = SignupView::of(session_id, &wizard);
        self.wizards.lock().await.insert(session_id, wizard);
        debug!(%session_id, "signup session opened");
        view
    }

    pub async fn view(&self, session_id: Uuid) -> Result<SignupView, SignupSessionError> {
        let wizards = self.wizards.lock().await;
        let wizard = wizards
            .get(&session_id)
            .ok_or(SignupSessionError::UnknownSession(session_id))?;
        Ok(SignupView::of(session_id, wizard))
    }

    /// Applies one action. Retreating past the first step discards the session.
    pub async fn apply(
        &self,
        session_id: Uuid,
        action: WizardAction,
    ) -> Result<SignupView, SignupSessionError> {
        let mut wizards = self.wizards.lock().await;
        let wizard = wizards
            .get_mut(&session_id)
            .ok_or(SignupSessionError::UnknownSession(session_id))?;

        match action {
            WizardAction::SetName(name) => wizard.set_name(name),
            WizardAction::SelectStatus(status) => wizard.select_status(status),
            WizardAction::SelectFieldOfStudy(field) => wizard.select_field_of_study(field),
            WizardAction::ToggleInterest(interest) => {
                wizard.toggle_interest(interest)?;
            }
            WizardAction::SelectGoal(goal) => wizard.select_goal(goal),
            WizardAction::Advance => {
                wizard.advance()?;
            }
            WizardAction::Retreat => {
                if wizard.retreat() == Retreat::Exit {
                    let view = SignupView::of(session_id, wizard).leaving(Destination::Landing);
                    wizards.remove(&session_id);
                    debug!(%session_id, "signup session left from first step");
                    return Ok(view);
                }
            }
        }

        Ok(SignupView::of(session_id, wizard))
    }

    /// Submits the wizard's profile. The session lock is released while the backend call
    /// is in flight, so a concurrent submit observes the pending state and is refused.
    pub async fn submit(&self, session_id: Uuid) -> Result<SessionSubmission, SignupSessionError> {
        let ticket = {
            let mut wizards = self.wizards.lock().await;
            let wizard = wizards
                .get_mut(&session_id)
                .ok_or(SignupSessionError::UnknownSession(session_id))?;
            wizard.begin_submission()?
        };

        let result = self.backend.create_user(ticket.profile().clone()).await;

        let mut wizards = self.wizards.lock().await;
        let Some(wizard) = wizards.get_mut(&session_id) else {
            warn!(%session_id, "signup session discarded while submission was in flight");
            return Err(SignupSessionError::UnknownSession(session_id));
        };

        match wizard.finish_submission(ticket, result)? {
            SubmissionOutcome::Created(user) => {
                wizards.remove(&session_id);
                info!(%session_id, user_id = %user.id, "signup completed");
                Ok(SessionSubmission::Created {
                    user,
                    redirect: Destination::Home.path(),
                })
            }
            SubmissionOutcome::Failed { message } => {
                warn!(%session_id, %message, "signup submission failed");
                Ok(SessionSubmission::Failed {
                    message,
                    view: SignupView::of(session_id, wizard),
                })
            }
        }
    }

    /// Drops the session. Returns whether it existed.
    pub async fn discard(&self, session_id: Uuid) -> bool {
        self.wizards.lock().await.remove(&session_id).is_some()
    }

    pub async fn open_sessions(&self) -> usize {
        self.wizards.lock().await.len()
    }
}
