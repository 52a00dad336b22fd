use super::wizard::{Retreat, SignupWizard, SubmissionOutcome, WizardError};
use crate::backend::CareerBackend;
use crate::session::SessionContext;
use tracing::{info, warn};

/// Surfaces the wizard can hand control to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    Landing,
}

impl Destination {
    /// Signed-out visitors land on the same route that serves home.
    pub fn path(self) -> &'static str {
        match self {
            Destination::Home | Destination::Landing => "/",
        }
    }
}

pub trait Navigator {
    fn navigate(&mut self, destination: Destination);
}

/// Drives a [`SignupWizard`] against a backend, recording the created user in the session.
pub struct SignupFlow<B, N> {
    backend: B,
    navigator: N,
    wizard: SignupWizard,
    session: SessionContext,
}

impl<B, N> SignupFlow<B, N>
where
    B: CareerBackend,
    N: Navigator,
{
    pub fn new(backend: B, navigator: N, session: SessionContext) -> Self {
        Self {
            backend,
            navigator,
            wizard: SignupWizard::new(),
            session,
        }
    }

    pub fn wizard(&self) -> &SignupWizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut SignupWizard {
        &mut self.wizard
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn into_session(self) -> SessionContext {
        self.session
    }

    pub fn retreat(&mut self) -> Retreat {
        let retreat = self.wizard.retreat();
        if retreat == Retreat::Exit {
            self.navigator.navigate(Destination::Landing);
        }
        retreat
    }

    /// Sends the profile once. A failed attempt keeps every field so the caller can retry.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome, WizardError> {
        let ticket = self.wizard.begin_submission()?;
        let result = self.backend.create_user(ticket.profile().clone()).await;
        let outcome = self.wizard.finish_submission(ticket, result)?;

        match &outcome {
            SubmissionOutcome::Created(user) => {
                info!(user_id = %user.id, "signup completed");
                self.session.remember_user(user.id.clone());
                self.navigator.navigate(Destination::Home);
            }
            SubmissionOutcome::Failed { message } => {
                warn!(%message, "signup submission failed");
            }
        }

        Ok(outcome)
    }
}
