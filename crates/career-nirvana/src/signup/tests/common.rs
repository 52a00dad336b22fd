use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;
use tokio::sync::Notify;

use crate::backend::{
    AiAnswer, AskRequest, BackendError, CareerBackend, JobDetail, NewUserProfile, UserId,
    UserProfile, VideoCard,
};
use crate::signup::{
    Destination, FieldOfStudy, Goal, Interest, Navigator, SignupWizard, Status,
};

/// Backend that records every `create_user` call and fails the first `failures` of them.
#[derive(Default)]
pub(super) struct RecordingBackend {
    calls: Mutex<Vec<NewUserProfile>>,
    failures: AtomicUsize,
}

impl RecordingBackend {
    pub(super) fn failing(failures: usize) -> Self {
        Self {
            calls: Mutex::default(),
            failures: AtomicUsize::new(failures),
        }
    }

    pub(super) fn calls(&self) -> Vec<NewUserProfile> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl CareerBackend for RecordingBackend {
    async fn list_videos(&self) -> Result<Vec<VideoCard>, BackendError> {
        Ok(Vec::new())
    }

    async fn get_job(&self, job_id: &str) -> Result<JobDetail, BackendError> {
        Err(BackendError::not_found(format!("job {job_id}")))
    }

    async fn create_user(&self, profile: NewUserProfile) -> Result<UserProfile, BackendError> {
        let mut calls = self.calls.lock().expect("calls mutex poisoned");
        calls.push(profile.clone());
        let attempt = calls.len();
        drop(calls);

        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(BackendError::Network("connection reset by peer".to_string()));
        }

        Ok(UserProfile::from_new(UserId(format!("user-{attempt}")), profile))
    }

    async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile, BackendError> {
        Err(BackendError::not_found(format!("user {user_id}")))
    }

    async fn ask_ai(&self, _request: AskRequest) -> Result<AiAnswer, BackendError> {
        Err(BackendError::Network("not wired in signup tests".to_string()))
    }
}

/// Backend whose `create_user` parks until released, to hold a submission in flight.
#[derive(Default)]
pub(super) struct GatedBackend {
    pub(super) entered: Notify,
    pub(super) release: Notify,
    pub(super) calls: AtomicUsize,
}

#[async_trait]
impl CareerBackend for GatedBackend {
    async fn list_videos(&self) -> Result<Vec<VideoCard>, BackendError> {
        Ok(Vec::new())
    }

    async fn get_job(&self, job_id: &str) -> Result<JobDetail, BackendError> {
        Err(BackendError::not_found(format!("job {job_id}")))
    }

    async fn create_user(&self, profile: NewUserProfile) -> Result<UserProfile, BackendError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.entered.notify_one();
        self.release.notified().await;
        Ok(UserProfile::from_new(UserId(format!("gated-{call}")), profile))
    }

    async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile, BackendError> {
        Err(BackendError::not_found(format!("user {user_id}")))
    }

    async fn ask_ai(&self, _request: AskRequest) -> Result<AiAnswer, BackendError> {
        Err(BackendError::Network("not wired in signup tests".to_string()))
    }
}

#[derive(Debug, Default)]
pub(super) struct RecordingNavigator {
    pub(super) visits: Vec<Destination>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, destination: Destination) {
        self.visits.push(destination);
    }
}

/// Fills every field and walks the wizard to step 5.
pub(super) fn fill_to_final_step(wizard: &mut SignupWizard) {
    wizard.set_name("Aashi");
    wizard.advance().expect("name step");
    wizard.select_status(Status::CollegeStudent);
    wizard.advance().expect("status step");
    wizard.select_field_of_study(FieldOfStudy::Engineering);
    wizard.advance().expect("field step");
    wizard.toggle_interest(Interest::Technology).expect("on interests step");
    wizard.toggle_interest(Interest::CreativeArts).expect("on interests step");
    wizard.advance().expect("interests step");
    wizard.select_goal(Goal::ClearPath);
}

pub(super) fn completed_wizard() -> SignupWizard {
    let mut wizard = SignupWizard::new();
    fill_to_final_step(&mut wizard);
    wizard
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
