//! Typed access to the career backend: story videos, job details, user profiles, and the
//! "ask AI about this career" endpoint.

mod conversation;
mod http;

pub use conversation::{Conversation, SUGGESTED_QUESTIONS};
pub use http::HttpBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the backend assigns to a created user profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Story card listed on the home and stories surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCard {
    pub id: String,
    pub title: String,
    pub short_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetail {
    pub id: String,
    pub title: String,
    pub qualification: String,
    pub skills: Vec<String>,
    pub earning: String,
    pub investment: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub growth: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiAnswer {
    pub response: String,
    pub career_title: String,
}

/// Body of one `ask` call. The caller owns and replays the history on every turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub job_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Profile assembled by the signup wizard. Interests travel as one comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserProfile {
    pub name: String,
    pub status: String,
    pub field_of_study: String,
    pub interests: String,
    pub goal: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub status: String,
    pub field_of_study: String,
    pub interests: String,
    pub goal: String,
}

impl UserProfile {
    pub fn from_new(id: UserId, profile: NewUserProfile) -> Self {
        Self {
            id,
            name: profile.name,
            status: profile.status,
            field_of_study: profile.field_of_study,
            interests: profile.interests,
            goal: profile.goal,
        }
    }
}

/// Failures surfaced by backend calls. None of them are retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("{resource} not found")]
    NotFound { resource: String },
    #[error("API request failed: {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("network failure: {0}")]
    Network(String),
    #[error("unexpected response payload: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Transport and non-2xx failures, as opposed to a missing resource.
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Network(_) | Self::Decode(_)
        )
    }
}

/// Operations the frontend consumes from the career backend.
#[async_trait]
pub trait CareerBackend: Send + Sync {
    async fn list_videos(&self) -> Result<Vec<VideoCard>, BackendError>;

    async fn get_job(&self, job_id: &str) -> Result<JobDetail, BackendError>;

    /// Not idempotent: every call may create a new profile.
    async fn create_user(&self, profile: NewUserProfile) -> Result<UserProfile, BackendError>;

    async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile, BackendError>;

    async fn ask_ai(&self, request: AskRequest) -> Result<AiAnswer, BackendError>;
}

#[async_trait]
impl<T> CareerBackend for std::sync::Arc<T>
where
    T: CareerBackend + ?Sized,
{
    async fn list_videos(&self) -> Result<Vec<VideoCard>, BackendError> {
        (**self).list_videos().await
    }

    async fn get_job(&self, job_id: &str) -> Result<JobDetail, BackendError> {
        (**self).get_job(job_id).await
    }

    async fn create_user(&self, profile: NewUserProfile) -> Result<UserProfile, BackendError> {
        (**self).create_user(profile).await
    }

    async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile, BackendError> {
        (**self).get_profile(user_id).await
    }

    async fn ask_ai(&self, request: AskRequest) -> Result<AiAnswer, BackendError> {
        (**self).ask_ai(request).await
    }
}
