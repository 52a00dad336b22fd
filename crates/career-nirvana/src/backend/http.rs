use super::{
    AiAnswer, AskRequest, BackendError, CareerBackend, JobDetail, NewUserProfile, UserId,
    UserProfile, VideoCard,
};
use crate::config::BackendConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// `reqwest` client for the career backend REST API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

/// Signup body: the backend fills in the identifier when `id` is empty.
#[derive(Serialize)]
struct SignupBody<'a> {
    id: &'a str,
    #[serde(flatten)]
    profile: &'a NewUserProfile,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| BackendError::Network(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        resource: &str,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = request.send().await.map_err(|err| {
            warn!(resource, error = %err, "backend request failed");
            BackendError::Network(err.to_string())
        })?;

        let status = response.status();
        debug!(resource, status = status.as_u16(), "backend responded");

        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::not_found(resource));
        }
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|err| BackendError::Decode(err.to_string()))
    }
}

#[async_trait]
impl CareerBackend for HttpBackend {
    async fn list_videos(&self) -> Result<Vec<VideoCard>, BackendError> {
        let url = self.endpoint("api/videos");
        self.send("videos", self.client.get(url)).await
    }

    async fn get_job(&self, job_id: &str) -> Result<JobDetail, BackendError> {
        let url = self.endpoint(&format!("api/job/{job_id}"));
        self.send(&format!("job '{job_id}'"), self.client.get(url))
            .await
    }

    async fn create_user(&self, profile: NewUserProfile) -> Result<UserProfile, BackendError> {
        let url = self.endpoint("api/user/signup");
        let body = SignupBody {
            id: "",
            profile: &profile,
        };
        self.send("user signup", self.client.post(url).json(&body))
            .await
    }

    async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile, BackendError> {
        let url = self.endpoint(&format!("api/user/profile/{user_id}"));
        self.send(&format!("user '{user_id}'"), self.client.get(url))
            .await
    }

    async fn ask_ai(&self, request: AskRequest) -> Result<AiAnswer, BackendError> {
        let url = self.endpoint("api/ask");
        let resource = format!("job '{}'", request.job_id);
        self.send(&resource, self.client.post(url).json(&request))
            .await
    }
}

/// Joins with exactly one slash regardless of trailing/leading slashes on either side.
pub(crate) fn join_url(base: &str, endpoint: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    let endpoint = endpoint.strip_prefix('/').unwrap_or(endpoint);
    format!("{base}/{endpoint}")
}
