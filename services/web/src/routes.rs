use crate::infra::{AppState, Frontend};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use career_nirvana::backend::{
    BackendError, CareerBackend, ChatMessage, Conversation, JobDetail, UserId, SUGGESTED_QUESTIONS,
};
use career_nirvana::discovery::{
    featured, filter_videos, highlight, search, thumbnail_for, CareerRecord,
    PanelState, Segment, NO_RESULT_HINTS, POPULAR_SEARCHES,
};
use career_nirvana::error::AppError;
use career_nirvana::session::Language;
use career_nirvana::signup::{signup_router, SignupSessions};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Component, Path as FsPath, PathBuf};
use std::sync::Arc;
use tracing::warn;

const STORIES_UNAVAILABLE: &str = "Unable to load career stories. Please try again later.";
const CAREER_NOT_FOUND: &str = "Career not found.";
const CAREER_UNAVAILABLE: &str = "Unable to load career details. Please try again later.";
const ANSWER_UNAVAILABLE: &str = "Unable to get AI response. Please try again.";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    #[serde(default)]
    pub(crate) q: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchHit<'a> {
    #[serde(flatten)]
    pub(crate) record: &'a CareerRecord,
    pub(crate) highlighted_name: Vec<Segment<'a>>,
    pub(crate) highlighted_title: Vec<Segment<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchResponse<'a> {
    pub(crate) query: Option<&'a str>,
    pub(crate) panel: PanelState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) summary: Option<String>,
    pub(crate) results: Vec<SearchHit<'a>>,
    /// Popular searches while idle, hints after an empty result.
    pub(crate) suggestions: &'static [&'static str],
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StoriesParams {
    #[serde(default)]
    pub(crate) filter: Option<String>,
    #[serde(default)]
    pub(crate) featured: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct StoryDetail {
    #[serde(flatten)]
    pub(crate) job: JobDetail,
    pub(crate) thumbnail: &'static str,
    pub(crate) suggested_questions: [&'static str; 3],
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AskBody {
    #[serde(default)]
    pub(crate) question: String,
    #[serde(default)]
    pub(crate) history: Vec<ChatMessage>,
    #[serde(default)]
    pub(crate) user_id: Option<UserId>,
}

pub(crate) fn with_frontend_routes<B>(
    frontend: Arc<Frontend<B>>,
    sessions: Arc<SignupSessions<Arc<B>>>,
) -> Router
where
    B: CareerBackend + 'static,
{
    let content = Router::new()
        .route("/api/v1/search", get(search_endpoint::<B>))
        .route("/api/v1/roadmaps", get(roadmaps_endpoint::<B>))
        .route("/api/v1/stories", get(stories_endpoint::<B>))
        .route("/api/v1/stories/:job_id", get(story_detail_endpoint::<B>))
        .route("/api/v1/stories/:job_id/ask", post(ask_endpoint::<B>))
        .route("/assets/*path", get(asset_endpoint::<B>))
        .with_state(frontend);

    signup_router(sessions)
        .merge(content)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/languages", get(languages_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn languages_endpoint() -> impl IntoResponse {
    let languages: Vec<_> = Language::ordered()
        .into_iter()
        .map(Language::view)
        .collect();
    Json(json!({
        "default": Language::default().code(),
        "languages": languages,
    }))
}

pub(crate) async fn search_endpoint<B>(
    State(frontend): State<Arc<Frontend<B>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    B: CareerBackend + 'static,
{
    let outcome = search(&params.q, &frontend.catalog);
    let query = outcome.query();
    let panel = outcome.panel();

    let needle = query.unwrap_or_default();

    let results = outcome
        .records()
        .iter()
        .map(|&record| SearchHit {
            record,
            highlighted_name: highlight(&record.display_name, needle),
            highlighted_title: highlight(&record.title, needle),
        })
        .collect();

    let summary = outcome.summary();
    let suggestions: &'static [&'static str] = match panel {
        PanelState::Hidden => &POPULAR_SEARCHES,
        PanelState::NoResults => &NO_RESULT_HINTS,
        PanelState::Results(_) => &[],
    };

    Json(SearchResponse {
        query,
        panel,
        summary,
        results,
        suggestions,
    })
    .into_response()
}

pub(crate) async fn roadmaps_endpoint<B>(State(frontend): State<Arc<Frontend<B>>>) -> Response
where
    B: CareerBackend + 'static,
{
    Json(frontend.roadmaps.roadmaps()).into_response()
}

pub(crate) async fn stories_endpoint<B>(
    State(frontend): State<Arc<Frontend<B>>>,
    Query(params): Query<StoriesParams>,
) -> Response
where
    B: CareerBackend + 'static,
{
    let videos = match frontend.backend.list_videos().await {
        Ok(videos) => videos,
        Err(err) => {
            warn!(error = %err, "failed to list story videos");
            return unavailable(STORIES_UNAVAILABLE);
        }
    };

    let cards = if params.featured {
        featured(&videos)
    } else {
        filter_videos(&videos, params.filter.as_deref().unwrap_or_default())
    };

    Json(cards).into_response()
}

pub(crate) async fn story_detail_endpoint<B>(
    State(frontend): State<Arc<Frontend<B>>>,
    Path(job_id): Path<String>,
) -> Response
where
    B: CareerBackend + 'static,
{
    match frontend.backend.get_job(&job_id).await {
        Ok(job) => {
            let thumbnail = thumbnail_for(&job.id);
            Json(StoryDetail {
                job,
                thumbnail,
                suggested_questions: SUGGESTED_QUESTIONS,
            })
            .into_response()
        }
        Err(BackendError::NotFound { .. }) => {
            let payload = json!({ "error": CAREER_NOT_FOUND });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => {
            warn!(%job_id, error = %err, "failed to load career details");
            unavailable(CAREER_UNAVAILABLE)
        }
    }
}

pub(crate) async fn ask_endpoint<B>(
    State(frontend): State<Arc<Frontend<B>>>,
    Path(job_id): Path<String>,
    Json(body): Json<AskBody>,
) -> Result<Response, AppError>
where
    B: CareerBackend + 'static,
{
    let AskBody {
        question,
        history,
        user_id,
    } = body;
    let mut conversation = Conversation::resume(job_id, history);

    match conversation
        .ask(frontend.backend.as_ref(), &question, user_id.as_ref())
        .await
    {
        Ok(answer) => Ok(Json(json!({
            "answer": answer,
            "history": conversation.into_history(),
        }))
        .into_response()),
        Err(err @ BackendError::NotFound { .. }) => Err(AppError::from(err)),
        Err(err) => {
            warn!(job_id = %conversation.job_id(), error = %err, "career question failed");
            Ok(unavailable(ANSWER_UNAVAILABLE))
        }
    }
}

pub(crate) async fn asset_endpoint<B>(
    State(frontend): State<Arc<Frontend<B>>>,
    Path(path): Path<String>,
) -> Result<Response, AppError>
where
    B: CareerBackend + 'static,
{
    let Some(full_path) = resolve_asset(&frontend.assets_dir, &path) else {
        return Err(AppError::NotFound(format!("asset {path} not found")));
    };

    let bytes = match tokio::fs::read(&full_path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("asset {path} not found")));
        }
        Err(err) => return Err(AppError::from(err)),
    };

    let mime = mime_guess::from_path(&full_path).first_or_octet_stream();
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.essence_str().to_string())],
        bytes,
    )
        .into_response())
}

/// Joins a request path onto the asset root, refusing anything that could escape it.
pub(crate) fn resolve_asset(root: &FsPath, requested: &str) -> Option<PathBuf> {
    let relative = FsPath::new(requested.trim_start_matches('/'));
    let mut resolved = root.to_path_buf();
    let mut depth = 0;

    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    (depth > 0).then_some(resolved)
}

fn unavailable(message: &str) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryBackend;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use career_nirvana::backend::{AiAnswer, AskRequest, NewUserProfile, UserProfile, VideoCard};
    use career_nirvana::discovery::StoryCatalog;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    struct OfflineBackend;

    #[async_trait]
    impl CareerBackend for OfflineBackend {
        async fn list_videos(&self) -> Result<Vec<VideoCard>, BackendError> {
            Err(BackendError::Network("connection refused".to_string()))
        }

        async fn get_job(&self, _job_id: &str) -> Result<JobDetail, BackendError> {
            Err(BackendError::Status {
                status: 500,
                reason: "Internal Server Error".to_string(),
            })
        }

        async fn create_user(
            &self,
            _profile: NewUserProfile,
        ) -> Result<UserProfile, BackendError> {
            Err(BackendError::Network("connection refused".to_string()))
        }

        async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile, BackendError> {
            Err(BackendError::not_found(format!("user {user_id}")))
        }

        async fn ask_ai(&self, _request: AskRequest) -> Result<AiAnswer, BackendError> {
            Err(BackendError::Network("connection refused".to_string()))
        }
    }

    fn assets_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("career-nirvana-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create assets dir");
        std::fs::write(dir.join("creator-story.jpg"), b"\xFF\xD8\xFF").expect("write asset");
        dir
    }

    fn router_with<B>(backend: B) -> Router
    where
        B: CareerBackend + 'static,
    {
        let backend = Arc::new(backend);
        let frontend = Arc::new(Frontend::new(
            backend.clone(),
            StoryCatalog::standard(),
            assets_dir(),
        ));
        let sessions = Arc::new(SignupSessions::new(backend));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_frontend_routes(frontend, sessions).layer(Extension(state))
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&body).expect("json payload"))
    }

    #[tokio::test]
    async fn search_returns_highlighted_hits() {
        let (status, body) =
            get_json(router_with(InMemoryBackend::default()), "/api/v1/search?q=CHEF").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["query"], "chef");
        assert_eq!(body["panel"]["state"], "results");
        assert_eq!(body["summary"], "Found 1 career story for \"CHEF\"");
        assert_eq!(body["results"][0]["id"], 6);
        assert_eq!(body["results"][0]["highlighted_title"][1]["kind"], "match");
        assert_eq!(body["results"][0]["highlighted_title"][1]["text"], "Chef");
    }

    #[tokio::test]
    async fn blank_search_offers_popular_searches() {
        let (status, body) =
            get_json(router_with(InMemoryBackend::default()), "/api/v1/search?q=%20%20").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["panel"]["state"], "hidden");
        assert_eq!(body["results"].as_array().map(Vec::len), Some(0));
        assert_eq!(body["suggestions"][1], "Chef");
    }

    #[tokio::test]
    async fn empty_search_offers_hints() {
        let (_, body) =
            get_json(router_with(InMemoryBackend::default()), "/api/v1/search?q=astronaut").await;

        assert_eq!(body["panel"]["state"], "no_results");
        assert_eq!(body["suggestions"][0], "developer");
    }

    #[tokio::test]
    async fn featured_stories_are_capped_at_three() {
        let (status, body) = get_json(
            router_with(InMemoryBackend::default()),
            "/api/v1/stories?featured=true",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let cards = body.as_array().expect("story list");
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0]["thumbnail"], "/assets/golgappa-seller.jpg");
    }

    #[tokio::test]
    async fn story_filter_matches_descriptions() {
        let (_, body) = get_json(
            router_with(InMemoryBackend::default()),
            "/api/v1/stories?filter=kitchen",
        )
        .await;

        let cards = body.as_array().expect("story list");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0]["id"], "baker");
    }

    #[tokio::test]
    async fn story_failures_use_generic_messages() {
        let (status, body) = get_json(router_with(OfflineBackend), "/api/v1/stories").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], STORIES_UNAVAILABLE);

        let (status, body) = get_json(router_with(OfflineBackend), "/api/v1/stories/baker").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], CAREER_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unknown_career_is_not_found() {
        let (status, body) = get_json(
            router_with(InMemoryBackend::default()),
            "/api/v1/stories/astronaut",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], CAREER_NOT_FOUND);
    }

    #[tokio::test]
    async fn story_detail_carries_thumbnail_and_prompts() {
        let (status, body) = get_json(
            router_with(InMemoryBackend::default()),
            "/api/v1/stories/data_analyst",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Data Analyst");
        assert_eq!(body["thumbnail"], "/assets/data-analyst.jpg");
        assert_eq!(body["suggested_questions"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn ask_replays_history() {
        let router = router_with(InMemoryBackend::default());
        let request = Request::post("/api/v1/stories/baker/ask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::to_vec(&json!({
                    "question": "What skills do I need?",
                    "history": [
                        { "role": "user", "content": "Is it profitable?" },
                        { "role": "assistant", "content": "Often, yes." }
                    ]
                }))
                .expect("serialize"),
            ))
            .expect("request");

        let response = router.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let body: Value = serde_json::from_slice(&body).expect("json payload");

        assert_eq!(body["answer"]["career_title"], "Home Baker");
        assert_eq!(body["history"].as_array().map(Vec::len), Some(4));
        assert_eq!(body["history"][3]["role"], "assistant");
    }

    #[tokio::test]
    async fn ask_failure_is_reported_generically() {
        let router = router_with(OfflineBackend);
        let request = Request::post("/api/v1/stories/baker/ask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"question":"Hello?"}"#))
            .expect("request");

        let response = router.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn languages_list_every_option() {
        let (_, body) =
            get_json(router_with(InMemoryBackend::default()), "/api/v1/languages").await;

        assert_eq!(body["default"], "en");
        assert_eq!(body["languages"].as_array().map(Vec::len), Some(10));
        assert_eq!(body["languages"][1]["code"], "hi");
    }

    #[tokio::test]
    async fn roadmaps_are_listed() {
        let (_, body) =
            get_json(router_with(InMemoryBackend::default()), "/api/v1/roadmaps").await;
        assert_eq!(body.as_array().map(Vec::len), Some(6));
    }

    #[tokio::test]
    async fn assets_are_served_with_guessed_type() {
        let response = router_with(InMemoryBackend::default())
            .oneshot(
                Request::get("/assets/creator-story.jpg")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "image/jpeg"
        );
    }

    #[tokio::test]
    async fn missing_assets_are_not_found() {
        let (status, _) = get_json(
            router_with(InMemoryBackend::default()),
            "/assets/missing.png",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn asset_paths_cannot_escape_the_root() {
        let root = FsPath::new("/srv/assets");

        assert_eq!(
            resolve_asset(root, "img/chef.png"),
            Some(PathBuf::from("/srv/assets/img/chef.png"))
        );
        assert_eq!(
            resolve_asset(root, "/creator-story.jpg"),
            Some(PathBuf::from("/srv/assets/creator-story.jpg"))
        );
        assert_eq!(resolve_asset(root, "../secrets.env"), None);
        assert_eq!(resolve_asset(root, "img/../../etc/passwd"), None);
        assert_eq!(resolve_asset(root, ""), None);
    }

    #[tokio::test]
    async fn health_and_readiness_respond() {
        let (status, body) = get_json(router_with(InMemoryBackend::default()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = get_json(router_with(InMemoryBackend::default()), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }
}
