use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use super::sessions::{SessionSubmission, SignupSessions, WizardAction};
use crate::backend::CareerBackend;
use crate::error::AppError;

/// Router exposing the signup wizard as per-session HTTP resources.
pub fn signup_router<B>(sessions: Arc<SignupSessions<B>>) -> Router
where
    B: CareerBackend + 'static,
{
    Router::new()
        .route("/api/v1/signup", post(open_handler::<B>))
        .route(
            "/api/v1/signup/:session_id",
            get(view_handler::<B>).delete(discard_handler::<B>),
        )
        .route(
            "/api/v1/signup/:session_id/actions",
            post(action_handler::<B>),
        )
        .route("/api/v1/signup/:session_id/submit", post(submit_handler::<B>))
        .with_state(sessions)
}

pub(crate) async fn open_handler<B>(State(sessions): State<Arc<SignupSessions<B>>>) -> Response
where
    B: CareerBackend + 'static,
{
    let view = sessions.open().await;
    (StatusCode::CREATED, Json(view)).into_response()
}

pub(crate) async fn view_handler<B>(
    State(sessions): State<Arc<SignupSessions<B>>>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError>
where
    B: CareerBackend + 'static,
{
    let view = sessions.view(session_id).await?;
    Ok(Json(view).into_response())
}

pub(crate) async fn action_handler<B>(
    State(sessions): State<Arc<SignupSessions<B>>>,
    Path(session_id): Path<Uuid>,
    Json(action): Json<WizardAction>,
) -> Result<Response, AppError>
where
    B: CareerBackend + 'static,
{
    let view = sessions.apply(session_id, action).await?;
    Ok(Json(view).into_response())
}

pub(crate) async fn submit_handler<B>(
    State(sessions): State<Arc<SignupSessions<B>>>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError>
where
    B: CareerBackend + 'static,
{
    match sessions.submit(session_id).await? {
        SessionSubmission::Created { user, redirect } => {
            let payload = json!({
                "user": user,
                "redirect": redirect,
            });
            Ok((StatusCode::CREATED, Json(payload)).into_response())
        }
        SessionSubmission::Failed { message, view } => {
            let payload = json!({
                "error": message,
                "signup": view,
            });
            Ok((StatusCode::BAD_GATEWAY, Json(payload)).into_response())
        }
    }
}

pub(crate) async fn discard_handler<B>(
    State(sessions): State<Arc<SignupSessions<B>>>,
    Path(session_id): Path<Uuid>,
) -> Response
where
    B: CareerBackend + 'static,
{
    if sessions.discard(session_id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        let payload = json!({
            "error": format!("signup session {session_id} not found"),
        });
        (StatusCode::NOT_FOUND, Json(payload)).into_response()
    }
}
