use super::common::*;
use crate::signup::{
    FieldOfStudy, Goal, Interest, SessionSubmission, SignupSessionError, SignupSessions, Status,
    SubmissionState, WizardAction, WizardError,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use uuid::Uuid;

async fn walk_to_final_step<B>(sessions: &SignupSessions<B>, session_id: Uuid)
where
    B: crate::backend::CareerBackend,
{
    let actions = [
        WizardAction::SetName("Aashi".to_string()),
        WizardAction::Advance,
        WizardAction::SelectStatus(Status::SchoolStudent),
        WizardAction::Advance,
        WizardAction::SelectFieldOfStudy(FieldOfStudy::Science),
        WizardAction::Advance,
        WizardAction::ToggleInterest(Interest::Research),
        WizardAction::Advance,
        WizardAction::SelectGoal(Goal::Exploring),
    ];
    for action in actions {
        sessions
            .apply(session_id, action)
            .await
            .expect("action accepted");
    }
}

#[tokio::test]
async fn actions_drive_the_session_wizard() {
    let sessions = SignupSessions::new(Arc::new(RecordingBackend::default()));
    let opened = sessions.open().await;
    assert_eq!(opened.step, 1);
    assert!(!opened.can_advance);

    match sessions.apply(opened.session_id, WizardAction::Advance).await {
        Err(SignupSessionError::Wizard(WizardError::Incomplete { .. })) => {}
        other => panic!("expected incomplete step, got {other:?}"),
    }

    walk_to_final_step(&sessions, opened.session_id).await;
    let view = sessions.view(opened.session_id).await.expect("session open");
    assert_eq!(view.step, 5);
    assert!(view.can_submit);
    assert_eq!(view.fields.interests, vec![Interest::Research]);
}

#[tokio::test]
async fn retreat_from_first_step_discards_session() {
    let sessions = SignupSessions::new(Arc::new(RecordingBackend::default()));
    let opened = sessions.open().await;

    let view = sessions
        .apply(opened.session_id, WizardAction::Retreat)
        .await
        .expect("retreat accepted");

    assert_eq!(view.redirect, Some("/"));
    assert_eq!(sessions.open_sessions().await, 0);
    assert_eq!(
        sessions.view(opened.session_id).await,
        Err(SignupSessionError::UnknownSession(opened.session_id))
    );
}

#[tokio::test]
async fn submit_while_pending_does_not_call_backend_twice() {
    let backend = Arc::new(GatedBackend::default());
    let sessions = Arc::new(SignupSessions::new(backend.clone()));
    let session_id = sessions.open().await.session_id;
    walk_to_final_step(&sessions, session_id).await;

    let in_flight = {
        let sessions = sessions.clone();
        tokio::spawn(async move { sessions.submit(session_id).await })
    };
    backend.entered.notified().await;

    let view = sessions.view(session_id).await.expect("session still open");
    assert_eq!(view.submission, SubmissionState::Pending { attempt: 1 });

    match sessions.submit(session_id).await {
        Err(SignupSessionError::Wizard(WizardError::SubmissionPending)) => {}
        other => panic!("expected pending rejection, got {other:?}"),
    }

    // Field edits are still accepted while the request is outstanding.
    sessions
        .apply(session_id, WizardAction::SetName("Asha".to_string()))
        .await
        .expect("edit while pending");

    backend.release.notify_one();
    let submitted = in_flight.await.expect("task joined").expect("submitted");

    match submitted {
        SessionSubmission::Created { user, redirect } => {
            assert_eq!(user.name, "Aashi");
            assert_eq!(redirect, "/");
        }
        other => panic!("expected created user, got {other:?}"),
    }
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    assert_eq!(sessions.open_sessions().await, 0);
}

#[tokio::test]
async fn failed_submission_keeps_session_for_retry() {
    let backend = Arc::new(RecordingBackend::failing(1));
    let sessions = SignupSessions::new(backend.clone());
    let session_id = sessions.open().await.session_id;
    walk_to_final_step(&sessions, session_id).await;

    match sessions.submit(session_id).await.expect("submitted") {
        SessionSubmission::Failed { message, view } => {
            assert!(message.contains("connection reset by peer"));
            assert_eq!(view.step, 5);
            assert_eq!(view.fields.name, "Aashi");
        }
        other => panic!("expected failure, got {other:?}"),
    }

    let retried = sessions.submit(session_id).await.expect("retry submitted");
    assert!(matches!(retried, SessionSubmission::Created { .. }));
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test]
async fn discarding_mid_flight_drops_the_result() {
    let backend = Arc::new(GatedBackend::default());
    let sessions = Arc::new(SignupSessions::new(backend.clone()));
    let session_id = sessions.open().await.session_id;
    walk_to_final_step(&sessions, session_id).await;

    let in_flight = {
        let sessions = sessions.clone();
        tokio::spawn(async move { sessions.submit(session_id).await })
    };
    backend.entered.notified().await;

    assert!(sessions.discard(session_id).await);
    backend.release.notify_one();

    assert_eq!(
        in_flight.await.expect("task joined"),
        Err(SignupSessionError::UnknownSession(session_id))
    );
}
