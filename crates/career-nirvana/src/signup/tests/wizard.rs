use super::common::*;
use crate::backend::{BackendError, UserId, UserProfile};
use crate::signup::{
    FieldOfStudy, Goal, Interest, Retreat, SignupWizard, Status, SubmissionOutcome,
    SubmissionState, WizardError, WizardStep,
};

#[test]
fn advance_requires_a_name() {
    let mut wizard = SignupWizard::new();
    assert_eq!(wizard.step(), WizardStep::Name);

    match wizard.advance() {
        Err(WizardError::Incomplete {
            step: WizardStep::Name,
        }) => {}
        other => panic!("expected incomplete name step, got {other:?}"),
    }
    assert_eq!(wizard.step(), WizardStep::Name);

    wizard.set_name("   ");
    assert!(!wizard.can_advance());
    assert!(wizard.advance().is_err());

    wizard.set_name("Aashi");
    assert_eq!(wizard.advance(), Ok(WizardStep::Status));
    assert_eq!(wizard.step().number(), 2);
}

#[test]
fn incomplete_advance_leaves_state_untouched() {
    let mut wizard = SignupWizard::new();
    wizard.set_name("Aashi");
    wizard.advance().expect("name step");

    let before = wizard.clone();
    assert!(wizard.advance().is_err());
    assert_eq!(wizard, before);
}

#[test]
fn each_step_gates_on_its_own_field() {
    let mut wizard = SignupWizard::new();
    wizard.set_name("Ravi");
    wizard.advance().expect("name");

    assert!(!wizard.can_advance());
    wizard.select_status(Status::RecentGraduate);
    wizard.advance().expect("status");

    assert!(!wizard.can_advance());
    wizard.select_field_of_study(FieldOfStudy::Other);
    wizard.advance().expect("field of study");

    assert!(!wizard.can_advance());
    wizard.toggle_interest(Interest::Media).expect("interests step");
    wizard.advance().expect("interests");

    assert_eq!(wizard.step(), WizardStep::Goal);
    assert!(!wizard.can_advance());
    assert!(!wizard.can_submit());
    wizard.select_goal(Goal::Experience);
    assert!(wizard.can_submit());
}

#[test]
fn final_step_does_not_advance() {
    let mut wizard = completed_wizard();
    assert_eq!(wizard.advance(), Err(WizardError::AlreadyFinalStep));
    assert_eq!(wizard.step(), WizardStep::Goal);
}

#[test]
fn toggling_an_interest_twice_restores_the_selection() {
    let mut wizard = SignupWizard::new();
    wizard.set_name("Aashi");
    wizard.advance().expect("name");
    wizard.select_status(Status::SchoolStudent);
    wizard.advance().expect("status");
    wizard.select_field_of_study(FieldOfStudy::HighSchool);
    wizard.advance().expect("field of study");

    wizard.toggle_interest(Interest::Business).expect("interests step");
    let before = wizard.fields().interests.clone();

    assert_eq!(wizard.toggle_interest(Interest::Research), Ok(true));
    assert_eq!(wizard.toggle_interest(Interest::Research), Ok(false));
    assert_eq!(wizard.fields().interests, before);
}

#[test]
fn interests_can_only_be_toggled_on_step_four() {
    let mut wizard = SignupWizard::new();

    match wizard.toggle_interest(Interest::Technology) {
        Err(WizardError::WrongStep {
            expected: WizardStep::Interests,
            actual: WizardStep::Name,
        }) => {}
        other => panic!("expected wrong step, got {other:?}"),
    }
    assert!(wizard.fields().interests.is_empty());
}

#[test]
fn interests_keep_selection_order() {
    let wizard = completed_wizard();
    assert_eq!(
        wizard.fields().interests_label(),
        "Technology & Coding, Creative Arts & Design"
    );
}

#[test]
fn retreat_moves_back_and_exits_from_first_step() {
    let mut wizard = SignupWizard::new();
    assert_eq!(wizard.retreat(), Retreat::Exit);
    assert_eq!(wizard.step(), WizardStep::Name);

    let mut wizard = completed_wizard();
    assert_eq!(wizard.retreat(), Retreat::Moved(WizardStep::Interests));
    assert_eq!(wizard.fields().goal, Some(Goal::ClearPath));
}

#[test]
fn submission_requires_the_final_step() {
    let mut wizard = SignupWizard::new();
    wizard.set_name("Aashi");

    match wizard.begin_submission() {
        Err(WizardError::WrongStep {
            expected: WizardStep::Goal,
            ..
        }) => {}
        other => panic!("expected wrong step, got {other:?}"),
    }
    assert_eq!(wizard.submission(), &SubmissionState::Idle);
}

#[test]
fn submission_without_goal_is_incomplete() {
    let mut wizard = SignupWizard::new();
    wizard.set_name("Aashi");
    wizard.advance().expect("name");
    wizard.select_status(Status::WorkingProfessional);
    wizard.advance().expect("status");
    wizard.select_field_of_study(FieldOfStudy::Commerce);
    wizard.advance().expect("field");
    wizard.toggle_interest(Interest::Business).expect("interests");
    wizard.advance().expect("interests");

    assert_eq!(
        wizard.begin_submission(),
        Err(WizardError::Incomplete {
            step: WizardStep::Goal
        })
    );
}

#[test]
fn ticket_snapshots_the_profile() {
    let mut wizard = completed_wizard();
    let ticket = wizard.begin_submission().expect("ready to submit");

    assert_eq!(ticket.attempt(), 1);
    assert_eq!(ticket.profile().name, "Aashi");
    assert_eq!(ticket.profile().status, "College Student");
    assert_eq!(ticket.profile().field_of_study, "B.Tech (Engineering)");
    assert_eq!(
        ticket.profile().interests,
        "Technology & Coding, Creative Arts & Design"
    );
    assert_eq!(ticket.profile().goal, "Find a Clear Career Path");

    wizard.set_name("Someone Else");
    assert_eq!(ticket.profile().name, "Aashi");
    assert_eq!(wizard.fields().name, "Someone Else");
}

#[test]
fn second_begin_while_pending_is_refused() {
    let mut wizard = completed_wizard();
    let _ticket = wizard.begin_submission().expect("first attempt");

    assert!(wizard.is_pending());
    assert!(!wizard.can_submit());
    assert_eq!(wizard.begin_submission(), Err(WizardError::SubmissionPending));
}

#[test]
fn failure_keeps_fields_and_allows_retry() {
    let mut wizard = completed_wizard();
    let fields = wizard.fields().clone();
    let ticket = wizard.begin_submission().expect("first attempt");

    let outcome = wizard
        .finish_submission(
            ticket,
            Err(BackendError::Network("connection refused".to_string())),
        )
        .expect("current ticket");

    assert_eq!(
        outcome,
        SubmissionOutcome::Failed {
            message: "Error during signup: network failure: connection refused".to_string()
        }
    );
    assert_eq!(wizard.step(), WizardStep::Goal);
    assert_eq!(wizard.fields(), &fields);
    assert!(matches!(
        wizard.submission(),
        SubmissionState::Failed { attempt: 1, .. }
    ));

    let retry = wizard.begin_submission().expect("retry allowed");
    assert_eq!(retry.attempt(), 2);
}

#[test]
fn success_discards_wizard_state() {
    let mut wizard = completed_wizard();
    let ticket = wizard.begin_submission().expect("ready");
    let user = UserProfile::from_new(UserId("user-9".to_string()), ticket.profile().clone());

    let outcome = wizard
        .finish_submission(ticket, Ok(user.clone()))
        .expect("current ticket");

    assert_eq!(outcome, SubmissionOutcome::Created(user));
    assert_eq!(wizard.step(), WizardStep::Name);
    assert_eq!(wizard.fields().name, "");
    assert_eq!(wizard.submission(), &SubmissionState::Idle);
}

#[test]
fn stale_ticket_is_rejected() {
    let mut wizard = completed_wizard();
    let first = wizard.begin_submission().expect("first attempt");
    let stale = first.clone();
    wizard
        .finish_submission(first, Err(BackendError::Network("timeout".to_string())))
        .expect("current ticket");

    let user = UserProfile::from_new(UserId("late".to_string()), stale.profile().clone());
    assert_eq!(
        wizard.finish_submission(stale, Ok(user)),
        Err(WizardError::StaleTicket { attempt: 1 })
    );
    assert_eq!(wizard.step(), WizardStep::Goal);
}
