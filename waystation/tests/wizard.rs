//! Integration tests for the questionnaire wizard

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use waystation::{
    GENERIC_FAILURE_MESSAGE, PRE_START, QuestionId, Screen, Scripted, SubmitError, Submitter,
    SurveyPayload, TestSubmitter, Transition, ValidationError, Wizard, trucker,
};

/// Never answers the first submission; accepts every later one.
#[derive(Default)]
struct StallsOnce {
    calls: AtomicUsize,
}

#[async_trait]
impl Submitter for StallsOnce {
    async fn submit(&self, _payload: &SurveyPayload) -> Result<(), SubmitError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}

fn wizard_with(submitter: TestSubmitter) -> Wizard<TestSubmitter> {
    Wizard::new(trucker::questionnaire(), submitter)
}

/// Answer the current step with its option at `choice` (the intro needs nothing).
fn answer_current(wizard: &mut Wizard<TestSubmitter>, choice: usize) {
    let Some(question) = wizard.current_question() else {
        return;
    };
    if let Some(label) = question.options().get(choice).cloned() {
        let id = question.id();
        wizard.record_answer(id, label);
    }
}

/// Walk from the welcome screen to `step`, answering "Não" to question 8.
async fn walk_to(wizard: &mut Wizard<TestSubmitter>, step: i32) {
    while wizard.state().step() < step {
        if wizard.state().step() == 7 {
            wizard.record_answer(trucker::MISSED_SERVICES, "Não");
        } else {
            answer_current(wizard, 0);
        }
        assert!(matches!(wizard.advance().await, Transition::Moved(_)));
    }
}

async fn walk_to_final_step(wizard: &mut Wizard<TestSubmitter>) {
    let last = wizard.post_end() - 1;
    walk_to(wizard, last).await;
}

#[tokio::test]
async fn unanswered_core_questions_block() {
    let mut wizard = wizard_with(TestSubmitter::new());

    for step in 0..11 {
        walk_to(&mut wizard, step).await;
        assert_eq!(
            wizard.advance().await,
            Transition::Blocked(ValidationError::Unanswered)
        );
        assert_eq!(wizard.state().step(), step);
        assert!(wizard.state().unanswered());
        assert!(!wizard.state().follow_up_required());
    }
}

#[tokio::test]
async fn unanswered_service_questions_block() {
    let mut wizard = wizard_with(TestSubmitter::new());
    walk_to(&mut wizard, 12).await;

    assert_eq!(
        wizard.advance().await,
        Transition::Blocked(ValidationError::Unanswered)
    );
    assert_eq!(wizard.state().step(), 12);
    assert!(wizard.state().unanswered());
}

#[tokio::test]
async fn section_intro_needs_no_answer() {
    let mut wizard = wizard_with(TestSubmitter::new());
    walk_to(&mut wizard, 11).await;

    assert!(matches!(
        wizard.screen(),
        Screen::Question(q) if q.id() == QuestionId::SECTION_INTRO
    ));
    assert_eq!(wizard.advance().await, Transition::Moved(12));
}

#[tokio::test]
async fn affirmative_answer_requires_a_follow_up_selection() {
    let mut wizard = wizard_with(TestSubmitter::new());
    walk_to(&mut wizard, 7).await;

    wizard.record_answer(trucker::MISSED_SERVICES, trucker::AFFIRMATIVE);
    assert!(wizard.follow_up_active());
    assert_eq!(
        wizard.advance().await,
        Transition::Blocked(ValidationError::FollowUpRequired)
    );
    assert_eq!(wizard.state().step(), 7);
    assert!(wizard.state().follow_up_required());
    assert!(!wizard.state().unanswered());

    assert!(wizard.toggle_follow_up(trucker::MISSED_SERVICES, "Banho"));
    assert!(!wizard.state().follow_up_required());
    assert_eq!(wizard.advance().await, Transition::Moved(8));
}

#[tokio::test]
async fn emptying_the_follow_up_clears_the_flag_until_next_advance() {
    let mut wizard = wizard_with(TestSubmitter::new());
    walk_to(&mut wizard, 7).await;
    wizard.record_answer(trucker::MISSED_SERVICES, trucker::AFFIRMATIVE);
    wizard.advance().await;
    assert!(wizard.state().follow_up_required());

    wizard.toggle_follow_up(trucker::MISSED_SERVICES, "Café");
    wizard.toggle_follow_up(trucker::MISSED_SERVICES, "Café");
    assert!(!wizard.state().follow_up_required());

    assert_eq!(
        wizard.advance().await,
        Transition::Blocked(ValidationError::FollowUpRequired)
    );
    assert!(wizard.state().follow_up_required());
}

#[tokio::test]
async fn retreat_keeps_answers_and_selections() {
    let mut wizard = wizard_with(TestSubmitter::new());
    walk_to(&mut wizard, 7).await;
    wizard.record_answer(trucker::MISSED_SERVICES, trucker::AFFIRMATIVE);
    wizard.toggle_follow_up(trucker::MISSED_SERVICES, "Mecânica");
    walk_to(&mut wizard, 14).await;

    let answers_before = wizard.state().answers().clone();
    let follow_ups_before = wizard.state().follow_ups().clone();

    for expected in (PRE_START..14).rev() {
        assert!(wizard.retreat());
        assert_eq!(wizard.state().step(), expected);
        assert_eq!(wizard.state().answers(), &answers_before);
        assert_eq!(wizard.state().follow_ups(), &follow_ups_before);
    }
    assert!(!wizard.retreat());
}

#[tokio::test]
async fn retreat_clears_validation_flags() {
    let mut wizard = wizard_with(TestSubmitter::new());
    walk_to(&mut wizard, 3).await;
    wizard.advance().await;
    assert!(wizard.state().unanswered());

    wizard.retreat();
    assert!(!wizard.state().unanswered());
    assert!(!wizard.state().follow_up_required());
}

#[tokio::test]
async fn toggling_twice_restores_membership() {
    let mut wizard = wizard_with(TestSubmitter::new());
    let id = trucker::MISSED_SERVICES;

    wizard.toggle_follow_up(id, "Dormitório");
    let before = wizard.state().follow_ups().contains(id, "Banho");
    wizard.toggle_follow_up(id, "Banho");
    wizard.toggle_follow_up(id, "Banho");

    assert_eq!(wizard.state().follow_ups().contains(id, "Banho"), before);
    assert!(wizard.state().follow_ups().contains(id, "Dormitório"));
}

#[tokio::test]
async fn payload_lists_every_service_in_order() {
    let mut wizard = wizard_with(TestSubmitter::new());
    walk_to_final_step(&mut wizard).await;

    for (index, label) in trucker::PREFERENCES.iter().cycle().take(12).enumerate() {
        wizard.record_answer(QuestionId::for_service(index), *label);
    }
    assert_eq!(wizard.advance().await, Transition::Submitted);

    let received = wizard.submitter().received();
    assert_eq!(received.len(), 1);
    let preferences = &received[0].service_preferences;
    assert_eq!(preferences.len(), trucker::SERVICES.len());
    for (index, preference) in preferences.iter().enumerate() {
        assert_eq!(preference.service, trucker::SERVICES[index]);
        assert_eq!(
            preference.importance.as_deref(),
            Some(trucker::PREFERENCES[index % trucker::PREFERENCES.len()])
        );
    }
}

#[tokio::test]
async fn end_to_end_session() {
    let mut wizard = wizard_with(TestSubmitter::new());
    assert_eq!(wizard.screen(), Screen::Welcome);

    assert_eq!(wizard.advance().await, Transition::Moved(0));
    for step in 0..11 {
        if step == 7 {
            wizard.record_answer(trucker::MISSED_SERVICES, trucker::AFFIRMATIVE);
            wizard.toggle_follow_up(trucker::MISSED_SERVICES, "Wi-Fi gratuito");
        } else {
            answer_current(&mut wizard, 1);
        }
        assert_eq!(wizard.advance().await, Transition::Moved(step + 1));
    }

    // section intro
    assert_eq!(wizard.advance().await, Transition::Moved(12));

    for step in 12..23 {
        wizard.record_answer(wizard.current_question().unwrap().id(), "Importante");
        assert_eq!(wizard.advance().await, Transition::Moved(step + 1));
    }
    assert!(wizard.is_final_step());
    wizard.record_answer(QuestionId::for_service(11), "Importante");
    assert_eq!(wizard.advance().await, Transition::Submitted);

    assert_eq!(wizard.state().step(), wizard.post_end());
    assert_eq!(wizard.screen(), Screen::ThankYou);
    assert!(!wizard.state().submitting());
    assert_eq!(wizard.advance().await, Transition::Finished);

    let payload = &wizard.submitter().received()[0];
    assert!(payload.has_missed_services);
    assert_eq!(payload.missed_services, ["Wi-Fi gratuito"]);
    assert_eq!(payload.gender.as_deref(), Some("Feminino"));
    assert!(
        payload
            .service_preferences
            .iter()
            .all(|p| p.importance.as_deref() == Some("Importante"))
    );
}

#[tokio::test]
async fn rejected_submission_stays_and_retries() {
    let mut wizard = wizard_with(TestSubmitter::new().then_reject(500, "X"));
    walk_to_final_step(&mut wizard).await;
    answer_current(&mut wizard, 0);
    let last = wizard.state().step();

    assert_eq!(
        wizard.advance().await,
        Transition::SubmitFailed {
            message: "X".to_string()
        }
    );
    assert_eq!(wizard.state().step(), last);
    assert!(!wizard.state().submitting());
    assert_eq!(wizard.state().submit_error(), Some("X"));

    assert_eq!(wizard.advance().await, Transition::Submitted);
    assert_eq!(wizard.state().step(), wizard.post_end());
    assert_eq!(wizard.state().submit_error(), None);

    let received = wizard.submitter().received();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0], received[1]);
}

#[tokio::test]
async fn malformed_response_uses_generic_message() {
    let mut wizard = wizard_with(TestSubmitter::new().then(Scripted::Malformed));
    walk_to_final_step(&mut wizard).await;
    answer_current(&mut wizard, 0);

    assert!(matches!(
        wizard.advance().await,
        Transition::SubmitFailed { .. }
    ));
    assert_eq!(wizard.state().submit_error(), Some(GENERIC_FAILURE_MESSAGE));
    assert_eq!(wizard.state().step(), wizard.post_end() - 1);
}

#[tokio::test]
async fn unanswered_final_step_never_submits() {
    let mut wizard = wizard_with(TestSubmitter::new());
    walk_to_final_step(&mut wizard).await;

    assert_eq!(
        wizard.advance().await,
        Transition::Blocked(ValidationError::Unanswered)
    );
    assert_eq!(wizard.submitter().attempts(), 0);
}

#[tokio::test]
async fn negative_answer_sends_no_missed_services() {
    let mut wizard = wizard_with(TestSubmitter::new());
    walk_to(&mut wizard, 7).await;
    wizard.record_answer(trucker::MISSED_SERVICES, trucker::AFFIRMATIVE);
    wizard.toggle_follow_up(trucker::MISSED_SERVICES, "Banho");
    wizard.record_answer(trucker::MISSED_SERVICES, "Não");
    assert!(!wizard.follow_up_active());

    walk_to_final_step(&mut wizard).await;
    answer_current(&mut wizard, 0);
    assert_eq!(wizard.advance().await, Transition::Submitted);

    let payload = &wizard.submitter().received()[0];
    assert!(!payload.has_missed_services);
    assert!(payload.missed_services.is_empty());
    assert!(wizard.state().follow_ups().contains(trucker::MISSED_SERVICES, "Banho"));
}

#[tokio::test]
async fn retreat_from_thank_you_returns_to_last_question() {
    let mut wizard = wizard_with(TestSubmitter::new());
    walk_to_final_step(&mut wizard).await;
    answer_current(&mut wizard, 0);
    assert_eq!(wizard.advance().await, Transition::Submitted);
    let answers = wizard.state().answers().clone();

    assert!(wizard.retreat());
    assert_eq!(wizard.state().step(), wizard.post_end() - 1);
    assert!(wizard.is_final_step());
    assert_eq!(wizard.state().answers(), &answers);
}

#[tokio::test]
async fn abandoned_submission_leaves_session_usable() {
    let mut wizard = Wizard::new(trucker::questionnaire(), StallsOnce::default());
    let last = wizard.post_end() - 1;
    while wizard.state().step() < last {
        if let Some(question) = wizard.current_question() {
            let id = question.id();
            let label = if id == trucker::MISSED_SERVICES {
                Some("Não".to_string())
            } else {
                question.options().first().cloned()
            };
            if let Some(label) = label {
                wizard.record_answer(id, label);
            }
        }
        assert!(matches!(wizard.advance().await, Transition::Moved(_)));
    }
    wizard.record_answer(QuestionId::for_service(11), "Importante");

    let stalled = tokio::time::timeout(Duration::from_millis(50), wizard.advance()).await;
    assert!(stalled.is_err());
    assert!(!wizard.state().submitting());
    assert_eq!(wizard.state().step(), last);

    assert!(wizard.retreat());
    assert_eq!(wizard.advance().await, Transition::Moved(last));
    assert_eq!(wizard.advance().await, Transition::Submitted);
    assert_eq!(wizard.screen(), Screen::ThankYou);
}
