//! HttpSubmitter against a local collection endpoint

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::Mutex};
use waystation::{
    GENERIC_FAILURE_MESSAGE, HttpSubmitter, REJECTED_FALLBACK_MESSAGE, SubmitError, Submitter,
    SurveyPayload, Transition, Wizard, trucker,
};

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    body: &'static str,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn handle_submit(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> (StatusCode, String) {
    state.received.lock().await.push(payload);
    (state.status, state.body.to_string())
}

async fn spawn_endpoint(
    status: StatusCode,
    body: &'static str,
) -> anyhow::Result<(HttpSubmitter, Arc<Mutex<Vec<Value>>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        status,
        body,
        received: received.clone(),
    };
    let app = Router::new()
        .route("/api/survey/submit", post(handle_submit))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let http = reqwest::Client::builder().no_proxy().build()?;
    let submitter = HttpSubmitter::with_client(format!("http://{addr}/api/survey/submit"), http);
    Ok((submitter, received))
}

fn empty_payload() -> SurveyPayload {
    let questionnaire = trucker::questionnaire();
    SurveyPayload::assemble(&questionnaire, &Default::default(), &Default::default())
}

#[tokio::test]
async fn accepted_submission_posts_camel_case_json() {
    let (submitter, received) = spawn_endpoint(StatusCode::CREATED, r#"{"id":"abc"}"#)
        .await
        .expect("spawn endpoint");

    let mut payload = empty_payload();
    payload.truck_type = Some("Bitrem".to_string());
    submitter.submit(&payload).await.expect("submit");

    let received = received.lock().await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["truckType"], json!("Bitrem"));
    assert_eq!(received[0]["hasMissedServices"], json!(false));
    assert_eq!(
        received[0]["servicePreferences"].as_array().map(Vec::len),
        Some(trucker::SERVICES.len())
    );
}

#[tokio::test]
async fn rejection_carries_server_error_text() {
    let (submitter, _) = spawn_endpoint(StatusCode::BAD_REQUEST, r#"{"error":"X"}"#)
        .await
        .expect("spawn endpoint");

    let err = submitter.submit(&empty_payload()).await.unwrap_err();
    match &err {
        SubmitError::Rejected { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "X");
        }
        other => panic!("Expected rejection, got {other:?}"),
    }
    assert_eq!(err.user_message(), "X");
}

#[tokio::test]
async fn rejection_without_error_field_falls_back() {
    let (submitter, _) = spawn_endpoint(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
        .await
        .expect("spawn endpoint");

    let err = submitter.submit(&empty_payload()).await.unwrap_err();
    assert_eq!(err.user_message(), REJECTED_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn success_with_unreadable_body_is_a_failure() {
    let (submitter, _) = spawn_endpoint(StatusCode::OK, "<html>ok</html>")
        .await
        .expect("spawn endpoint");

    let err = submitter.submit(&empty_payload()).await.unwrap_err();
    assert!(matches!(err, SubmitError::MalformedResponse(_)));
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let http = reqwest::Client::builder().no_proxy().build().expect("client");
    let submitter = HttpSubmitter::with_client(format!("http://{addr}/api/survey/submit"), http);

    let err = submitter.submit(&empty_payload()).await.unwrap_err();
    assert!(matches!(err, SubmitError::Transport(_)));
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn wizard_surfaces_server_error() {
    let (submitter, received) = spawn_endpoint(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"error":"Dados incompletos"}"#,
    )
    .await
    .expect("spawn endpoint");
    let mut wizard = Wizard::new(trucker::questionnaire(), submitter);

    wizard.advance().await;
    while !wizard.is_final_step() {
        if let Some(question) = wizard.current_question() {
            let id = question.id();
            if let Some(label) = question.options().last().cloned() {
                wizard.record_answer(id, label);
            }
        }
        assert!(matches!(wizard.advance().await, Transition::Moved(_)));
    }
    wizard.record_answer(wizard.current_question().unwrap().id(), "Neutro");

    assert_eq!(
        wizard.advance().await,
        Transition::SubmitFailed {
            message: "Dados incompletos".to_string()
        }
    );
    assert_eq!(wizard.state().submit_error(), Some("Dados incompletos"));
    assert_eq!(received.lock().await.len(), 1);
}
