use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use studywithai_api::{
    agent::Runner,
    config::Config,
    llm::LlmClient,
    server::{AppState, router},
    session::SessionRegistry,
};
use tower::ServiceExt; // for `oneshot`

mod common;
use common::mocks::MockLlmClient;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

fn create_test_app(llm_client: Arc<dyn LlmClient>) -> Router {
    let sessions = Arc::new(SessionRegistry::new());
    let runner = Arc::new(Runner::new(
        llm_client,
        sessions,
        Duration::from_secs(5),
    ));

    let state = AppState {
        runner,
        config: Arc::new(Config::default()),
    };

    router(state)
}

/// A multipart form field: name, optional filename, content.
struct FormField<'a> {
    name: &'a str,
    filename: Option<&'a str>,
    content: &'a [u8],
}

fn text_field<'a>(name: &'a str, content: &'a str) -> FormField<'a> {
    FormField {
        name,
        filename: None,
        content: content.as_bytes(),
    }
}

fn file_field<'a>(filename: &'a str, content: &'a [u8]) -> FormField<'a> {
    FormField {
        name: "files",
        filename: Some(filename),
        content,
    }
}

fn multipart_body(fields: &[FormField<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for field in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match field.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        field.name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                        field.name
                    )
                    .as_bytes(),
                );
            }
        }
        body.extend_from_slice(field.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, fields: &[FormField<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields)))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_returns_fixed_payload() {
    let app = create_test_app(Arc::new(MockLlmClient::new()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(
        body,
        serde_json::json!({"status": "healthy", "service": "StudyWithAI API"})
    );
}

#[tokio::test]
async fn test_root_returns_service_descriptor() {
    let app = create_test_app(Arc::new(MockLlmClient::new()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "StudyWithAI API");
    assert!(body["endpoints"]["POST /generate-flashcards"].is_string());
}

#[tokio::test]
async fn test_generate_flashcards_happy_path() {
    let reply = r#"```json
{"flashcards":[
    {"front":"What is photosynthesis?","back":"Conversion of light into chemical energy"},
    {"front":"X","back":""}
]}
```"#;
    let mock = Arc::new(MockLlmClient::new().with_text_response(reply));
    let app = create_test_app(mock.clone());

    let request = multipart_request(
        "/generate-flashcards",
        &[
            text_field("prompt", "Photosynthesis converts light into chemical energy."),
            text_field("num_flashcards", "2"),
        ],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Generated 1 flashcards successfully");
    assert!(!body["session_id"].as_str().unwrap().is_empty());

    // The card with the empty back is dropped.
    let flashcards = body["flashcards"].as_array().unwrap();
    assert_eq!(flashcards.len(), 1);
    assert_eq!(flashcards[0]["number"], 1);
    assert_eq!(flashcards[0]["front"], "What is photosynthesis?");
    assert_eq!(
        flashcards[0]["back"],
        "Conversion of light into chemical energy"
    );

    // The requested count flows into the agent instruction.
    let requests = mock.get_requests();
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0].messages[1]
            .content
            .starts_with("Create 2 flashcards")
    );
}

#[tokio::test]
async fn test_generate_quiz_uses_default_count() {
    let reply = r#"{"quiz_questions":[{"question":"Q?","answer":"A"}]}"#;
    let mock = Arc::new(MockLlmClient::new().with_text_response(reply));
    let app = create_test_app(mock.clone());

    let request = multipart_request("/generate-quiz", &[text_field("prompt", "Some notes")]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    let questions = body["quiz_questions"].as_array().unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0]["type"], "multiple_choice");
    assert_eq!(questions[0]["difficulty"], "medium");

    let requests = mock.get_requests();
    assert!(
        requests[0].messages[1]
            .content
            .starts_with("Create a quiz with 5 questions")
    );
}

#[tokio::test]
async fn test_non_pdf_upload_rejected_without_invoking_agent() {
    let mock = Arc::new(MockLlmClient::new().with_text_response("{}"));
    let app = create_test_app(mock.clone());

    let request = multipart_request(
        "/generate-flashcards",
        &[
            text_field("prompt", "Some notes"),
            file_field("notes.txt", b"plain text output"),
        ],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("notes.txt"));
    assert_eq!(body["error"], "HTTP 400");

    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_corrupt_pdf_yields_400_envelope() {
    let mock = Arc::new(MockLlmClient::new().with_text_response("{}"));
    let app = create_test_app(mock.clone());

    let request = multipart_request(
        "/generate-quiz",
        &[
            text_field("prompt", "Some notes"),
            file_field("broken.pdf", b"definitely not a pdf"),
        ],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("Error reading PDF"));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_missing_prompt_is_400() {
    let app = create_test_app(Arc::new(MockLlmClient::new()));

    let request = multipart_request("/generate-flashcards", &[text_field("num_flashcards", "3")]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("prompt"));
}

#[tokio::test]
async fn test_non_positive_count_is_400() {
    let app = create_test_app(Arc::new(MockLlmClient::new()));

    let request = multipart_request(
        "/generate-quiz",
        &[text_field("prompt", "notes"), text_field("num_questions", "0")],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unparseable_model_reply_degrades_to_zero_items() {
    let mock = Arc::new(
        MockLlmClient::new().with_text_response("Sorry, I cannot help with that request."),
    );
    let app = create_test_app(mock);

    let request = multipart_request("/generate-flashcards", &[text_field("prompt", "notes")]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Generated 0 flashcards successfully");
    assert!(body["flashcards"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_agent_failure_is_500_envelope() {
    let mock = Arc::new(MockLlmClient::new().with_error("upstream unavailable".to_string()));
    let app = create_test_app(mock);

    let request = multipart_request("/generate-quiz", &[text_field("prompt", "notes")]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "HTTP 500");
}

#[tokio::test]
async fn test_fresh_session_id_per_call() {
    let mock = Arc::new(MockLlmClient::new());
    mock.responses
        .lock()
        .unwrap()
        .push(common::mocks::text_response(r#"{"flashcards":[]}"#));
    mock.responses
        .lock()
        .unwrap()
        .push(common::mocks::text_response(r#"{"flashcards":[]}"#));
    let app = create_test_app(mock);

    let first = app
        .clone()
        .oneshot(multipart_request(
            "/generate-flashcards",
            &[text_field("prompt", "notes")],
        ))
        .await
        .unwrap();
    let second = app
        .oneshot(multipart_request(
            "/generate-flashcards",
            &[text_field("prompt", "notes")],
        ))
        .await
        .unwrap();

    let first_id = response_json(first).await["session_id"].clone();
    let second_id = response_json(second).await["session_id"].clone();

    assert_ne!(first_id, second_id);
}
