use std::sync::{Arc, Mutex};

use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use wayfarer::application::ports::{ChatClient, ChatClientError, ChatOptions};
use wayfarer::infrastructure::chat::FlowiseClient;

type CapturedBody = Arc<Mutex<Option<Value>>>;

async fn start_mock_flowise(
    response_status: u16,
    response_body: Value,
) -> (String, CapturedBody, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let captured: CapturedBody = Arc::new(Mutex::new(None));

    let app = Router::new()
        .route("/api/v1/prediction/{flow_id}", {
            let captured = Arc::clone(&captured);
            post(move |Json(body): Json<Value>| {
                let captured = Arc::clone(&captured);
                let response_body = response_body.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    let status = axum::http::StatusCode::from_u16(response_status).unwrap();
                    (status, Json(response_body)).into_response()
                }
            })
        })
        .route(
            "/api/v1/chatflows",
            get(|| async { Json(json!([{"id": "flow-1"}])) }),
        )
        .route("/api/v1/ping", get(|| async { "pong" }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, captured, shutdown_tx)
}

#[tokio::test]
async fn given_translation_options_when_sending_then_question_wraps_the_instruction() {
    let (base_url, captured, shutdown_tx) =
        start_mock_flowise(200, json!({"text": "Hola mundo"})).await;
    let client = FlowiseClient::new(&base_url, "test-key");
    let options = ChatOptions::translation(Some("en".to_string()), Some("es".to_string()));

    let reply = client
        .send_message("Hello world", "flow-1", &options)
        .await
        .unwrap();

    assert_eq!(reply.answer, "Hola mundo");
    let body = captured.lock().unwrap().clone().unwrap();
    let question = body["question"].as_str().unwrap();
    assert!(question.starts_with("You are a translator, translate from language en to language es"));
    assert!(question.contains("Text to translate: \"Hello world\""));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_language_options_when_sending_then_message_goes_out_unmodified() {
    let (base_url, captured, shutdown_tx) =
        start_mock_flowise(200, json!({"text": "Some advice"})).await;
    let client = FlowiseClient::new(&base_url, "test-key");

    client
        .send_message("Recommend a museum", "flow-1", &ChatOptions::default())
        .await
        .unwrap();

    let body = captured.lock().unwrap().clone().unwrap();
    assert_eq!(body["question"], json!("Recommend a museum"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_history_when_sending_then_roles_use_provider_names() {
    let (base_url, captured, shutdown_tx) = start_mock_flowise(200, json!({"text": "ok"})).await;
    let client = FlowiseClient::new(&base_url, "test-key");
    let options = ChatOptions::with_history(vec![
        wayfarer::domain::ChatTurn {
            role: wayfarer::domain::ChatRole::User,
            content: "hi".to_string(),
        },
        wayfarer::domain::ChatTurn {
            role: wayfarer::domain::ChatRole::Assistant,
            content: "hello".to_string(),
        },
    ]);

    client.send_message("next", "flow-1", &options).await.unwrap();

    let body = captured.lock().unwrap().clone().unwrap();
    assert_eq!(body["history"][0]["role"], json!("userMessage"));
    assert_eq!(body["history"][1]["role"], json!("apiMessage"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_sending_then_api_error_carries_provider_message() {
    let (base_url, _, shutdown_tx) =
        start_mock_flowise(422, json!({"message": "Flow is disabled"})).await;
    let client = FlowiseClient::new(&base_url, "test-key");

    let result = client
        .send_message("Hello", "flow-1", &ChatOptions::default())
        .await;

    match result {
        Err(ChatClientError::Api { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "Flow is disabled");
        }
        other => panic!("expected api error, got {:?}", other.map(|_| ())),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_answer_missing_from_payload_when_sending_then_placeholder_answer_is_used() {
    let (base_url, _, shutdown_tx) =
        start_mock_flowise(200, json!({"sessionId": "abc"})).await;
    let client = FlowiseClient::new(&base_url, "test-key");

    let reply = client
        .send_message("Hello", "flow-1", &ChatOptions::default())
        .await
        .unwrap();

    assert_eq!(reply.answer, "Translation completed");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_answer_missing_from_image_payload_when_sending_then_image_placeholder_is_used() {
    let (base_url, _, shutdown_tx) = start_mock_flowise(200, json!({"sessionId": "abc"})).await;
    let client = FlowiseClient::new(&base_url, "test-key");

    let reply = client
        .send_image(b"fake image bytes", "image/png", "flow-1", "Describe this")
        .await
        .unwrap();

    assert_eq!(reply.answer, "Image analysis completed");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_image_when_sending_then_upload_is_a_base64_data_url() {
    let (base_url, captured, shutdown_tx) =
        start_mock_flowise(200, json!({"text": "a sign"})).await;
    let client = FlowiseClient::new(&base_url, "test-key");

    client
        .send_image(b"fake image bytes", "image/jpeg", "flow-1", "Describe this")
        .await
        .unwrap();

    let body = captured.lock().unwrap().clone().unwrap();
    let upload = &body["uploads"][0];
    assert!(upload["data"].as_str().unwrap().starts_with("data:image/jpeg;base64,"));
    assert_eq!(upload["type"], json!("file"));
    assert_eq!(upload["name"], json!("image.jpeg"));
    assert_eq!(upload["mime"], json!("image/jpeg"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_chatflows_route_when_listing_then_provider_payload_is_returned() {
    let (base_url, _, shutdown_tx) = start_mock_flowise(200, json!({})).await;
    let client = FlowiseClient::new(&base_url, "test-key");

    let flows = client.list_flows().await.unwrap();

    assert_eq!(flows[0]["id"], json!("flow-1"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_reachable_provider_when_pinging_then_returns_ok() {
    let (base_url, _, shutdown_tx) = start_mock_flowise(200, json!({})).await;
    let client = FlowiseClient::new(&base_url, "test-key");

    assert!(client.ping().await.is_ok());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unreachable_provider_when_pinging_then_returns_transport_error() {
    let client = FlowiseClient::new("http://127.0.0.1:1", "test-key");

    let result = client.ping().await;

    assert!(matches!(result, Err(ChatClientError::Transport(_))));
}
