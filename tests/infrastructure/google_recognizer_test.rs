use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use wayfarer::application::ports::{RecognitionError, RecognitionOptions, SpeechRecognizer};
use wayfarer::infrastructure::speech::{GoogleSpeechClient, SpeechAuth};

async fn start_mock_speech_server(
    response_status: u16,
    response_body: Value,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/v1/speech:recognize",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, Json(response_body)).into_response()
        }),
    );

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

    (base_url, shutdown_tx)
}

fn api_key_auth() -> Option<SpeechAuth> {
    SpeechAuth::from_credentials(None, Some("test-key".to_string()))
}

#[tokio::test]
async fn given_no_credentials_when_transcribing_then_fails_without_network_call() {
    let client = GoogleSpeechClient::new("http://localhost:1", None, "en-US");

    let result = client
        .transcribe(b"audio", &RecognitionOptions::default())
        .await;

    assert!(matches!(result, Err(RecognitionError::AuthUnavailable)));
}

#[tokio::test]
async fn given_empty_audio_when_transcribing_then_rejected_as_invalid() {
    let client = GoogleSpeechClient::new("http://localhost:1", api_key_auth(), "en-US");

    let result = client.transcribe(&[], &RecognitionOptions::default()).await;

    assert!(matches!(result, Err(RecognitionError::InvalidAudio(_))));
}

#[tokio::test]
async fn given_multiple_results_when_transcribing_then_segments_join_with_spaces() {
    let body = json!({
        "results": [
            { "alternatives": [{"transcript": "where is"}], "languageCode": "en-us" },
            { "alternatives": [{"transcript": "the station"}] },
        ],
    });
    let (base_url, shutdown_tx) = start_mock_speech_server(200, body).await;
    let client = GoogleSpeechClient::new(&base_url, api_key_auth(), "en-US");

    let transcription = client
        .transcribe(b"fake audio", &RecognitionOptions::default())
        .await
        .unwrap();

    assert_eq!(transcription.text, "where is the station");
    assert_eq!(transcription.language_hint.as_deref(), Some("en-us"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_results_when_transcribing_then_returns_empty_transcript_error() {
    let (base_url, shutdown_tx) = start_mock_speech_server(200, json!({})).await;
    let client = GoogleSpeechClient::new(&base_url, api_key_auth(), "en-US");

    let result = client
        .transcribe(b"silence", &RecognitionOptions::default())
        .await;

    assert!(matches!(result, Err(RecognitionError::EmptyTranscript)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_transcribing_then_error_carries_provider_message() {
    let body = json!({"error": {"message": "Invalid recognition config"}});
    let (base_url, shutdown_tx) = start_mock_speech_server(400, body).await;
    let client = GoogleSpeechClient::new(&base_url, api_key_auth(), "en-US");

    let result = client
        .transcribe(b"fake audio", &RecognitionOptions::default())
        .await;

    match result {
        Err(RecognitionError::ApiRequestFailed(message)) => {
            assert!(message.contains("Invalid recognition config"));
        }
        other => panic!("expected api failure, got {:?}", other),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_auto_language_when_transcribing_then_default_language_is_used() {
    let body = json!({
        "results": [{ "alternatives": [{"transcript": "hola"}] }],
    });
    let (base_url, shutdown_tx) = start_mock_speech_server(200, body).await;
    let client = GoogleSpeechClient::new(&base_url, api_key_auth(), "es-ES");
    let options = RecognitionOptions {
        language_code: Some("auto".to_string()),
        ..RecognitionOptions::default()
    };

    let transcription = client.transcribe(b"fake audio", &options).await.unwrap();

    assert_eq!(transcription.text, "hola");
    shutdown_tx.send(()).ok();
}
