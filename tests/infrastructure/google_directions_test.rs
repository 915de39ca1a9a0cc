use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use wayfarer::application::ports::{DirectionsError, DirectionsProvider};
use wayfarer::domain::TravelMode;
use wayfarer::infrastructure::maps::{GoogleDirectionsClient, MockDirectionsProvider};

async fn start_mock_maps_server(response_body: Value) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/maps/api/directions/json",
        get(move || async move { Json(response_body) }),
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

#[tokio::test]
async fn given_no_api_key_when_requesting_directions_then_service_is_unavailable() {
    let client = GoogleDirectionsClient::new("http://localhost:1", "");

    let result = client
        .directions("Shibuya", "Asakusa", TravelMode::Transit)
        .await;

    assert!(matches!(result, Err(DirectionsError::ServiceUnavailable)));
}

#[tokio::test]
async fn given_routes_in_response_when_requesting_directions_then_legs_come_from_first_route() {
    let body = json!({
        "routes": [
            {
                "summary": "Ginza Line",
                "legs": [{"duration": {"text": "30 mins"}}],
            }
        ],
    });
    let (base_url, shutdown_tx) = start_mock_maps_server(body).await;
    let client = GoogleDirectionsClient::new(&base_url, "maps-key");

    let summary = client
        .directions("Shibuya", "Asakusa", TravelMode::Transit)
        .await
        .unwrap();

    assert_eq!(summary.origin, "Shibuya");
    assert_eq!(summary.legs[0]["duration"]["text"], json!("30 mins"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_routes_when_requesting_directions_then_no_route_error_names_endpoints() {
    let (base_url, shutdown_tx) = start_mock_maps_server(json!({"routes": []})).await;
    let client = GoogleDirectionsClient::new(&base_url, "maps-key");

    let result = client
        .directions("Atlantis", "El Dorado", TravelMode::Driving)
        .await;

    match result {
        Err(DirectionsError::NoRoute {
            origin,
            destination,
        }) => {
            assert_eq!(origin, "Atlantis");
            assert_eq!(destination, "El Dorado");
        }
        other => panic!("expected no-route error, got {:?}", other.map(|_| ())),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_mock_provider_when_requesting_directions_then_it_always_returns_a_route() {
    let provider = MockDirectionsProvider;

    let summary = provider
        .directions("Anywhere", "Somewhere", TravelMode::Walking)
        .await
        .unwrap();

    assert!(summary.routes.is_array());
    assert_eq!(provider.provider_name(), "mock");
}
