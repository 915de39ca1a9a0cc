use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::application::ports::{
    ChatClient, DirectionsError, SpeechRecognizer, SpeechSynthesizer,
};
use crate::domain::TravelMode;
use crate::presentation::state::AppState;

use super::envelope::error_response;

fn directions_status(error: &DirectionsError) -> StatusCode {
    match error {
        DirectionsError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        DirectionsError::NoRoute { .. } => StatusCode::NOT_FOUND,
        DirectionsError::ApiRequestFailed(_) => StatusCode::BAD_GATEWAY,
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub mode: Option<String>,
}

#[tracing::instrument(skip(state, request))]
pub async fn directions_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<DirectionsRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    if request.origin.trim().is_empty() || request.destination.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "origin and destination are required",
        );
    }

    let mode = request
        .mode
        .as_deref()
        .and_then(|m| m.parse().ok())
        .unwrap_or_default();

    match state
        .directions
        .directions(&request.origin, &request.destination, mode)
        .await
    {
        Ok(summary) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "origin": summary.origin,
                    "destination": summary.destination,
                    "mode": mode.to_string(),
                    "routes": summary.routes,
                    "legs": summary.legs,
                    "timestamp": Utc::now().to_rfc3339(),
                },
                "message": "Directions retrieved successfully",
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Directions request failed");
            error_response(directions_status(&e), "Directions lookup failed", e.to_string())
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportOptionsRequest {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub modes: Vec<String>,
}

/// Queries the directions provider once per requested travel mode. Modes that
/// fail are reported as warnings instead of failing the whole request.
#[tracing::instrument(skip(state, request))]
pub async fn transport_options_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<TransportOptionsRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    if request.origin.trim().is_empty() || request.destination.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "origin and destination are required",
        );
    }

    let modes: Vec<TravelMode> = if request.modes.is_empty() {
        vec![
            TravelMode::Transit,
            TravelMode::Driving,
            TravelMode::Walking,
        ]
    } else {
        request
            .modes
            .iter()
            .filter_map(|m| m.parse().ok())
            .collect()
    };
    if modes.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Invalid travel modes",
            "Supported modes: transit, driving, walking, bicycling",
        );
    }

    let mut options = Vec::new();
    let mut warnings = Vec::new();
    for mode in modes {
        match state
            .directions
            .directions(&request.origin, &request.destination, mode)
            .await
        {
            Ok(summary) => options.push(json!({
                "mode": mode.to_string(),
                "routes": summary.routes,
                "legs": summary.legs,
            })),
            Err(e) => {
                tracing::warn!(mode = %mode, error = %e, "Travel mode unavailable");
                warnings.push(format!("{}: {}", mode, e));
            }
        }
    }

    if options.is_empty() {
        return error_response(
            StatusCode::NOT_FOUND,
            "No transportation options found",
            warnings.join("; "),
        );
    }

    let mut body = json!({
        "success": true,
        "data": {
            "origin": request.origin,
            "destination": request.destination,
            "options": options,
            "timestamp": Utc::now().to_rfc3339(),
        },
        "message": "Transportation options retrieved successfully",
    });
    if !warnings.is_empty() {
        body["warnings"] = json!(warnings);
    }

    (StatusCode::OK, Json(body)).into_response()
}

#[derive(Deserialize)]
pub struct RealtimeQuery {
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub transit_type: Option<String>,
}

/// Realtime transit information. No live feed is wired up, so this reports
/// the general service notice shape the clients expect.
pub async fn realtime_handler(Query(query): Query<RealtimeQuery>) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "location": query.location,
            "transitType": query.transit_type.unwrap_or_else(|| "all".to_string()),
            "updates": [],
            "notice": "Realtime transit updates are not available for this region",
            "timestamp": Utc::now().to_rfc3339(),
        },
        "message": "Realtime transit information retrieved",
    }))
}

fn valid_coordinates(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

/// Deterministic variation derived from the coordinates, so nearby-station
/// distances differ between locations without a randomness source.
fn coordinate_seed(latitude: f64, longitude: f64) -> u64 {
    ((latitude.abs() * 1000.0) as u64).wrapping_add((longitude.abs() * 1000.0) as u64)
}

fn nearby_stations(latitude: f64, longitude: f64) -> Vec<Value> {
    let seed = coordinate_seed(latitude, longitude);
    let metro_distance = 100 + seed % 500;
    let bus_distance = 50 + seed % 300;
    vec![
        json!({
            "id": "ST1",
            "name": "Central Station",
            "type": "metro",
            "distance": metro_distance,
            "walkingTime": metro_distance.div_ceil(80),
            "coordinates": { "lat": latitude + 0.001, "lng": longitude + 0.001 },
        }),
        json!({
            "id": "ST2",
            "name": "Main Street Bus Stop",
            "type": "bus",
            "distance": bus_distance,
            "walkingTime": bus_distance.div_ceil(80),
            "coordinates": { "lat": latitude - 0.0005, "lng": longitude + 0.0008 },
        }),
    ]
}

fn nearby_transport(latitude: f64, longitude: f64, transport_type: &str) -> Value {
    let seed = coordinate_seed(latitude, longitude);
    let bus = json!([{
        "type": "bus",
        "name": "Route 42",
        "stop": "Main Street Bus Stop",
        "nextArrival": 2 + seed % 13,
        "frequency": "Every 8-12 minutes",
        "status": "On time",
    }]);
    let metro = json!([{
        "type": "metro",
        "name": "Line M1",
        "station": "Central Station",
        "nextArrival": 1 + seed % 9,
        "frequency": "Every 4-6 minutes",
        "status": "On time",
    }]);
    match transport_type {
        "bus" => json!({ "bus": bus, "metro": [] }),
        "metro" => json!({ "bus": [], "metro": metro }),
        _ => json!({ "bus": bus, "metro": metro }),
    }
}

fn traffic_snapshot() -> Value {
    json!({
        "congestion": "moderate",
        "averageSpeed": 35,
        "incidents": [],
        "estimatedDelay": 5,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationTrackRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[tracing::instrument(skip(request))]
pub async fn location_track_handler(
    Json(request): Json<LocationTrackRequest>,
) -> impl IntoResponse {
    if !valid_coordinates(request.latitude, request.longitude) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Invalid coordinates",
            "latitude must be within -90..90 and longitude within -180..180",
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "location": {
                    "latitude": request.latitude,
                    "longitude": request.longitude,
                    "accuracy": request.accuracy.unwrap_or(10.0),
                    "timestamp": request.timestamp.unwrap_or_else(Utc::now).to_rfc3339(),
                },
                "nearbyStations": nearby_stations(request.latitude, request.longitude),
                "alerts": [],
            },
            "message": "Location tracked successfully",
        })),
    )
        .into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_radius")]
    pub radius: u32,
    #[serde(default = "default_transport_type")]
    pub transport_type: String,
}

fn default_radius() -> u32 {
    1000
}

fn default_transport_type() -> String {
    "all".to_string()
}

fn validate_location_query(query: &LocationQuery) -> Option<axum::response::Response> {
    if !valid_coordinates(query.latitude, query.longitude) {
        return Some(error_response(
            StatusCode::BAD_REQUEST,
            "Invalid coordinates",
            "latitude must be within -90..90 and longitude within -180..180",
        ));
    }
    if !(100..=10_000).contains(&query.radius) {
        return Some(error_response(
            StatusCode::BAD_REQUEST,
            "Invalid radius",
            "radius must be between 100 and 10000 meters",
        ));
    }
    None
}

pub async fn location_realtime_handler(
    Query(query): Query<LocationQuery>,
) -> impl IntoResponse {
    if let Some(rejection) = validate_location_query(&query) {
        return rejection;
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "location": {
                    "latitude": query.latitude,
                    "longitude": query.longitude,
                    "radius": query.radius,
                },
                "nearbyTransport": nearby_transport(
                    query.latitude,
                    query.longitude,
                    &query.transport_type,
                ),
                "traffic": traffic_snapshot(),
                "timestamp": Utc::now().to_rfc3339(),
            },
            "message": "Location-based real-time data retrieved",
        })),
    )
        .into_response()
}

pub async fn location_nearby_handler(Query(query): Query<LocationQuery>) -> impl IntoResponse {
    if let Some(rejection) = validate_location_query(&query) {
        return rejection;
    }

    let stations = nearby_stations(query.latitude, query.longitude);
    let walking: Vec<Value> = stations
        .iter()
        .map(|s| {
            json!({
                "station": s["name"],
                "distance": s["distance"],
                "walkingTime": s["walkingTime"],
            })
        })
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "location": {
                    "latitude": query.latitude,
                    "longitude": query.longitude,
                    "radius": query.radius,
                },
                "nearbyOptions": nearby_transport(
                    query.latitude,
                    query.longitude,
                    &query.transport_type,
                ),
                "walkingDistances": walking,
                "timestamp": Utc::now().to_rfc3339(),
            },
            "message": "Nearby transportation options retrieved",
        })),
    )
        .into_response()
}

pub async fn help_handler() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "endpoints": {
                "POST /api/transportation/options": {
                    "description": "Transportation options between two points",
                    "parameters": {
                        "origin": "string (required)",
                        "destination": "string (required)",
                        "modes": "array (optional) - transit, driving, walking, bicycling",
                    },
                },
                "POST /api/transportation/directions": {
                    "description": "Directions for a single travel mode",
                    "parameters": {
                        "origin": "string (required)",
                        "destination": "string (required)",
                        "mode": "string (optional) - transit, driving, walking, bicycling",
                    },
                },
                "GET /api/transportation/realtime": {
                    "description": "Real-time transit updates",
                    "parameters": {
                        "location": "string (optional)",
                        "type": "string (optional) - all, bus, metro",
                    },
                },
                "POST /api/transportation/location/track": {
                    "description": "Track the current location and list nearby stations",
                    "parameters": {
                        "latitude": "number (required)",
                        "longitude": "number (required)",
                        "accuracy": "number (optional, meters)",
                    },
                },
                "GET /api/transportation/location/realtime": {
                    "description": "Real-time transport data around a coordinate",
                    "parameters": {
                        "latitude": "number (required)",
                        "longitude": "number (required)",
                        "radius": "number (optional, 100-10000 meters)",
                        "transportType": "string (optional) - all, bus, metro",
                    },
                },
                "GET /api/transportation/location/nearby": {
                    "description": "Nearby stations with walking distances",
                    "parameters": {
                        "latitude": "number (required)",
                        "longitude": "number (required)",
                        "radius": "number (optional, 100-10000 meters)",
                    },
                },
                "GET /api/transportation/status": {
                    "description": "Service status and configured provider",
                },
            },
        },
        "message": "Transportation API help retrieved",
    }))
}

pub async fn transportation_status_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    let live_configured = state.settings.maps.api_key.is_some();
    Json(json!({
        "success": true,
        "data": {
            "service": "transportation",
            "provider": state.directions.provider_name(),
            "liveDirectionsConfigured": live_configured,
            "status": "operational",
            "timestamp": Utc::now().to_rfc3339(),
        },
        "message": "Transportation service status retrieved",
    }))
}
