//! Integration tests for moodcast-rx API endpoints
//!
//! Tests drive the full router with in-process fakes standing in for the
//! three upstream collaborators, covering:
//! - Health endpoint
//! - /context success and upstream-failure rendering
//! - /recommend end-to-end orchestration (weather -> model -> enrichment)
//! - Degradation to an empty list on unparseable model output

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot` method

use moodcast_common::{Coordinate, TimeOfDay, WeatherSummary};
use moodcast_rx::services::{
    CatalogError, CatalogSearcher, SongSuggester, SuggestError, Suggestions, TrackMatch,
    WeatherContext, WeatherError, WeatherProvider,
};
use moodcast_rx::{build_router, AppState};

/// Fake weather provider returning a fixed context or a fixed failure.
struct FakeWeather {
    error: Option<String>,
}

#[async_trait]
impl WeatherProvider for FakeWeather {
    async fn current(&self, _coord: &Coordinate) -> Result<WeatherContext, WeatherError> {
        if let Some(message) = &self.error {
            return Err(WeatherError::Upstream(message.clone()));
        }
        // Light rain at 18:30 local time -> Evening
        Ok(WeatherContext {
            local_time: "2024-06-15 18:30:00".to_string(),
            time_of_day: TimeOfDay::Evening,
            weather: WeatherSummary {
                description: "light rain".to_string(),
                temperature: 14.2,
                feels_like: 13.1,
            },
        })
    }
}

/// Fake suggester replaying a canned completion content string.
struct FakeSuggester {
    content: String,
}

#[async_trait]
impl SongSuggester for FakeSuggester {
    async fn suggest(&self, _prompt: &str) -> Result<Suggestions, SuggestError> {
        Ok(moodcast_rx::services::openrouter::parse_suggestions(
            &self.content,
        ))
    }
}

/// Fake catalog: hits only for queries starting with "Riders".
struct FakeCatalog;

#[async_trait]
impl CatalogSearcher for FakeCatalog {
    async fn find_track(&self, query: &str) -> Result<Option<TrackMatch>, CatalogError> {
        if query.starts_with("Riders") {
            Ok(Some(TrackMatch {
                spotify_url: "https://open.spotify.com/track/riders".to_string(),
                album_cover: Some("https://i.scdn.co/image/riders".to_string()),
            }))
        } else {
            Ok(None)
        }
    }
}

/// Test helper: app with fakes; model content and weather failure injectable.
fn setup_app(weather_error: Option<&str>, model_content: &str) -> axum::Router {
    let state = AppState::new(
        Arc::new(FakeWeather {
            error: weather_error.map(String::from),
        }),
        Arc::new(FakeSuggester {
            content: model_content.to_string(),
        }),
        Arc::new(FakeCatalog),
        None,
    );
    build_router(state)
}

/// Test helper: JSON POST request
fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: GET request
fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

const TWO_SONGS: &str = r#"[
    {"name": "Riders on the Storm", "artist": "The Doors", "genre": "psychedelic rock", "mood": "brooding"},
    {"name": "Deep Obscurity", "artist": "Nobody Known", "genre": "ambient", "mood": "calm"}
]"#;

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(None, "[]");

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "moodcast-rx");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_context_returns_weather_and_time() {
    let app = setup_app(None, "[]");

    let response = app
        .oneshot(get("/context?lat=40.7&lon=-74.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["local_time"], "2024-06-15 18:30:00");
    assert_eq!(body["time_of_day"], "Evening");
    assert_eq!(body["weather"]["description"], "light rain");
    assert_eq!(body["weather"]["temperature"], 14.2);
}

#[tokio::test]
async fn test_context_renders_upstream_error() {
    let app = setup_app(Some("Invalid API key"), "[]");

    let response = app
        .oneshot(get("/context?lat=40.7&lon=-74.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Invalid API key");
}

#[tokio::test]
async fn test_recommend_end_to_end() {
    let app = setup_app(None, TWO_SONGS);

    let request = post_json(
        "/recommend",
        json!({"lat": 40.7, "lon": -74.0, "user_input": "rainy jazz"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["time_of_day"], "Evening");
    assert_eq!(body["local_time"], "2024-06-15 18:30:00");
    assert_eq!(body["weather"]["description"], "light rain");

    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 2);

    // First song is a catalog hit, second a miss; order matches model output
    assert_eq!(recs[0]["name"], "Riders on the Storm");
    assert_eq!(
        recs[0]["spotify_url"],
        "https://open.spotify.com/track/riders"
    );
    assert_eq!(recs[0]["album_cover"], "https://i.scdn.co/image/riders");
    assert_eq!(recs[1]["name"], "Deep Obscurity");
    assert!(recs[1]["spotify_url"].is_null());
    assert!(recs[1]["album_cover"].is_null());
}

#[tokio::test]
async fn test_recommend_user_input_defaults_to_empty() {
    let app = setup_app(None, "[]");

    let request = post_json("/recommend", json!({"lat": 40.7, "lon": -74.0}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_recommend_unparseable_model_output_degrades_to_empty() {
    let app = setup_app(None, "Sorry, here are some songs I like: Vienna by Billy Joel");

    let request = post_json(
        "/recommend",
        json!({"lat": 40.7, "lon": -74.0, "user_input": ""}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["time_of_day"], "Evening");
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_recommend_weather_failure_aborts_request() {
    let app = setup_app(Some("city not found"), TWO_SONGS);

    let request = post_json(
        "/recommend",
        json!({"lat": 0.0, "lon": 0.0, "user_input": ""}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "city not found");
}
