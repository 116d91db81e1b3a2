//! End-to-end tests for the tracker HTTP surface
//!
//! Drives the axum router in-process with fake feed and geocoder
//! collaborators, so no network access is needed.

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use iss_tracker::feed::{FeedError, FeedSource, parse_feed};
use iss_tracker::geocode::{ADDRESS_NOT_FOUND, GeocodeError, Geocoder};
use iss_tracker::router::create_router;
use iss_tracker::state::AppState;
use orbit_types::dataset::Dataset;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const SAMPLE_FEED: &str = include_str!("fixtures/iss_sample.xml");

const SINGLE_RECORD_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ndm>
  <oem id="CCSDS_OEM_VERS" version="2.0">
    <header><ORIGINATOR>TEST</ORIGINATOR></header>
    <body>
      <segment>
        <metadata><OBJECT_NAME>ISS</OBJECT_NAME></metadata>
        <data>
          <stateVector>
            <EPOCH>2024-001T00:00:00</EPOCH>
            <X units="km">100</X>
            <Y units="km">200</Y>
            <Z units="km">300</Z>
            <X_DOT units="km/s">3</X_DOT>
            <Y_DOT units="km/s">4</Y_DOT>
            <Z_DOT units="km/s">0</Z_DOT>
          </stateVector>
        </data>
      </segment>
    </body>
  </oem>
</ndm>"#;

/// Serves a fixed document, or fails like an unreachable upstream.
struct FakeFeed {
    xml: Option<&'static str>,
}

#[async_trait]
impl FeedSource for FakeFeed {
    async fn fetch(&self) -> Result<Dataset, FeedError> {
        match self.xml {
            Some(xml) => parse_feed(xml.as_bytes()),
            None => Err(FeedError::Status(503)),
        }
    }
}

struct FixedGeocoder(Result<String, GeocodeError>);

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn reverse_geocode(&self, _: f64, _: f64) -> Result<String, GeocodeError> {
        self.0.clone()
    }
}

fn app_with(
    initial: &str,
    reload_xml: Option<&'static str>,
    geocode: Result<String, GeocodeError>,
) -> Router {
    let dataset = parse_feed(initial.as_bytes()).unwrap();
    let state = AppState::new(
        dataset,
        Arc::new(FakeFeed { xml: reload_xml }),
        Arc::new(FixedGeocoder(geocode)),
        Duration::from_secs(1),
    );
    create_router(state)
}

fn sample_app() -> Router {
    app_with(SAMPLE_FEED, None, Ok("Pacific Ocean".to_string()))
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri).await
}

fn epochs_of(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|sv| sv["epoch"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Single record feed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_epoch_speed() {
    let app = app_with(SINGLE_RECORD_FEED, None, Err(GeocodeError::NoMatch));
    let (status, body) = get(&app, "/epochs/2024-001T00:00:00/speed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"speed": 5.0}));
}

#[tokio::test]
async fn test_epoch_full_record() {
    let app = app_with(SINGLE_RECORD_FEED, None, Err(GeocodeError::NoMatch));
    let (status, body) = get(&app, "/epochs/2024-001T00:00:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "epoch": "2024-001T00:00:00",
            "position": {"x": 100.0, "y": 200.0, "z": 300.0},
            "velocity": {"x": 3.0, "y": 4.0, "z": 0.0}
        })
    );
}

#[tokio::test]
async fn test_epoch_not_found() {
    let app = app_with(SINGLE_RECORD_FEED, None, Err(GeocodeError::NoMatch));
    let (status, body) = get(&app, "/epochs/nonexistent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, _) = get(&app, "/epochs/nonexistent/speed").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&app, "/epochs/nonexistent/location").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_location_falls_back_to_sentinel() {
    let app = app_with(SINGLE_RECORD_FEED, None, Err(GeocodeError::Timeout));
    let (status, body) = get(&app, "/epochs/2024-001T00:00:00/location").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["geoposition"], ADDRESS_NOT_FOUND);

    let expected_altitude = (100.0f64 * 100.0 + 200.0 * 200.0 + 300.0 * 300.0).sqrt() - 6371.0;
    let altitude = body["altitude"].as_f64().unwrap();
    assert!((altitude - expected_altitude).abs() < 1e-9);

    let expected_latitude = 300.0f64.atan2((100.0f64 * 100.0 + 200.0 * 200.0).sqrt()).to_degrees();
    let latitude = body["latitude"].as_f64().unwrap();
    assert!((latitude - expected_latitude).abs() < 1e-9);

    let longitude = body["longitude"].as_f64().unwrap();
    assert!((-180.0..180.0).contains(&longitude));
}

// ---------------------------------------------------------------------------
// Sample feed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_all_epochs() {
    let app = sample_app();
    let (status, body) = get(&app, "/epochs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_list_epochs_paginated() {
    let app = sample_app();
    let (status, body) = get(&app, "/epochs?limit=2&offset=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        epochs_of(&body),
        vec!["2024-045T12:04:00.000Z", "2024-045T12:08:00.000Z"]
    );

    let (_, body) = get(&app, "/epochs?limit=100&offset=4").await;
    assert_eq!(epochs_of(&body), vec!["2024-045T12:16:00.000Z"]);

    let (_, body) = get(&app, "/epochs?offset=50").await;
    assert!(epochs_of(&body).is_empty());
}

#[tokio::test]
async fn test_list_epochs_rejects_bad_params() {
    let app = sample_app();
    for uri in ["/epochs?limit=-1", "/epochs?offset=-3", "/epochs?limit=two", "/epochs?offset=1.5"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn test_now_with_reference_time() {
    let app = sample_app();
    let (status, body) = get(&app, "/now?at=2024-045T12:09:59.000Z").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["closest_epoch"], "2024-045T12:08:00.000Z");
    assert_eq!(body["geoposition"], "Pacific Ocean");

    let expected_speed = (6.9f64 * 6.9 + 1.6 * 1.6 + 2.8 * 2.8).sqrt();
    assert!((body["speed"].as_f64().unwrap() - expected_speed).abs() < 1e-9);
    for field in ["latitude", "longitude", "altitude"] {
        assert!(body[field].is_f64(), "{} missing", field);
    }
}

#[tokio::test]
async fn test_now_accepts_unescaped_offset() {
    let app = sample_app();
    let (status, body) = get(&app, "/now?at=2024-02-14T14:09:59+02:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["closest_epoch"], "2024-045T12:08:00.000Z");

    let (_, body) = get(&app, "/now?at=2024-02-14T14:09:59%2B02:00").await;
    assert_eq!(body["closest_epoch"], "2024-045T12:08:00.000Z");
}

#[tokio::test]
async fn test_now_tie_prefers_earlier_epoch() {
    let app = sample_app();
    let (_, body) = get(&app, "/now?at=2024-045T12:10:00.000Z").await;
    assert_eq!(body["closest_epoch"], "2024-045T12:08:00.000Z");
}

#[tokio::test]
async fn test_now_clamps_to_dataset_ends() {
    let app = sample_app();
    // Wall clock is far past the fixture window
    let (status, body) = get(&app, "/now").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["closest_epoch"], "2024-045T12:16:00.000Z");

    let (_, body) = get(&app, "/now?at=2020-001T00:00:00Z").await;
    assert_eq!(body["closest_epoch"], "2024-045T12:00:00.000Z");
}

#[tokio::test]
async fn test_now_rejects_bad_reference_time() {
    let app = sample_app();
    let (status, body) = get(&app, "/now?at=tomorrow").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("tomorrow"));
}

#[tokio::test]
async fn test_pass_through_routes() {
    let app = sample_app();

    let (status, body) = get(&app, "/comment").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[2], "MASS=459325.00");

    let (status, body) = get(&app, "/header").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ORIGINATOR"], "JSC");

    let (status, body) = get(&app, "/metadata").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["OBJECT_NAME"], "ISS");
    assert_eq!(body["REF_FRAME"], "EME2000");
}

// ---------------------------------------------------------------------------
// Reload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_failed_reload_keeps_previous_dataset() {
    let app = sample_app();
    let (status, body) = send(&app, Method::POST, "/reload").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "UPSTREAM_FETCH_FAILED");

    let (status, body) = get(&app, "/epochs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_reload_swaps_dataset() {
    let app = app_with(
        SAMPLE_FEED,
        Some(SINGLE_RECORD_FEED),
        Ok("Somewhere".to_string()),
    );
    let (status, body) = send(&app, Method::POST, "/reload").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"epochs": 1}));

    let (_, body) = get(&app, "/epochs").await;
    assert_eq!(epochs_of(&body), vec!["2024-001T00:00:00"]);

    let (_, body) = get(&app, "/header").await;
    assert_eq!(body["ORIGINATOR"], "TEST");
}
