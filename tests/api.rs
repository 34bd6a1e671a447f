use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use wayfarer::config::Config;
use wayfarer::engine::Engine;
use wayfarer::server::router;

const API_KEY: &str = "test-key";

async fn spawn(app: Router) -> SocketAddr {
    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(app.into_make_service());
    let addr = server.local_addr();

    tokio::spawn(server);

    addr
}

/// Answers like the directions endpoint: a two-point line, or no features when
/// start and end coincide.
async fn directions(
    Path(profile): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if params.get("api_key").map(String::as_str) != Some(API_KEY) {
        return (StatusCode::FORBIDDEN, Json(json!({ "error": "bad key" })));
    }

    let parse = |key: &str| -> Vec<f64> {
        params
            .get(key)
            .map(|pair| pair.split(',').filter_map(|n| n.parse().ok()).collect())
            .unwrap_or_default()
    };
    let (start, end) = (parse("start"), parse("end"));

    if start == end {
        return (StatusCode::OK, Json(json!({ "type": "FeatureCollection", "features": [] })));
    }

    let duration = if profile == "driving-car" { 120.0 } else { 600.0 };

    (
        StatusCode::OK,
        Json(json!({
            "type": "FeatureCollection",
            "features": [{
                "geometry": { "type": "LineString", "coordinates": [start, end] },
                "properties": { "summary": { "distance": 780.0, "duration": duration } }
            }]
        })),
    )
}

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

async fn start_service() -> String {
    let routing = spawn(Router::new().route("/v2/directions/:profile", get(directions))).await;

    let config = Config {
        addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        restaurant_sources: vec![data_file("restaurants.json")],
        shelter_sources: vec![data_file("missing.geojson"), data_file("shelters.geojson")],
        routing_api_base: format!("http://{}", routing),
        routing_api_key: Some(API_KEY.into()),
        geolocation_url: None,
        geolocation_timeout: Duration::from_secs(1),
    };

    let engine = Engine::new(&config).await;
    let addr = spawn(router(engine)).await;

    format!("http://{}", addr)
}

#[tokio::test]
async fn lists_and_filters_points() {
    let base = start_service().await;
    let client = reqwest::Client::new();

    let shelters: Vec<Value> = client
        .get(format!("{}/points/evacuation", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(shelters.len(), 4);

    let res = client
        .post(format!("{}/points/shelter/filter", base))
        .json(&json!({ "min_shelter_level": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let filtered: Vec<Value> = res.json().await.unwrap();
    assert_eq!(filtered.len(), 2);

    let res = client
        .post(format!("{}/points/restaurant/filter", base))
        .json(&json!({ "query": "ramen" }))
        .send()
        .await
        .unwrap();
    let filtered: Vec<Value> = res.json().await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["id"], "yk-0002");

    let res = client
        .get(format!("{}/points/restaurant/id/yk-0004", base))
        .send()
        .await
        .unwrap();
    let point: Value = res.json().await.unwrap();
    assert_eq!(point["attributes"]["rating"], 4.6);
}

#[tokio::test]
async fn no_match_is_reported_to_the_caller() {
    let base = start_service().await;

    let res = reqwest::Client::new()
        .post(format!("{}/points/shelter/filter", base))
        .json(&json!({ "min_shelter_level": 9 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 104);
}

#[tokio::test]
async fn finds_nearest_shelter() {
    let base = start_service().await;

    let nearest: Value = reqwest::Client::new()
        .post(format!("{}/points/shelter/nearest", base))
        .json(&json!({ "from": { "longitude": 139.6300, "latitude": 35.4500 } }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(nearest["point"]["name"], "Honcho Elementary School");
    assert!(nearest["distance_km"].as_f64().unwrap() < 0.2);
}

#[tokio::test]
async fn session_flow_routes_to_nearest() {
    let base = start_service().await;
    let client = reqwest::Client::new();

    let view: Value = client
        .patch(format!("{}/session/mode", base))
        .json(&json!({ "mode": "evacuation" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["mode"], "shelter");

    let here = json!({ "type": "coordinates", "longitude": 139.6300, "latitude": 35.4500 });
    let view: Value = client
        .post(format!("{}/session/location", base))
        .json(&json!({ "source": here }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["nearest"]["point"]["name"], "Honcho Elementary School");

    let res = client
        .patch(format!("{}/session/transport_mode", base))
        .json(&json!({ "transport_mode": "driving-car" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let route: Value = client
        .post(format!("{}/routes/nearest", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(route["transport_mode"], "driving-car");
    assert_eq!(route["duration_seconds"], 120.0);
    assert_eq!(route["end"]["longitude"], 139.629);

    let view: Value = client
        .get(format!("{}/session/view", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["route"]["token"], route["token"]);
}

#[tokio::test]
async fn route_errors_are_surfaced() {
    let base = start_service().await;
    let client = reqwest::Client::new();

    let same = json!({ "longitude": 139.63, "latitude": 35.45 });
    let res = client
        .post(format!("{}/routes", base))
        .json(&json!({ "start": same, "end": same }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 105);

    let res = client
        .post(format!("{}/routes/nearest", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unreachable_routing_service_is_a_network_error() {
    let config = Config {
        routing_api_base: "http://127.0.0.1:9".into(),
        routing_api_key: Some(API_KEY.into()),
        restaurant_sources: vec![],
        shelter_sources: vec![],
        ..Config::from_lookup(|_| None).unwrap()
    };
    let addr = spawn(router(Engine::new(&config).await)).await;

    let res = reqwest::Client::new()
        .post(format!("http://{}/routes", addr))
        .json(&json!({
            "start": { "longitude": 139.63, "latitude": 35.45 },
            "end": { "longitude": 139.64, "latitude": 35.46 }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 10);
}
