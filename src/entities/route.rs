use chrono::{DateTime, Utc};
use geo_types::LineString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

/// Routing profile passed to the directions service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportMode {
    #[serde(rename = "foot-walking")]
    FootWalking,
    #[serde(rename = "driving-car")]
    DrivingCar,
}

impl Default for TransportMode {
    fn default() -> Self {
        TransportMode::FootWalking
    }
}

impl TransportMode {
    pub fn profile(&self) -> &'static str {
        match self {
            TransportMode::FootWalking => "foot-walking",
            TransportMode::DrivingCar => "driving-car",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub token: Uuid,
    pub transport_mode: TransportMode,
    pub start: Coordinates,
    pub end: Coordinates,
    pub duration_seconds: f64,
    pub distance_meters: f64,
    pub polyline: Vec<Coordinates>,
    pub fetched_at: DateTime<Utc>,
}

impl Route {
    pub fn new(
        transport_mode: TransportMode,
        start: Coordinates,
        end: Coordinates,
        duration_seconds: f64,
        distance_meters: f64,
        polyline: Vec<Coordinates>,
    ) -> Self {
        Route {
            token: Uuid::new_v4(),
            transport_mode,
            start,
            end,
            duration_seconds,
            distance_meters,
            polyline,
            fetched_at: Utc::now(),
        }
    }

    pub fn line_string(&self) -> LineString<f64> {
        self.polyline.iter().map(|c| (c.longitude, c.latitude)).collect()
    }
}

#[test]
fn transport_mode_uses_profile_names() {
    let mode: TransportMode = serde_json::from_str("\"driving-car\"").unwrap();
    assert_eq!(mode, TransportMode::DrivingCar);
    assert_eq!(TransportMode::default().profile(), "foot-walking");
}

#[test]
fn route_exposes_polyline_as_line_string() {
    let start = Coordinates::new(139.630, 35.450);
    let end = Coordinates::new(139.636, 35.455);
    let route = Route::new(
        TransportMode::FootWalking,
        start,
        end,
        600.0,
        780.0,
        vec![start, Coordinates::new(139.633, 35.452), end],
    );

    let line = route.line_string();
    assert_eq!(line.0.len(), 3);
    assert_eq!(line.0[2].x, 139.636);
}
