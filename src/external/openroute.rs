use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    entities::{Coordinates, Route, TransportMode},
    error::{
        config_error, invalid_input_error, route_not_found_error, upstream_error, Error,
    },
};

/// Anything that can plan a route between two points.
#[async_trait]
pub trait Directions {
    async fn directions(
        &self,
        start: Coordinates,
        end: Coordinates,
        mode: TransportMode,
    ) -> Result<Route, Error>;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub properties: Option<Properties>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Properties {
    pub summary: Option<Summary>,
}

/// ORS leaves out zero-valued fields.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub distance: f64,
}

/// Client for the OpenRouteService directions endpoint.
#[derive(Clone)]
pub struct OpenRouteService {
    api_base: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenRouteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouteService")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl OpenRouteService {
    pub fn new(api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Directions for OpenRouteService {
    #[tracing::instrument(skip(self))]
    async fn directions(
        &self,
        start: Coordinates,
        end: Coordinates,
        mode: TransportMode,
    ) -> Result<Route, Error> {
        let key = self
            .api_key
            .clone()
            .ok_or_else(|| config_error("ORS_API_KEY"))?;

        let url = format!(
            "{}/v2/directions/{}",
            self.api_base.trim_end_matches('/'),
            mode.profile()
        );
        let start_param: String = start.into();
        let end_param: String = end.into();

        let res = self
            .client
            .get(url)
            .query(&[("api_key", key)])
            .query(&[("start", start_param)])
            .query(&[("end", end_param)])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code == 404 {
            return Err(route_not_found_error());
        } else if status_code == 401 || status_code == 403 {
            tracing::error!(status_code, "routing service rejected the api key");
            return Err(upstream_error());
        } else if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: Response = res.json().await.map_err(|_| upstream_error())?;

        route_from_response(data, mode, start, end)
    }
}

/// Takes the first feature's geometry and summary. No geometry means no route.
pub fn route_from_response(
    data: Response,
    mode: TransportMode,
    start: Coordinates,
    end: Coordinates,
) -> Result<Route, Error> {
    let feature = data
        .features
        .into_iter()
        .next()
        .ok_or_else(route_not_found_error)?;

    let polyline: Vec<Coordinates> = feature
        .geometry
        .map(|geometry| geometry.coordinates)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|position| match position.as_slice() {
            [longitude, latitude, ..] => Some(Coordinates::new(*longitude, *latitude)),
            _ => None,
        })
        .collect();

    if polyline.is_empty() {
        return Err(route_not_found_error());
    }

    let summary = feature
        .properties
        .and_then(|properties| properties.summary)
        .unwrap_or_default();

    Ok(Route::new(
        mode,
        start,
        end,
        summary.duration,
        summary.distance,
        polyline,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Coordinates {
        Coordinates::new(139.630, 35.450)
    }

    fn end() -> Coordinates {
        Coordinates::new(139.636, 35.455)
    }

    #[test]
    fn reads_first_feature() {
        let data: Response = serde_json::from_str(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "geometry": { "type": "LineString", "coordinates": [[139.630, 35.450], [139.633, 35.452, 12.5], [139.636, 35.455]] },
                    "properties": { "summary": { "distance": 812.4, "duration": 584.9 } }
                }]
            }"#,
        )
        .unwrap();

        let route = route_from_response(data, TransportMode::FootWalking, start(), end()).unwrap();
        assert_eq!(route.distance_meters, 812.4);
        assert_eq!(route.duration_seconds, 584.9);
        assert_eq!(route.polyline.len(), 3);
        assert_eq!(route.polyline[1], Coordinates::new(139.633, 35.452));
    }

    #[test]
    fn missing_features_is_route_not_found() {
        let data: Response =
            serde_json::from_str(r#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        let err =
            route_from_response(data, TransportMode::DrivingCar, start(), end()).unwrap_err();
        assert_eq!(err, route_not_found_error());

        let data: Response = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert!(route_from_response(data, TransportMode::DrivingCar, start(), end()).is_err());
    }

    #[test]
    fn empty_geometry_is_route_not_found() {
        let data: Response = serde_json::from_str(
            r#"{"features":[{"geometry":{"coordinates":[]},"properties":{"summary":{}}}]}"#,
        )
        .unwrap();
        let err =
            route_from_response(data, TransportMode::FootWalking, start(), end()).unwrap_err();
        assert_eq!(err.code, 105);
    }

    #[test]
    fn missing_api_key_fails_before_any_request() {
        let client = OpenRouteService::new("http://127.0.0.1:9", None);
        let request = client.directions(start(), end(), TransportMode::FootWalking);
        let err = tokio_test::block_on(request).unwrap_err();
        assert_eq!(err.code, 1);
    }
}
