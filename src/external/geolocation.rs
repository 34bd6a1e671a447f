use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    entities::Coordinates,
    error::{
        geolocation_permission_denied_error, geolocation_timeout_error,
        geolocation_unavailable_error, Error,
    },
};

#[async_trait]
pub trait Geolocator {
    async fn locate(&self) -> Result<Coordinates, Error>;
}

#[derive(Deserialize)]
struct Position {
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lon", alias = "lng")]
    longitude: f64,
}

/// Asks an HTTP endpoint for the caller's position.
#[derive(Clone, Debug)]
pub struct HttpGeolocator {
    url: String,
    client: reqwest::Client,
}

impl HttpGeolocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Geolocator for HttpGeolocator {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn locate(&self) -> Result<Coordinates, Error> {
        let res = self.client.get(&self.url).send().await.map_err(|err| {
            tracing::warn!(error = %err, "geolocation request failed");
            geolocation_unavailable_error()
        })?;

        let status_code = res.status().as_u16();

        if status_code == 401 || status_code == 403 {
            return Err(geolocation_permission_denied_error());
        } else if status_code != 200 {
            return Err(geolocation_unavailable_error());
        }

        let position: Position = res
            .json()
            .await
            .map_err(|_| geolocation_unavailable_error())?;

        Coordinates::try_new(position.longitude, position.latitude)
            .map_err(|_| geolocation_unavailable_error())
    }
}

/// Bounds a location query. Nothing else in the service carries a timeout.
pub async fn locate_with_timeout<G>(geolocator: &G, timeout: Duration) -> Result<Coordinates, Error>
where
    G: Geolocator + Sync + ?Sized,
{
    tokio::time::timeout(timeout, geolocator.locate())
        .await
        .map_err(|_| geolocation_timeout_error())?
}
