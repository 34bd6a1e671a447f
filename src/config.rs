use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{config_error, Error};

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_RESTAURANT_DATA: &str = "data/restaurants.json";
pub const DEFAULT_SHELTER_DATA: &str = "data/shelters.geojson,data/shelters.csv";
pub const DEFAULT_ROUTING_API_BASE: &str = "https://api.openrouteservice.org";
pub const DEFAULT_GEOLOCATION_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub restaurant_sources: Vec<PathBuf>,
    pub shelter_sources: Vec<PathBuf>,
    pub routing_api_base: String,
    pub routing_api_key: Option<String>,
    pub geolocation_url: Option<String>,
    pub geolocation_timeout: Duration,
}

fn paths(list: &str) -> Vec<PathBuf> {
    list.split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .collect()
}

impl Config {
    /// Reads the process environment. Call `dotenv` first to pick up `.env`.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let addr = var("WAYFARER_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.into())
            .parse()
            .map_err(|_| config_error("WAYFARER_ADDR"))?;

        let geolocation_timeout = match var("WAYFARER_GEOLOCATION_TIMEOUT_SECS") {
            Some(secs) => secs
                .trim()
                .parse()
                .map_err(|_| config_error("WAYFARER_GEOLOCATION_TIMEOUT_SECS"))?,
            None => DEFAULT_GEOLOCATION_TIMEOUT_SECS,
        };

        Ok(Self {
            addr,
            restaurant_sources: paths(
                &var("WAYFARER_RESTAURANT_DATA").unwrap_or_else(|| DEFAULT_RESTAURANT_DATA.into()),
            ),
            shelter_sources: paths(
                &var("WAYFARER_SHELTER_DATA").unwrap_or_else(|| DEFAULT_SHELTER_DATA.into()),
            ),
            routing_api_base: var("ORS_API_BASE")
                .unwrap_or_else(|| DEFAULT_ROUTING_API_BASE.into()),
            routing_api_key: var("ORS_API_KEY"),
            geolocation_url: var("WAYFARER_GEOLOCATION_URL"),
            geolocation_timeout: Duration::from_secs(geolocation_timeout),
        })
    }
}
