mod point_api;
mod route_api;
mod session_api;
mod state;

use std::time::Duration;

use tokio::sync::RwLock;

pub use state::{compute_view, AppState, View};

use crate::{
    api::API,
    config::Config,
    entities::Mode,
    external::{Directions, Geolocator, HttpGeolocator, OpenRouteService},
    store::PointStore,
};

type DynDirections = Box<dyn Directions + Send + Sync>;
type DynGeolocator = Box<dyn Geolocator + Send + Sync>;

pub struct Engine {
    restaurants: PointStore,
    shelters: PointStore,
    state: RwLock<AppState>,
    directions: DynDirections,
    geolocator: Option<DynGeolocator>,
    geolocation_timeout: Duration,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(config: &Config) -> Self {
        let restaurants =
            PointStore::load(Mode::Restaurant, config.restaurant_sources.clone()).await;
        let shelters = PointStore::load(Mode::Shelter, config.shelter_sources.clone()).await;

        let directions = OpenRouteService::new(
            config.routing_api_base.clone(),
            config.routing_api_key.clone(),
        );

        if config.routing_api_key.is_none() {
            tracing::warn!("ORS_API_KEY is not set, route requests will fail");
        }

        let geolocator = config
            .geolocation_url
            .as_ref()
            .map(|url| Box::new(HttpGeolocator::new(url.clone())) as DynGeolocator);

        Self::from_parts(
            restaurants,
            shelters,
            Box::new(directions),
            geolocator,
            config.geolocation_timeout,
        )
    }

    pub fn from_parts(
        restaurants: PointStore,
        shelters: PointStore,
        directions: DynDirections,
        geolocator: Option<DynGeolocator>,
        geolocation_timeout: Duration,
    ) -> Self {
        Self {
            restaurants,
            shelters,
            state: RwLock::new(AppState::default()),
            directions,
            geolocator,
            geolocation_timeout,
        }
    }

    fn store(&self, mode: Mode) -> &PointStore {
        match mode {
            Mode::Restaurant => &self.restaurants,
            Mode::Shelter => &self.shelters,
        }
    }
}

impl API for Engine {}
