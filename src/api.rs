use async_trait::async_trait;

use crate::engine::{AppState, View};
use crate::entities::{
    Coordinates, FilterCriteria, LocationSource, Mode, PointOfInterest, Route, TransportMode,
};
use crate::error::Error;
use crate::search::Nearest;

#[async_trait]
pub trait PointAPI {
    async fn list_points(&self, mode: Mode) -> Result<Vec<PointOfInterest>, Error>;
    async fn find_point(&self, mode: Mode, id: String) -> Result<PointOfInterest, Error>;
    async fn filter_points(
        &self,
        mode: Mode,
        criteria: FilterCriteria,
    ) -> Result<Vec<PointOfInterest>, Error>;
    async fn find_nearest(
        &self,
        mode: Mode,
        from: Coordinates,
        criteria: FilterCriteria,
    ) -> Result<Nearest, Error>;
    async fn reload_points(&self, mode: Mode) -> Result<usize, Error>;
}

#[async_trait]
pub trait SessionAPI {
    async fn find_session(&self) -> Result<AppState, Error>;
    async fn find_view(&self) -> Result<View, Error>;
    async fn switch_mode(&self, mode: Mode) -> Result<View, Error>;
    async fn update_criteria(&self, criteria: FilterCriteria) -> Result<View, Error>;
    async fn update_transport_mode(&self, transport_mode: TransportMode) -> Result<AppState, Error>;
    async fn locate(&self, source: LocationSource) -> Result<View, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn create_route(
        &self,
        start: Coordinates,
        end: Coordinates,
        transport_mode: Option<TransportMode>,
    ) -> Result<Route, Error>;
    async fn route_to_point(&self, id: String) -> Result<Route, Error>;
    async fn route_to_nearest(&self) -> Result<Route, Error>;
}

pub trait API: PointAPI + SessionAPI + RouteAPI {}
