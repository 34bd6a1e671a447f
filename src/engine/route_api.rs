use super::Engine;

use async_trait::async_trait;

use crate::{
    api::{PointAPI, RouteAPI},
    entities::{Coordinates, Route, TransportMode},
    error::{location_required_error, Error},
};

impl Engine {
    /// Fetches a route and makes it the displayed one. A later request simply
    /// overwrites an earlier one. A route that lands after a mode switch is
    /// returned but not displayed.
    async fn fetch_and_show_route(
        &self,
        start: Coordinates,
        end: Coordinates,
        transport_mode: TransportMode,
    ) -> Result<Route, Error> {
        let mode = self.state.read().await.mode;

        let route = self
            .directions
            .directions(start, end, transport_mode)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "route request failed");
                err
            })?;

        tracing::info!(
            token = %route.token,
            distance_meters = route.distance_meters,
            duration_seconds = route.duration_seconds,
            "route fetched"
        );

        let mut state = self.state.write().await;
        if state.mode == mode {
            state.route = Some(route.clone());
        } else {
            tracing::info!(token = %route.token, "mode changed during request, route not shown");
        }

        Ok(route)
    }

    async fn current_location(&self) -> Result<Coordinates, Error> {
        self.state
            .read()
            .await
            .location
            .as_ref()
            .map(|location| location.coordinates)
            .ok_or_else(location_required_error)
    }
}

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_route(
        &self,
        start: Coordinates,
        end: Coordinates,
        transport_mode: Option<TransportMode>,
    ) -> Result<Route, Error> {
        let start = Coordinates::try_new(start.longitude, start.latitude)?;
        let end = Coordinates::try_new(end.longitude, end.latitude)?;

        let transport_mode = match transport_mode {
            Some(transport_mode) => transport_mode,
            None => self.state.read().await.transport_mode,
        };

        self.fetch_and_show_route(start, end, transport_mode).await
    }

    #[tracing::instrument(skip(self))]
    async fn route_to_point(&self, id: String) -> Result<Route, Error> {
        let start = self.current_location().await?;
        let (mode, transport_mode) = {
            let state = self.state.read().await;
            (state.mode, state.transport_mode)
        };

        let point = self.find_point(mode, id).await?;

        self.fetch_and_show_route(start, point.coordinates, transport_mode)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn route_to_nearest(&self) -> Result<Route, Error> {
        let start = self.current_location().await?;
        let state = self.state.read().await.clone();

        let nearest = self
            .find_nearest(state.mode, start, state.criteria.clone())
            .await?;

        self.fetch_and_show_route(start, nearest.point.coordinates, state.transport_mode)
            .await
    }
}
