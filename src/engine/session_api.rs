use super::{compute_view, AppState, Engine, View};

use async_trait::async_trait;

use crate::{
    api::SessionAPI,
    entities::{
        Coordinates, CurrentLocation, FilterCriteria, LocationOrigin, LocationSource, Mode,
        TransportMode,
    },
    error::{geolocation_unavailable_error, Error},
    external::locate_with_timeout,
};

impl Engine {
    /// Recomputes the view from the current state. Every state change ends here.
    pub(crate) async fn recompute(&self) -> Result<View, Error> {
        let state = self.state.read().await.clone();
        let points = self.store(state.mode).snapshot().await;

        compute_view(&state, &points)
    }
}

#[async_trait]
impl SessionAPI for Engine {
    async fn find_session(&self) -> Result<AppState, Error> {
        Ok(self.state.read().await.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn find_view(&self) -> Result<View, Error> {
        self.recompute().await
    }

    #[tracing::instrument(skip(self))]
    async fn switch_mode(&self, mode: Mode) -> Result<View, Error> {
        {
            let mut state = self.state.write().await;
            if state.mode != mode {
                tracing::info!(from = state.mode.name(), to = mode.name(), "switching mode");
                state.mode = mode;
                state.route = None;
            }
        }

        self.recompute().await
    }

    #[tracing::instrument(skip(self))]
    async fn update_criteria(&self, criteria: FilterCriteria) -> Result<View, Error> {
        self.state.write().await.criteria = criteria;

        self.recompute().await
    }

    #[tracing::instrument(skip(self))]
    async fn update_transport_mode(
        &self,
        transport_mode: TransportMode,
    ) -> Result<AppState, Error> {
        let mut state = self.state.write().await;
        state.transport_mode = transport_mode;

        Ok(state.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn locate(&self, source: LocationSource) -> Result<View, Error> {
        let location = match source {
            LocationSource::Coordinates(coordinates) => CurrentLocation::new(
                Coordinates::try_new(coordinates.longitude, coordinates.latitude)?,
                LocationOrigin::Manual,
            ),
            LocationSource::Geolocation => {
                let geolocator = self
                    .geolocator
                    .as_deref()
                    .ok_or_else(geolocation_unavailable_error)?;

                let coordinates = locate_with_timeout(geolocator, self.geolocation_timeout)
                    .await
                    .map_err(|err| {
                        tracing::warn!(error = %err, "could not determine current location");
                        err
                    })?;

                CurrentLocation::new(coordinates, LocationOrigin::Geolocation)
            }
        };

        tracing::info!(
            longitude = location.coordinates.longitude,
            latitude = location.coordinates.latitude,
            "current location updated"
        );

        self.state.write().await.location = Some(location);

        self.recompute().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::engine::testing::StraightLine;
    use crate::error::{geolocation_timeout_error, no_match_error};
    use crate::external::Geolocator;
    use crate::store::{sample_restaurants, sample_shelters, PointStore};

    struct Slow;

    #[async_trait]
    impl Geolocator for Slow {
        async fn locate(&self) -> Result<Coordinates, Error> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Coordinates::new(139.63, 35.45))
        }
    }

    struct AtStation;

    #[async_trait]
    impl Geolocator for AtStation {
        async fn locate(&self) -> Result<Coordinates, Error> {
            Ok(Coordinates::new(139.6300, 35.4500))
        }
    }

    fn engine(geolocator: Option<Box<dyn Geolocator + Send + Sync>>) -> Engine {
        Engine::from_parts(
            PointStore::from_points(Mode::Restaurant, sample_restaurants()),
            PointStore::from_points(Mode::Shelter, sample_shelters()),
            Box::new(StraightLine),
            geolocator,
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn starts_in_restaurant_mode() {
        let engine = engine(None);

        let view = engine.find_view().await.unwrap();
        assert_eq!(view.mode, Mode::Restaurant);
        assert_eq!(view.points.len(), 2);
        assert!(view.nearest.is_none());
    }

    #[tokio::test]
    async fn switching_mode_recomputes_view() {
        let engine = engine(None);

        let view = engine.switch_mode(Mode::Shelter).await.unwrap();
        assert_eq!(view.mode, Mode::Shelter);
        assert!(view.points.iter().all(|point| point.shelter().is_some()));
    }

    #[tokio::test]
    async fn criteria_update_surfaces_no_match_and_keeps_state() {
        let engine = engine(None);

        let criteria = FilterCriteria {
            min_rating: Some(5.0),
            ..Default::default()
        };
        let err = engine.update_criteria(criteria.clone()).await.unwrap_err();
        assert_eq!(err, no_match_error());

        assert_eq!(engine.find_session().await.unwrap().criteria, criteria);

        let view = engine.update_criteria(FilterCriteria::default()).await.unwrap();
        assert_eq!(view.points.len(), 2);
    }

    #[tokio::test]
    async fn manual_location_sets_nearest() {
        let engine = engine(None);
        engine.switch_mode(Mode::Shelter).await.unwrap();

        let view = engine
            .locate(LocationSource::Coordinates(Coordinates::new(139.6300, 35.4500)))
            .await
            .unwrap();
        assert_eq!(view.nearest.unwrap().point.id, "sample-shelter-1");

        let session = engine.find_session().await.unwrap();
        assert_eq!(session.location.unwrap().origin, LocationOrigin::Manual);
    }

    #[tokio::test]
    async fn geolocation_uses_provider() {
        let engine = engine(Some(Box::new(AtStation)));

        let view = engine.locate(LocationSource::Geolocation).await.unwrap();
        assert_eq!(view.nearest.unwrap().point.id, "sample-restaurant-1");
    }

    #[tokio::test]
    async fn geolocation_without_provider_is_unavailable() {
        let err = engine(None)
            .locate(LocationSource::Geolocation)
            .await
            .unwrap_err();
        assert_eq!(err, geolocation_unavailable_error());
    }

    #[tokio::test]
    async fn slow_geolocation_times_out_and_leaves_location_unset() {
        let engine = engine(Some(Box::new(Slow)));

        let err = engine.locate(LocationSource::Geolocation).await.unwrap_err();
        assert_eq!(err, geolocation_timeout_error());
        assert!(engine.find_session().await.unwrap().location.is_none());
    }

    #[tokio::test]
    async fn transport_mode_is_stored() {
        let engine = engine(None);

        let state = engine
            .update_transport_mode(TransportMode::DrivingCar)
            .await
            .unwrap();
        assert_eq!(state.transport_mode, TransportMode::DrivingCar);
    }
}
