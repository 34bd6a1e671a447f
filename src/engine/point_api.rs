use super::Engine;

use async_trait::async_trait;

use crate::{
    api::PointAPI,
    entities::{Coordinates, FilterCriteria, Mode, PointOfInterest},
    error::{no_match_error, not_found_error, unexpected_error, Error},
    search::{self, Nearest},
};

#[async_trait]
impl PointAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_points(&self, mode: Mode) -> Result<Vec<PointOfInterest>, Error> {
        let points = self.store(mode).snapshot().await;

        Ok(points.as_ref().clone())
    }

    #[tracing::instrument(skip(self))]
    async fn find_point(&self, mode: Mode, id: String) -> Result<PointOfInterest, Error> {
        let points = self.store(mode).snapshot().await;

        points
            .iter()
            .find(|point| point.id == id)
            .cloned()
            .ok_or_else(not_found_error)
    }

    #[tracing::instrument(skip(self))]
    async fn filter_points(
        &self,
        mode: Mode,
        criteria: FilterCriteria,
    ) -> Result<Vec<PointOfInterest>, Error> {
        let points = self.store(mode).snapshot().await;
        let filtered = search::filter(&points, &criteria);

        if filtered.is_empty() {
            tracing::info!("filters exclude every point");
            return Err(no_match_error());
        }

        Ok(filtered)
    }

    #[tracing::instrument(skip(self))]
    async fn find_nearest(
        &self,
        mode: Mode,
        from: Coordinates,
        criteria: FilterCriteria,
    ) -> Result<Nearest, Error> {
        let from = Coordinates::try_new(from.longitude, from.latitude)?;
        let candidates = self.filter_points(mode, criteria).await?;

        // candidates is non-empty here, filter_points rejects the empty case
        let (point, distance_km) =
            search::nearest(&from, &candidates).ok_or_else(unexpected_error)?;

        tracing::info!(id = %point.id, distance_km, "found nearest point");

        Ok(Nearest {
            point: point.clone(),
            distance_km,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn reload_points(&self, mode: Mode) -> Result<usize, Error> {
        Ok(self.store(mode).reload().await)
    }
}
