use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, FilterCriteria, Mode, PointOfInterest};
use crate::error::Error;
use crate::search::Nearest;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct NearestParams {
    from: Coordinates,
    #[serde(default)]
    criteria: FilterCriteria,
}

#[derive(Serialize, Deserialize)]
pub struct ReloadResponse {
    count: usize,
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Path(mode): Path<Mode>,
) -> Result<Json<Vec<PointOfInterest>>, Error> {
    let points = api.list_points(mode).await?;

    Ok(points.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path((mode, id)): Path<(Mode, String)>,
) -> Result<Json<PointOfInterest>, Error> {
    let point = api.find_point(mode, id).await?;

    Ok(point.into())
}

pub async fn filter(
    Extension(api): Extension<DynAPI>,
    Path(mode): Path<Mode>,
    Json(criteria): Json<FilterCriteria>,
) -> Result<Json<Vec<PointOfInterest>>, Error> {
    let points = api.filter_points(mode, criteria).await?;

    Ok(points.into())
}

pub async fn nearest(
    Extension(api): Extension<DynAPI>,
    Path(mode): Path<Mode>,
    Json(params): Json<NearestParams>,
) -> Result<Json<Nearest>, Error> {
    let nearest = api
        .find_nearest(mode, params.from, params.criteria)
        .await?;

    Ok(nearest.into())
}

pub async fn reload(
    Extension(api): Extension<DynAPI>,
    Path(mode): Path<Mode>,
) -> Result<Json<ReloadResponse>, Error> {
    let count = api.reload_points(mode).await?;

    Ok(ReloadResponse { count }.into())
}
