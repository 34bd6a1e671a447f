use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Route, TransportMode};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    start: Coordinates,
    end: Coordinates,
    transport_mode: Option<TransportMode>,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Route>, Error> {
    let route = api
        .create_route(params.start, params.end, params.transport_mode)
        .await?;

    Ok(route.into())
}

pub async fn to_nearest(Extension(api): Extension<DynAPI>) -> Result<Json<Route>, Error> {
    let route = api.route_to_nearest().await?;

    Ok(route.into())
}

pub async fn to_point(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Route>, Error> {
    let route = api.route_to_point(id).await?;

    Ok(route.into())
}
