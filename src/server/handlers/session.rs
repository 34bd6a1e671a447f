use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::engine::{AppState, View};
use crate::entities::{FilterCriteria, LocationSource, Mode, TransportMode};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct SwitchModeParams {
    mode: Mode,
}

#[derive(Serialize, Deserialize)]
pub struct TransportModeParams {
    transport_mode: TransportMode,
}

#[derive(Serialize, Deserialize)]
pub struct LocateParams {
    source: LocationSource,
}

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<AppState>, Error> {
    let state = api.find_session().await?;

    Ok(state.into())
}

pub async fn view(Extension(api): Extension<DynAPI>) -> Result<Json<View>, Error> {
    let view = api.find_view().await?;

    Ok(view.into())
}

pub async fn switch_mode(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<SwitchModeParams>,
) -> Result<Json<View>, Error> {
    let view = api.switch_mode(params.mode).await?;

    Ok(view.into())
}

pub async fn update_criteria(
    Extension(api): Extension<DynAPI>,
    Json(criteria): Json<FilterCriteria>,
) -> Result<Json<View>, Error> {
    let view = api.update_criteria(criteria).await?;

    Ok(view.into())
}

pub async fn update_transport_mode(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<TransportModeParams>,
) -> Result<Json<AppState>, Error> {
    let state = api.update_transport_mode(params.transport_mode).await?;

    Ok(state.into())
}

pub async fn locate(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<LocateParams>,
) -> Result<Json<View>, Error> {
    let view = api.locate(params.source).await?;

    Ok(view.into())
}
