use serde::{Deserialize, Serialize};

use crate::{
    entities::{CurrentLocation, FilterCriteria, Mode, PointOfInterest, Route, TransportMode},
    error::{no_match_error, Error},
    search::{self, Nearest},
};

/// Everything a session has selected. Handlers read and write it through the
/// engine, never through globals.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppState {
    pub mode: Mode,
    pub criteria: FilterCriteria,
    pub transport_mode: TransportMode,
    pub location: Option<CurrentLocation>,
    pub route: Option<Route>,
}

/// What the map should show for a given state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct View {
    pub mode: Mode,
    pub points: Vec<PointOfInterest>,
    pub nearest: Option<Nearest>,
    pub route: Option<Route>,
}

/// Recomputes the displayed points and the nearest one from scratch.
pub fn compute_view(state: &AppState, points: &[PointOfInterest]) -> Result<View, Error> {
    let visible = search::filter(points, &state.criteria);

    if visible.is_empty() {
        return Err(no_match_error());
    }

    let nearest = state.location.as_ref().and_then(|location| {
        search::nearest(&location.coordinates, &visible).map(|(point, distance_km)| Nearest {
            point: point.clone(),
            distance_km,
        })
    });

    Ok(View {
        mode: state.mode,
        points: visible,
        nearest,
        route: state.route.clone(),
    })
}
