use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, FilterCriteria, PointOfInterest};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Nearest {
    pub point: PointOfInterest,
    pub distance_km: f64,
}

impl Nearest {
    pub fn distance_meters(&self) -> f64 {
        self.distance_km * 1000.0
    }
}

/// Returns the points satisfying every active criterion. The source slice is
/// left untouched.
pub fn filter(points: &[PointOfInterest], criteria: &FilterCriteria) -> Vec<PointOfInterest> {
    points
        .iter()
        .filter(|point| criteria.matches(point))
        .cloned()
        .collect()
}

/// Linear scan for the closest candidate. Ties keep the first candidate seen,
/// and candidates without a finite distance are never picked.
pub fn nearest<'a>(
    from: &Coordinates,
    candidates: &'a [PointOfInterest],
) -> Option<(&'a PointOfInterest, f64)> {
    let mut best: Option<(&PointOfInterest, f64)> = None;

    for candidate in candidates {
        let distance = from.distance_km(&candidate.coordinates);

        if !distance.is_finite() {
            continue;
        }

        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best
}
