mod restaurants;
mod sample;
mod shelters;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::entities::{Mode, PointOfInterest};
use crate::error::{data_load_error, Error};

pub use restaurants::parse_restaurants;
pub use sample::{sample_restaurants, sample_shelters};
pub use shelters::{parse_shelters_csv, parse_shelters_geojson};

pub type Snapshot = Arc<Vec<PointOfInterest>>;

/// In-memory points for one mode. Readers get a shared snapshot, reloads swap
/// in a new one and never touch the old.
#[derive(Debug)]
pub struct PointStore {
    mode: Mode,
    sources: Vec<PathBuf>,
    points: RwLock<Snapshot>,
}

impl PointStore {
    #[tracing::instrument(name = "PointStore::load")]
    pub async fn load(mode: Mode, sources: Vec<PathBuf>) -> Self {
        let points = load_points(mode, &sources).await;

        Self {
            mode,
            sources,
            points: RwLock::new(Arc::new(points)),
        }
    }

    pub fn from_points(mode: Mode, points: Vec<PointOfInterest>) -> Self {
        Self {
            mode,
            sources: vec![],
            points: RwLock::new(Arc::new(points)),
        }
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.points.read().await.clone()
    }

    #[tracing::instrument(skip(self), fields(mode = self.mode.name()))]
    pub async fn reload(&self) -> usize {
        let points = load_points(self.mode, &self.sources).await;
        let count = points.len();

        *self.points.write().await = Arc::new(points);

        tracing::info!(count, "point store reloaded");

        count
    }
}

/// Tries each source in order and falls back to the built-in sample set.
pub async fn load_points(mode: Mode, sources: &[PathBuf]) -> Vec<PointOfInterest> {
    for source in sources {
        match load_file(mode, source).await {
            Ok(points) => {
                tracing::info!(
                    mode = mode.name(),
                    source = %source.display(),
                    count = points.len(),
                    "loaded points"
                );
                return points;
            }
            Err(err) => {
                tracing::warn!(
                    mode = mode.name(),
                    source = %source.display(),
                    error = %err,
                    "failed to load points, trying next source"
                );
            }
        }
    }

    tracing::warn!(mode = mode.name(), "no usable data source, using sample points");

    match mode {
        Mode::Restaurant => sample_restaurants(),
        Mode::Shelter => sample_shelters(),
    }
}

pub async fn load_file(mode: Mode, path: &Path) -> Result<Vec<PointOfInterest>, Error> {
    let text = tokio::fs::read_to_string(path).await?;
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let points = match (mode, is_csv) {
        (Mode::Restaurant, _) => parse_restaurants(&text)?,
        (Mode::Shelter, true) => parse_shelters_csv(&text)?,
        (Mode::Shelter, false) => parse_shelters_geojson(&text)?,
    };

    if points.is_empty() {
        return Err(data_load_error(format!(
            "{} contains no usable records",
            path.display()
        )));
    }

    Ok(points)
}

/// Reads numbers that may arrive as JSON numbers, numeric strings or "N/A".
fn lenient_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number.filter(|n| n.is_finite())
}

fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
