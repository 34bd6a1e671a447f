use serde_json::{Map, Value};

use super::{lenient_number, lenient_string};
use crate::entities::{Attributes, Coordinates, DisasterType, PointOfInterest, ShelterAttributes};
use crate::error::{coordinate_error, data_load_error, Error};

const NAME_KEYS: [&str; 3] = ["P20_002", "施設・場所名", "name"];
const ADDRESS_KEYS: [&str; 3] = ["P20_003", "住所", "address"];
const CITY_CODE_KEYS: [&str; 2] = ["市町村コード", "P20_001"];
const LEVEL_KEY: &str = "レベル";
const TYPE_KEY: &str = "種類";
const REMARKS_KEY: &str = "備考";
const LATITUDE_KEY: &str = "緯度";
const LONGITUDE_KEY: &str = "経度";

/// Cell values the open-data tables use for "not certified".
const UNFLAGGED: [&str; 10] = ["0", "false", "no", "×", "✕", "-", "－", "ー", "無", "なし"];

fn first_string(properties: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| properties.get(*key))
        .find_map(lenient_string)
}

fn is_flagged(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(s) => {
            let s = s.trim();
            !s.is_empty()
                && !UNFLAGGED
                    .iter()
                    .any(|marker| s.eq_ignore_ascii_case(marker))
        }
        _ => false,
    }
}

fn shelter_from_properties(
    index: usize,
    coordinates: Coordinates,
    properties: &Map<String, Value>,
) -> PointOfInterest {
    let disaster_types = DisasterType::ALL
        .iter()
        .filter(|disaster| {
            properties
                .get(disaster.column())
                .map(is_flagged)
                .unwrap_or(false)
        })
        .copied()
        .collect();

    let level = properties
        .get(LEVEL_KEY)
        .and_then(lenient_number)
        .filter(|level| *level >= 0.0)
        .map(|level| level as u32);

    PointOfInterest {
        id: format!("shelter-{}", index),
        name: first_string(properties, &NAME_KEYS).unwrap_or_else(|| "避難所".into()),
        address: first_string(properties, &ADDRESS_KEYS),
        coordinates,
        attributes: Attributes::Shelter(ShelterAttributes {
            level,
            shelter_type: first_string(properties, &[TYPE_KEY]),
            disaster_types,
            city_code: first_string(properties, &CITY_CODE_KEYS),
            remarks: first_string(properties, &[REMARKS_KEY]),
        }),
    }
}

fn feature_coordinates(feature: &Value) -> Result<Coordinates, Error> {
    let position = feature
        .pointer("/geometry/coordinates")
        .and_then(Value::as_array)
        .ok_or_else(coordinate_error)?;

    match position.as_slice() {
        [longitude, latitude, ..] => Coordinates::try_new(
            lenient_number(longitude).ok_or_else(coordinate_error)?,
            lenient_number(latitude).ok_or_else(coordinate_error)?,
        ),
        _ => Err(coordinate_error()),
    }
}

/// Parses a shelter FeatureCollection, or a bare array of point features.
pub fn parse_shelters_geojson(text: &str) -> Result<Vec<PointOfInterest>, Error> {
    let features = match serde_json::from_str::<Value>(text)? {
        Value::Array(features) => features,
        Value::Object(mut object) => match object.remove("features") {
            Some(Value::Array(features)) => features,
            _ => return Err(data_load_error("expected a FeatureCollection")),
        },
        _ => return Err(data_load_error("expected a FeatureCollection")),
    };

    let empty = Map::new();
    let mut points = Vec::with_capacity(features.len());

    for (index, feature) in features.iter().enumerate() {
        match feature_coordinates(feature) {
            Ok(coordinates) => {
                let properties = feature
                    .get("properties")
                    .and_then(Value::as_object)
                    .unwrap_or(&empty);

                points.push(shelter_from_properties(index, coordinates, properties));
            }
            Err(err) => tracing::warn!(index, error = %err, "skipping shelter feature"),
        }
    }

    Ok(points)
}

/// Parses the open-data shelter table: one row per site, with a `1` in each
/// hazard column the site is certified for.
pub fn parse_shelters_csv(text: &str) -> Result<Vec<PointOfInterest>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut points = vec![];

    for (index, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping unreadable shelter row");
                continue;
            }
        };

        let properties: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(header, field)| (header.clone(), Value::String(field.to_string())))
            .collect();

        let coordinates = properties
            .get(LONGITUDE_KEY)
            .and_then(lenient_number)
            .zip(properties.get(LATITUDE_KEY).and_then(lenient_number))
            .ok_or_else(coordinate_error)
            .and_then(|(longitude, latitude)| Coordinates::try_new(longitude, latitude));

        match coordinates {
            Ok(coordinates) => {
                points.push(shelter_from_properties(index, coordinates, &properties))
            }
            Err(err) => tracing::warn!(index, error = %err, "skipping shelter row"),
        }
    }

    Ok(points)
}
