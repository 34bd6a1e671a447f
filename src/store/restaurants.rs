use serde::Deserialize;
use serde_json::Value;

use super::lenient_number;
use crate::entities::{Attributes, Coordinates, PointOfInterest, RestaurantAttributes};
use crate::error::{coordinate_error, data_load_error, Error};

#[derive(Deserialize)]
struct RawRestaurant {
    place_id: Option<String>,
    name: Option<String>,
    formatted_address: Option<String>,
    formatted_phone_number: Option<String>,
    website: Option<String>,
    #[serde(default)]
    rating: Value,
    #[serde(default)]
    price_level: Value,
    #[serde(default)]
    user_ratings_total: Value,
    geometry: Option<RawGeometry>,
    #[serde(default)]
    reviews: Vec<RawReview>,
}

#[derive(Deserialize)]
struct RawGeometry {
    location: Option<RawLocation>,
}

#[derive(Deserialize)]
struct RawLocation {
    #[serde(default)]
    lat: Value,
    #[serde(default)]
    lng: Value,
}

#[derive(Deserialize)]
struct RawReview {
    text: Option<String>,
}

impl RawRestaurant {
    fn into_point(self, index: usize) -> Result<PointOfInterest, Error> {
        let location = self
            .geometry
            .and_then(|geometry| geometry.location)
            .ok_or_else(coordinate_error)?;

        let longitude = lenient_number(&location.lng).ok_or_else(coordinate_error)?;
        let latitude = lenient_number(&location.lat).ok_or_else(coordinate_error)?;
        let coordinates = Coordinates::try_new(longitude, latitude)?;

        let price_level = lenient_number(&self.price_level)
            .filter(|level| *level >= 0.0 && *level <= u8::MAX as f64)
            .map(|level| level.round() as u8);

        let user_ratings_total = lenient_number(&self.user_ratings_total)
            .filter(|total| *total >= 0.0)
            .map(|total| total as u32);

        Ok(PointOfInterest {
            id: self
                .place_id
                .unwrap_or_else(|| format!("restaurant-{}", index)),
            name: self.name.unwrap_or_else(|| "飲食店".into()),
            address: self.formatted_address,
            coordinates,
            attributes: Attributes::Restaurant(RestaurantAttributes {
                rating: lenient_number(&self.rating),
                price_level,
                user_ratings_total,
                phone: self.formatted_phone_number,
                website: self.website.filter(|website| !website.trim().is_empty()),
                reviews: self.reviews.into_iter().filter_map(|r| r.text).collect(),
            }),
        })
    }
}

/// Parses a Places-style restaurant dump. Accepts a bare array or an object
/// with a `results` array. Records without usable coordinates are skipped.
pub fn parse_restaurants(text: &str) -> Result<Vec<PointOfInterest>, Error> {
    let records = match serde_json::from_str::<Value>(text)? {
        Value::Array(records) => records,
        Value::Object(mut object) => match object.remove("results") {
            Some(Value::Array(records)) => records,
            _ => return Err(data_load_error("expected an array of restaurants")),
        },
        _ => return Err(data_load_error("expected an array of restaurants")),
    };

    let mut points = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let point = serde_json::from_value::<RawRestaurant>(record)
            .map_err(data_load_error)
            .and_then(|raw| raw.into_point(index));

        match point {
            Ok(point) => points.push(point),
            Err(err) => tracing::warn!(index, error = %err, "skipping restaurant record"),
        }
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDS: &str = r#"[
        {
            "place_id": "abc",
            "name": "Harbour Grill",
            "rating": 4.5,
            "price_level": 2,
            "formatted_address": "1-1-1 Minatomirai",
            "user_ratings_total": 120,
            "geometry": { "location": { "lat": 35.451, "lng": 139.631 } },
            "reviews": [{ "text": "Great view" }, { "author": "x" }]
        },
        {
            "name": "No Rating Cafe",
            "rating": "N/A",
            "price_level": "N/A",
            "geometry": { "location": { "lat": "35.453", "lng": "139.633" } }
        },
        { "name": "Nowhere", "rating": 3.0 },
        { "name": "Off Globe", "geometry": { "location": { "lat": 135.0, "lng": 139.0 } } }
    ]"#;

    #[test]
    fn parses_records_and_skips_bad_coordinates() {
        let points = parse_restaurants(RECORDS).unwrap();
        assert_eq!(points.len(), 2);

        let grill = &points[0];
        assert_eq!(grill.id, "abc");
        assert_eq!(grill.coordinates, Coordinates::new(139.631, 35.451));

        let attributes = grill.restaurant().unwrap();
        assert_eq!(attributes.rating, Some(4.5));
        assert_eq!(attributes.price_level, Some(2));
        assert_eq!(attributes.user_ratings_total, Some(120));
        assert_eq!(attributes.reviews, vec!["Great view".to_string()]);
    }

    #[test]
    fn placeholder_values_become_missing() {
        let points = parse_restaurants(RECORDS).unwrap();
        let cafe = &points[1];

        assert_eq!(cafe.id, "restaurant-1");
        let attributes = cafe.restaurant().unwrap();
        assert_eq!(attributes.rating, None);
        assert_eq!(attributes.price_level, None);
        assert_eq!(attributes.effective_rating(), 1.0);
    }

    #[test]
    fn accepts_places_results_envelope() {
        let points = parse_restaurants(
            r#"{"results":[{"name":"A","geometry":{"location":{"lat":35.0,"lng":139.0}}}]}"#,
        )
        .unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn rejects_malformed_documents() {
        assert_eq!(parse_restaurants("{").unwrap_err().code, 2);
        assert_eq!(parse_restaurants("42").unwrap_err().code, 2);
    }
}
