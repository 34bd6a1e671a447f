use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Shelter type assumed when a record does not say.
pub const DEFAULT_SHELTER_TYPE: &str = "指定避難所";

/// A restaurant or shelter shown on the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub coordinates: Coordinates,
    pub attributes: Attributes,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Attributes {
    Restaurant(RestaurantAttributes),
    Shelter(ShelterAttributes),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantAttributes {
    pub rating: Option<f64>,
    pub price_level: Option<u8>,
    pub user_ratings_total: Option<u32>,
    pub phone: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub reviews: Vec<String>,
}

/// A zero rating, price level or shelter level is treated like a missing one
/// and takes the default of 1.
impl RestaurantAttributes {
    pub fn effective_rating(&self) -> f64 {
        self.rating.filter(|rating| *rating != 0.0).unwrap_or(1.0)
    }

    pub fn effective_price_level(&self) -> u8 {
        self.price_level.filter(|level| *level != 0).unwrap_or(1)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShelterAttributes {
    pub level: Option<u32>,
    pub shelter_type: Option<String>,
    #[serde(default)]
    pub disaster_types: BTreeSet<DisasterType>,
    pub city_code: Option<String>,
    pub remarks: Option<String>,
}

impl ShelterAttributes {
    pub fn effective_level(&self) -> u32 {
        self.level.filter(|level| *level != 0).unwrap_or(1)
    }

    pub fn effective_type(&self) -> &str {
        self.shelter_type.as_deref().unwrap_or(DEFAULT_SHELTER_TYPE)
    }
}

/// Hazards a designated evacuation site is certified for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisasterType {
    Flood,
    Landslide,
    StormSurge,
    Earthquake,
    Tsunami,
    LargeFire,
    InlandFlood,
    Volcano,
}

impl DisasterType {
    pub const ALL: [DisasterType; 8] = [
        DisasterType::Flood,
        DisasterType::Landslide,
        DisasterType::StormSurge,
        DisasterType::Earthquake,
        DisasterType::Tsunami,
        DisasterType::LargeFire,
        DisasterType::InlandFlood,
        DisasterType::Volcano,
    ];

    /// Column header used by the open-data shelter tables.
    pub fn column(&self) -> &'static str {
        match self {
            DisasterType::Flood => "洪水",
            DisasterType::Landslide => "崖崩れ、土石流及び地滑り",
            DisasterType::StormSurge => "高潮",
            DisasterType::Earthquake => "地震",
            DisasterType::Tsunami => "津波",
            DisasterType::LargeFire => "大規模な火事",
            DisasterType::InlandFlood => "内水氾濫",
            DisasterType::Volcano => "火山現象",
        }
    }
}

impl PointOfInterest {
    pub fn restaurant(&self) -> Option<&RestaurantAttributes> {
        match &self.attributes {
            Attributes::Restaurant(attributes) => Some(attributes),
            _ => None,
        }
    }

    pub fn shelter(&self) -> Option<&ShelterAttributes> {
        match &self.attributes {
            Attributes::Shelter(attributes) => Some(attributes),
            _ => None,
        }
    }

    /// Case-insensitive match against the name and any review text.
    pub fn mentions(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();

        if query.is_empty() {
            return true;
        }

        if self.name.to_lowercase().contains(&query) {
            return true;
        }

        match &self.attributes {
            Attributes::Restaurant(attributes) => attributes
                .reviews
                .iter()
                .any(|review| review.to_lowercase().contains(&query)),
            Attributes::Shelter(_) => false,
        }
    }
}
