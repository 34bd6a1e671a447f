use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Attributes, DisasterType, PointOfInterest, RestaurantAttributes, ShelterAttributes};

/// User-selected predicates. An empty set or absent value means no restriction
/// along that dimension.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub min_rating: Option<f64>,
    pub allowed_price_levels: BTreeSet<u8>,
    pub allowed_shelter_types: BTreeSet<String>,
    pub min_shelter_level: u32,
    pub allowed_disaster_types: BTreeSet<DisasterType>,
    pub query: Option<String>,
}

impl FilterCriteria {
    pub fn matches(&self, poi: &PointOfInterest) -> bool {
        if let Some(query) = &self.query {
            if !poi.mentions(query) {
                return false;
            }
        }

        match &poi.attributes {
            Attributes::Restaurant(attributes) => self.matches_restaurant(attributes),
            Attributes::Shelter(attributes) => self.matches_shelter(attributes),
        }
    }

    fn matches_restaurant(&self, attributes: &RestaurantAttributes) -> bool {
        if let Some(min_rating) = self.min_rating {
            if attributes.effective_rating() < min_rating {
                return false;
            }
        }

        self.allowed_price_levels.is_empty()
            || self
                .allowed_price_levels
                .contains(&attributes.effective_price_level())
    }

    fn matches_shelter(&self, attributes: &ShelterAttributes) -> bool {
        if attributes.effective_level() < self.min_shelter_level {
            return false;
        }

        if !self.allowed_shelter_types.is_empty()
            && !self
                .allowed_shelter_types
                .contains(attributes.effective_type())
        {
            return false;
        }

        self.allowed_disaster_types.is_empty()
            || attributes
                .disaster_types
                .iter()
                .any(|disaster| self.allowed_disaster_types.contains(disaster))
    }
}
