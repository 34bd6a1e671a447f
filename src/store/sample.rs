use crate::entities::{
    Attributes, Coordinates, DisasterType, PointOfInterest, RestaurantAttributes,
    ShelterAttributes,
};

pub fn sample_restaurants() -> Vec<PointOfInterest> {
    vec![
        PointOfInterest {
            id: "sample-restaurant-1".into(),
            name: "テスト飲食店1".into(),
            address: Some("横浜市西区みなとみらい1-1-1".into()),
            coordinates: Coordinates::new(139.631, 35.451),
            attributes: Attributes::Restaurant(RestaurantAttributes {
                rating: Some(4.5),
                price_level: Some(2),
                user_ratings_total: Some(120),
                phone: Some("045-123-4567".into()),
                website: Some("https://example.com".into()),
                reviews: vec![],
            }),
        },
        PointOfInterest {
            id: "sample-restaurant-2".into(),
            name: "テスト飲食店2".into(),
            address: Some("横浜市西区みなとみらい2-2-2".into()),
            coordinates: Coordinates::new(139.633, 35.453),
            attributes: Attributes::Restaurant(RestaurantAttributes {
                rating: Some(3.8),
                price_level: Some(3),
                user_ratings_total: Some(85),
                phone: Some("045-987-6543".into()),
                website: Some("https://example2.com".into()),
                reviews: vec![],
            }),
        },
    ]
}

pub fn sample_shelters() -> Vec<PointOfInterest> {
    vec![
        PointOfInterest {
            id: "sample-shelter-1".into(),
            name: "テスト避難所1".into(),
            address: Some("横浜市西区みなとみらい3-3-3".into()),
            coordinates: Coordinates::new(139.629, 35.449),
            attributes: Attributes::Shelter(ShelterAttributes {
                level: Some(3),
                shelter_type: Some("指定避難所".into()),
                disaster_types: [DisasterType::Earthquake, DisasterType::Flood]
                    .into_iter()
                    .collect(),
                city_code: None,
                remarks: None,
            }),
        },
        PointOfInterest {
            id: "sample-shelter-2".into(),
            name: "テスト避難所2".into(),
            address: Some("横浜市西区みなとみらい4-4-4".into()),
            coordinates: Coordinates::new(139.636, 35.455),
            attributes: Attributes::Shelter(ShelterAttributes {
                level: Some(4),
                shelter_type: Some("広域避難場所".into()),
                disaster_types: [DisasterType::Earthquake, DisasterType::LargeFire]
                    .into_iter()
                    .collect(),
                city_code: None,
                remarks: None,
            }),
        },
    ]
}
