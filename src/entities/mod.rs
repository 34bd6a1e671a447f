mod criteria;
mod location;
mod mode;
mod place;
mod route;

pub use criteria::FilterCriteria;
pub use location::{Coordinates, CurrentLocation, LocationOrigin, LocationSource, EARTH_RADIUS_KM};
pub use mode::Mode;
pub use place::{
    Attributes, DisasterType, PointOfInterest, RestaurantAttributes, ShelterAttributes,
    DEFAULT_SHELTER_TYPE,
};
pub use route::{Route, TransportMode};
