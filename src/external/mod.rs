pub mod geolocation;
pub mod openroute;

pub use geolocation::{locate_with_timeout, Geolocator, HttpGeolocator};
pub use openroute::{Directions, OpenRouteService};
