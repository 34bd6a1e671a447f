pub mod points;
pub mod routes;
pub mod session;
