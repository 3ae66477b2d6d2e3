//! HTTP surface: router and operator endpoints

pub mod routes;

pub use routes::build_router;
