//! HTTP adapter for the factory dispatch desk.
//!
//! Exposes the application handlers under `/api/factory`; see
//! [`routes::factory_routes`] for the route table.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{status_for, ApiError, FactoryAppState};
pub use routes::factory_routes;
