//! Factory Dispatch - service side of the factory dispatch desk
//!
//! Derives dispatch numbers, reconciles entered or uploaded serial numbers
//! against live stock, and fronts the factory backend's dealers, models,
//! stock, registration and parts endpoints for the admin dashboard.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
