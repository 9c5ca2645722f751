//! Orca Fleet Library
//!
//! Fuel telemetry monitor for a truck fleet: a simulated data source feeds a
//! shared fleet store, and a session gate decides when the fleet is built,
//! simulated and shown.

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod services;
pub mod states;
pub mod utils;
pub mod views;
