//! Headless hosts for the map overlay demos: a static cube and a car that
//! loops along a smoothed track once its model has loaded.

pub mod car;
pub mod cli;
pub mod config;
pub mod cube;
pub mod error;
pub mod host;
pub mod trace;

pub use error::DemoError;
