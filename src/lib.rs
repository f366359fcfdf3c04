pub mod attendance;
pub mod config;
pub mod db;
pub mod desk;
pub mod employees;
pub mod entities;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod leave;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod reviews;
pub mod store;
pub mod validation;

pub use error::{AppError, Result};
