//! Core types, errors, and configuration shared across the crate

pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use types::{Color, EntityId, GridPos, DIRECTIONS};
