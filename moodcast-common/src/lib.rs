//! # Moodcast Common Library
//!
//! Shared code for the moodcast service including:
//! - Domain models (coordinates, weather summaries, song descriptors)
//! - Time-of-day derivation from upstream timestamps
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod error;
pub mod model;
pub mod time;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{Coordinate, RecommendationResponse, SongDescriptor, WeatherSummary};
pub use time::TimeOfDay;
