//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The observation record and its validation
//! - Parsing of `lat,lon` coordinate arguments
//! - Encoders for the JSON, XML, YAML and TOML report files
//! - A best-effort writer for those files
//! - A console table for any record that describes its fields
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod coordinates;
pub mod error;
pub mod format;
pub mod model;
pub mod output;
pub mod table;

pub use config::Config;
pub use coordinates::Coordinates;
pub use error::{CoordinateError, OutputError, ValidationError};
pub use format::OutputFormat;
pub use model::{ObservationInput, WeatherKind, WeatherObservation};
pub use output::{WriteOutcome, write_all};
