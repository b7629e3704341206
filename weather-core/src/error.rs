use std::path::PathBuf;

use thiserror::Error;

use crate::format::OutputFormat;

/// Why a `lat,lon` argument was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("expected exactly 2 comma-separated coordinates, got {0}")]
    WrongArity(usize),

    #[error("`{0}` is not a number")]
    NotANumber(String),

    #[error(
        "latitude must be in [-90, 90] and longitude in [-180, 180], got ({lat}, {lon})"
    )]
    OutOfRange { lat: f64, lon: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("temperature was not supplied.\nHint: pass `--temp <celsius>`.")]
    TemperatureMissing,

    #[error("temperature {0} is not above absolute zero (-273.15 °C)")]
    TemperatureOutOfRange(f64),

    #[error("coordinates were not supplied.\nHint: pass `--loc_crd <lat,lon>`.")]
    CoordinatesMissing,

    #[error("location was not supplied.\nHint: pass `--location <name>`.")]
    LocationMissing,
}

/// Failure to produce one report file. Never fatal for the whole run.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to serialize observation to {format}")]
    Serialization {
        format: OutputFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to write {}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
