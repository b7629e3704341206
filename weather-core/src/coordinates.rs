use std::{fmt, ops::RangeInclusive, str::FromStr};

use serde::Serialize;

use crate::error::CoordinateError;

const LATITUDE: RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE: RangeInclusive<f64> = -180.0..=180.0;

/// A validated `(latitude, longitude)` pair in degrees.
///
/// Serializes as a two-element sequence `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    /// Build a pair, rejecting values outside [-90, 90] x [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if LATITUDE.contains(&lat) && LONGITUDE.contains(&lon) {
            Ok(Self { lat, lon })
        } else {
            Err(CoordinateError::OutOfRange { lat, lon })
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(value: Coordinates) -> Self {
        [value.lat, value.lon]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Parses `"<lat>,<lon>"`. Surrounding whitespace around each number is ignored.
impl FromStr for Coordinates {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        let [lat, lon] = parts.as_slice() else {
            return Err(CoordinateError::WrongArity(parts.len()));
        };

        Self::new(parse_degrees(lat)?, parse_degrees(lon)?)
    }
}

fn parse_degrees(raw: &str) -> Result<f64, CoordinateError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CoordinateError::NotANumber(raw.to_string()))
}
