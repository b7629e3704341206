use std::fmt;

use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;

use crate::{
    coordinates::Coordinates,
    error::{CoordinateError, ValidationError},
    table::{Field, FieldValue, Shape, Tabular, rows},
};

/// Sentinel left in `temperature` when `--temp` was never passed.
pub const TEMPERATURE_UNSET: f64 = -274.0;

/// Absolute zero in degrees Celsius. Observations must be strictly warmer.
pub const ABSOLUTE_ZERO_C: f64 = -273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    Snowy,
    Hotly,
}

impl WeatherKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherKind::Snowy => "snowy",
            WeatherKind::Hotly => "hotly",
        }
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observation as collected from the command line, before any checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationInput {
    pub kind: WeatherKind,
    pub location_name: String,
    pub temperature: f64,
    pub coordinates: Option<Coordinates>,
    pub comment: String,
}

impl ObservationInput {
    pub fn new(kind: WeatherKind) -> Self {
        Self {
            kind,
            location_name: String::new(),
            temperature: TEMPERATURE_UNSET,
            coordinates: None,
            comment: String::new(),
        }
    }

    /// Parse `"<lat>,<lon>"` and store it.
    ///
    /// On error the previously stored coordinates are left as they were.
    pub fn set_coordinates(&mut self, arg: &str) -> Result<(), CoordinateError> {
        self.coordinates = Some(arg.parse()?);
        Ok(())
    }

    /// Join the trailing words of the command line into the comment.
    pub fn set_comment_words<S: AsRef<str>>(&mut self, words: &[S]) {
        self.comment = words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
    }

    /// Check the input and stamp it with the current local time.
    pub fn validate(self) -> Result<WeatherObservation, ValidationError> {
        self.validate_at(Local::now())
    }

    pub fn validate_at(
        self,
        observed_at: DateTime<Local>,
    ) -> Result<WeatherObservation, ValidationError> {
        if self.temperature == TEMPERATURE_UNSET {
            return Err(ValidationError::TemperatureMissing);
        }
        if !self.temperature.is_finite() || self.temperature <= ABSOLUTE_ZERO_C {
            return Err(ValidationError::TemperatureOutOfRange(self.temperature));
        }
        let coordinates = self.coordinates.ok_or(ValidationError::CoordinatesMissing)?;
        if self.location_name.is_empty() {
            return Err(ValidationError::LocationMissing);
        }

        Ok(WeatherObservation {
            kind: self.kind,
            location_name: self.location_name.to_lowercase(),
            coordinates,
            temperature: self.temperature,
            observed_at,
            comment: self.comment,
        })
    }
}

/// A validated observation, ready to be written out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherObservation {
    #[serde(rename = "weather_type")]
    pub kind: WeatherKind,

    #[serde(rename = "location")]
    pub location_name: String,

    #[serde(rename = "location_coords")]
    pub coordinates: Coordinates,

    pub temperature: f64,

    #[serde(rename = "date")]
    pub observed_at: DateTime<Local>,

    #[serde(rename = "info", skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl WeatherObservation {
    /// RFC 3339 timestamp with microsecond precision, used by the XML and TOML reports.
    pub fn date_string(&self) -> String {
        self.observed_at.to_rfc3339_opts(SecondsFormat::Micros, false)
    }
}

const OBSERVATION_FIELDS: &[Field<WeatherObservation>] = &[
    Field {
        name: "kind",
        read: |w| FieldValue::scalar_with(w.kind.as_str(), false),
        metadata: "key=weather_type",
    },
    Field {
        name: "location_name",
        read: |w| FieldValue::scalar(&w.location_name),
        metadata: "key=location",
    },
    Field {
        name: "coordinates",
        read: |w| FieldValue::sequence(&[w.coordinates.lat(), w.coordinates.lon()]),
        metadata: "key=location_coords xml=location_coords>lat,long",
    },
    Field {
        name: "temperature",
        read: |w| FieldValue::scalar(&w.temperature),
        metadata: "key=temperature unit=celsius",
    },
    Field {
        name: "observed_at",
        read: |w| FieldValue::scalar_with(w.date_string(), w.observed_at.timestamp() == 0),
        metadata: "key=date",
    },
    Field {
        name: "comment",
        read: |w| FieldValue::scalar(&w.comment),
        metadata: r#"key=info omit_empty toml_comment="Info from observer""#,
    },
];

impl Tabular for WeatherObservation {
    fn shape(&self) -> Shape {
        Shape::Record(rows(self, OBSERVATION_FIELDS))
    }
}
