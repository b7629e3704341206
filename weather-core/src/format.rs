use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{coordinates::Coordinates, model::WeatherObservation};

const TOML_INFO_COMMENT: &str = "# Info from observer";

/// The on-disk representations an observation is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Xml,
    Yaml,
    Toml,
}

impl OutputFormat {
    pub const fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Json,
            OutputFormat::Xml,
            OutputFormat::Yaml,
            OutputFormat::Toml,
        ]
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Toml => "toml",
        }
    }

    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension())
    }

    /// Serialize `observation` into this format's textual form.
    pub fn encode(&self, observation: &WeatherObservation) -> Result<String> {
        match self {
            OutputFormat::Json => encode_json(observation),
            OutputFormat::Xml => encode_xml(observation),
            OutputFormat::Yaml => {
                serde_yaml::to_string(observation).context("YAML serializer rejected observation")
            }
            OutputFormat::Toml => encode_toml(observation),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Json => "JSON",
            OutputFormat::Xml => "XML",
            OutputFormat::Yaml => "YAML",
            OutputFormat::Toml => "TOML",
        })
    }
}

fn encode_json(observation: &WeatherObservation) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    observation
        .serialize(&mut ser)
        .context("JSON serializer rejected observation")?;

    String::from_utf8(buf).context("JSON output was not valid UTF-8")
}

/// XML has no sequences of bare numbers, so coordinates become `<lat>`/`<long>` children.
#[derive(Debug, Serialize)]
#[serde(rename = "weather_report")]
struct XmlReport<'a> {
    weather_type: &'static str,
    location: &'a str,
    location_coords: XmlCoordinates,
    temperature: f64,
    date: String,
    #[serde(skip_serializing_if = "str::is_empty")]
    info: &'a str,
}

#[derive(Debug, Serialize)]
struct XmlCoordinates {
    lat: f64,
    long: f64,
}

fn encode_xml(observation: &WeatherObservation) -> Result<String> {
    let report = XmlReport {
        weather_type: observation.kind.as_str(),
        location: &observation.location_name,
        location_coords: XmlCoordinates {
            lat: observation.coordinates.lat(),
            long: observation.coordinates.lon(),
        },
        temperature: observation.temperature,
        date: observation.date_string(),
        info: &observation.comment,
    };

    let mut out = String::new();
    let mut ser = quick_xml::se::Serializer::new(&mut out);
    ser.indent('\t', 1);
    report
        .serialize(ser)
        .context("XML serializer rejected observation")?;

    Ok(out)
}

#[derive(Debug, Serialize)]
struct TomlReport<'a> {
    weather_type: &'static str,
    location: &'a str,
    location_coords: Coordinates,
    temperature: f64,
    date: toml::value::Datetime,
}

fn encode_toml(observation: &WeatherObservation) -> Result<String> {
    let date = observation
        .date_string()
        .parse::<toml::value::Datetime>()
        .context("timestamp is not a valid TOML datetime")?;

    let report = TomlReport {
        weather_type: observation.kind.as_str(),
        location: &observation.location_name,
        location_coords: observation.coordinates,
        temperature: observation.temperature,
        date,
    };

    let mut out = toml::to_string(&report).context("TOML serializer rejected observation")?;

    // `info` is written by hand, after every serialized key, to carry its comment.
    let info = toml::Value::String(observation.comment.clone());
    out.push_str(&format!("{TOML_INFO_COMMENT}\ninfo = {info}\n"));
    Ok(out)
}
