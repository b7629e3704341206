use std::{
    error::Error as _,
    fs,
    path::{Path, PathBuf},
};

use tracing::{error, info};

use crate::{error::OutputError, format::OutputFormat, model::WeatherObservation};

/// Result of writing one format.
#[derive(Debug)]
pub struct WriteOutcome {
    pub format: OutputFormat,
    pub result: Result<PathBuf, OutputError>,
}

/// Write `observation` once per format into `dir`, replacing existing files.
///
/// Every format is attempted even if an earlier one fails; failures are
/// logged and returned, never propagated.
pub fn write_all(
    observation: &WeatherObservation,
    dir: &Path,
    stem: &str,
    formats: &[OutputFormat],
) -> Vec<WriteOutcome> {
    formats
        .iter()
        .map(|&format| {
            let result = write_one(observation, dir, stem, format);
            match &result {
                Ok(path) => info!(%format, path = %path.display(), "report file updated"),
                Err(err) => {
                    error!(%format, error = %err, cause = ?err.source(), "report file skipped")
                }
            }
            WriteOutcome { format, result }
        })
        .collect()
}

fn write_one(
    observation: &WeatherObservation,
    dir: &Path,
    stem: &str,
    format: OutputFormat,
) -> Result<PathBuf, OutputError> {
    let body = format
        .encode(observation)
        .map_err(|source| OutputError::Serialization {
            format,
            source: source.into(),
        })?;

    let path = dir.join(format.file_name(stem));
    fs::write(&path, body).map_err(|source| OutputError::FileIo {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ObservationInput, WeatherKind};
    use tempfile::TempDir;

    fn observation() -> WeatherObservation {
        let mut input = ObservationInput::new(WeatherKind::Snowy);
        input.location_name = "Oslo".to_string();
        input.temperature = -4.0;
        input.set_coordinates("59.91,10.75").unwrap();
        input.validate().unwrap()
    }

    #[test]
    fn writes_every_format() {
        let dir = TempDir::new().unwrap();
        let outcomes = write_all(&observation(), dir.path(), "weather", OutputFormat::all());

        assert_eq!(outcomes.len(), 4);
        for outcome in &outcomes {
            let path = outcome.result.as_ref().expect("write should succeed");
            assert!(path.exists());
            assert_eq!(
                path.extension().and_then(|e| e.to_str()),
                Some(outcome.format.extension())
            );
        }
    }

    #[test]
    fn existing_files_are_truncated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weather.json");
        fs::write(&path, "x".repeat(10_000)).unwrap();

        write_all(&observation(), dir.path(), "weather", &[OutputFormat::Json]);

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with('{'));
        assert!(contents.len() < 10_000);
    }

    #[test]
    fn one_failing_format_does_not_stop_the_rest() {
        let dir = TempDir::new().unwrap();
        // A directory where the XML file should go makes that write fail.
        fs::create_dir(dir.path().join("weather.xml")).unwrap();

        let outcomes = write_all(&observation(), dir.path(), "weather", OutputFormat::all());

        let failed: Vec<OutputFormat> = outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.format)
            .collect();
        assert_eq!(failed, [OutputFormat::Xml]);
        assert!(matches!(
            outcomes[1].result,
            Err(OutputError::FileIo { .. })
        ));
        assert!(dir.path().join("weather.toml").is_file());
    }

    #[test]
    fn missing_directory_reports_every_format() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let outcomes = write_all(&observation(), &missing, "weather", OutputFormat::all());
        assert_eq!(outcomes.len(), 4);
        assert!(outcomes.iter().all(|o| o.result.is_err()));
    }
}
