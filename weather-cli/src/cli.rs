use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use weather_core::{
    Config, ObservationInput, WeatherKind, model::TEMPERATURE_UNSET, output, table,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Record a weather observation")]
pub struct Cli {
    /// Config file to use instead of the one in the platform config directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a snowy-weather observation.
    Snowy(ObservationArgs),

    /// Record a hot-weather observation.
    Hotly(ObservationArgs),
}

/// Flags shared by every weather kind. Trailing words become the comment.
#[derive(Debug, Args)]
pub struct ObservationArgs {
    /// Name of the location.
    #[arg(long, default_value = "")]
    pub location: String,

    /// Temperature at the location in degrees Celsius.
    #[arg(long, default_value_t = TEMPERATURE_UNSET, allow_negative_numbers = true)]
    pub temp: f64,

    /// Coordinates of the location, e.g. `55.75,37.62`.
    #[arg(long = "loc_crd", value_name = "LAT,LON", allow_hyphen_values = true)]
    pub loc_crd: Option<String>,

    /// Free-form note from the observer.
    #[arg(trailing_var_arg = true, num_args = 1..)]
    pub comment: Vec<String>,
}

impl ObservationArgs {
    fn into_input(self, kind: WeatherKind) -> anyhow::Result<ObservationInput> {
        let mut input = ObservationInput::new(kind);
        input.location_name = self.location;
        input.temperature = self.temp;
        input.set_comment_words(&self.comment);

        if let Some(raw) = &self.loc_crd {
            input
                .set_coordinates(raw)
                .with_context(|| format!("Invalid --loc_crd value `{raw}`"))?;
        }

        Ok(input)
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        let (kind, args) = match self.command {
            Command::Snowy(args) => (WeatherKind::Snowy, args),
            Command::Hotly(args) => (WeatherKind::Hotly, args),
        };
        info!(%kind, "received observation parameters");

        let observation = args
            .into_input(kind)?
            .validate()
            .context("Observation rejected")?;
        info!(
            location = %observation.location_name,
            coordinates = %observation.coordinates,
            temperature = observation.temperature,
            "observation validated"
        );

        let outcomes = output::write_all(
            &observation,
            &config.output_dir(),
            &config.file_stem,
            &config.formats,
        );
        let written = outcomes.iter().filter(|o| o.result.is_ok()).count();
        if written == outcomes.len() {
            info!(written, "all report files updated");
        } else {
            warn!(written, total = outcomes.len(), "some report files were not updated");
        }

        println!();
        table::print(&observation).context("Failed to print observation table")?;

        Ok(())
    }
}
