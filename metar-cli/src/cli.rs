use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use metar_core::{
    Config, StationCode, Theme, decode, decode_forecast, provider_from_config,
};
use tracing::{debug, warn};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "metar",
    version,
    about = "Fetch and decode METAR/TAF aviation weather",
    after_help = "Examples:\n  metar show KJFK          Decoded METAR for JFK\n  metar show EGLL --raw    Raw METAR for Heathrow\n  metar taf LFPG --all     Raw and decoded TAF for Paris CDG"
)]
pub struct Cli {
    /// Disable colored output (also honored: NO_COLOR).
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current METAR observations.
    Show(ReportArgs),

    /// Show TAF forecasts.
    Taf(ReportArgs),

    /// Interactively set default stations and output options.
    Configure,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// ICAO airport codes, e.g. KJFK EGLL. Defaults to the configured stations.
    pub stations: Vec<String>,

    /// Show the raw report text only. Wins over --all.
    #[arg(short, long)]
    pub raw: bool,

    /// Show both the raw and the decoded report.
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Decoded,
    Raw,
    All,
}

impl ReportArgs {
    fn mode(&self) -> OutputMode {
        if self.raw {
            OutputMode::Raw
        } else if self.all {
            OutputMode::All
        } else {
            OutputMode::Decoded
        }
    }

    /// Stations from the command line, falling back to the config.
    fn resolve_stations(&self, config: &Config) -> anyhow::Result<Vec<StationCode>> {
        let codes = if self.stations.is_empty() {
            &config.default_stations
        } else {
            &self.stations
        };

        StationCode::parse_all(codes).context(
            "No usable stations.\n\
             Hint: pass ICAO codes (e.g. `metar show KJFK`) or run `metar configure`.",
        )
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show(args) => {
                let config = Config::load()?;
                let theme = theme_for(self.no_color, &config);
                let stations = args.resolve_stations(&config)?;
                let provider = provider_from_config(&config)?;
                let metars = provider.metars(&stations).await?;

                let blocks: Vec<String> = metars
                    .iter()
                    .map(|m| render(args.mode(), "METAR", &m.raw, || decode(m, &theme)))
                    .collect();
                println!("{}", blocks.join("\n\n"));
            }
            Command::Taf(args) => {
                let config = Config::load()?;
                let theme = theme_for(self.no_color, &config);
                let stations = args.resolve_stations(&config)?;
                let provider = provider_from_config(&config)?;
                let tafs = provider.tafs(&stations).await?;

                let blocks: Vec<String> = tafs
                    .iter()
                    .map(|t| render(args.mode(), "TAF", &t.raw, || decode_forecast(t, &theme)))
                    .collect();
                println!("{}", blocks.join("\n\n"));
            }
            // `configure` is how a broken config file gets rewritten, so it must not depend on it.
            Command::Configure => configure(config_or_default(Config::load()))?,
        }

        Ok(())
    }
}

fn theme_for(no_color: bool, config: &Config) -> Theme {
    let theme = Theme::new(
        !no_color && std::env::var_os("NO_COLOR").is_none() && config.color_enabled(),
    );
    debug!(?theme, "loaded configuration");
    theme
}

fn render(mode: OutputMode, kind: &str, raw: &str, decoded: impl FnOnce() -> String) -> String {
    match mode {
        OutputMode::Raw => raw.to_string(),
        OutputMode::Decoded => decoded(),
        OutputMode::All => format!("Raw {kind}:\n{raw}\n\nDecoded:\n{}", decoded()),
    }
}

fn config_or_default(loaded: anyhow::Result<Config>) -> Config {
    loaded.unwrap_or_else(|err| {
        warn!("ignoring unreadable configuration: {err:#}");
        Config::default()
    })
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let current = config.default_stations.join(" ");
    let answer = inquire::Text::new("Default stations (space or comma separated):")
        .with_default(&current)
        .prompt()
        .context("Failed to read default stations")?;

    let codes: Vec<&str> =
        answer.split(|c: char| c == ',' || c.is_whitespace()).filter(|s| !s.is_empty()).collect();
    if codes.is_empty() {
        config.default_stations.clear();
    } else {
        config.set_default_stations(&codes)?;
    }

    config.color = Some(
        inquire::Confirm::new("Use colored output?")
            .with_default(config.color_enabled())
            .prompt()
            .context("Failed to read color preference")?,
    );

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
