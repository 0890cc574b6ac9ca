use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Confirm, InquireError, Text};
use skypane_core::{
    Aggregator, BackgroundChange, Config, HomeLocation, LocationQuery, ProviderId, Session,
    present::summary,
    provider::{epa::EpaUvProvider, providers_from_config, yahoo::YahooForecastProvider},
};

type Loader = Aggregator<YahooForecastProvider, EpaUvProvider>;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skypane", version, about = "Current weather, forecast and UV index")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a place, coordinates, or the configured home location.
    Show {
        /// Free-text location, e.g. "Philadelphia, PA".
        location: Option<String>,

        #[arg(long, requires = "long", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        long: Option<f64>,

        /// Show Celsius, whatever the config says.
        #[arg(long, conflicts_with = "imperial")]
        metric: bool,

        /// Show Fahrenheit, whatever the config says.
        #[arg(long)]
        imperial: bool,

        /// Write a standalone HTML page here instead of printing a summary.
        #[arg(long, conflicts_with = "json")]
        html: Option<PathBuf>,

        /// Print the merged snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Keep one snapshot live: type locations to load them, `u` to toggle units.
    Interactive,

    /// Set provider endpoints, default units and the home location.
    Configure,

    /// Print where the config file lives.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { location, lat, long, metric, imperial, html, json } => {
                let config = Config::load()?;
                let query = resolve_query(location, lat.zip(long), &config)?;
                let metric = use_metric(metric, imperial, &config);
                show(&config, query, metric, html, json).await
            }
            Command::Interactive => interactive(&Config::load()?).await,
            Command::Configure => configure(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

/// Command-line unit flags override the configured default.
fn use_metric(metric: bool, imperial: bool, config: &Config) -> bool {
    match (metric, imperial) {
        (true, _) => true,
        (_, true) => false,
        _ => config.metric,
    }
}

/// Text wins over coordinates, coordinates over the configured home. Text is
/// handed to the provider as typed.
fn resolve_query(
    text: Option<String>,
    coords: Option<(f64, f64)>,
    config: &Config,
) -> anyhow::Result<LocationQuery> {
    if let Some(text) = text {
        return Ok(LocationQuery::Text(text));
    }

    if let Some((lat, long)) = coords {
        return Ok(LocationQuery::Coordinates { lat, long });
    }

    config.home_query().ok_or_else(|| {
        anyhow::anyhow!(
            "No location given and no home location configured.\n\
             Hint: pass a place name, use --lat/--long, or run `skypane configure`."
        )
    })
}

fn loader(config: &Config) -> Loader {
    let (forecast, uv) = providers_from_config(config);
    Aggregator::new(forecast, uv)
}

async fn show(
    config: &Config,
    query: LocationQuery,
    metric: bool,
    html: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = Session::new(metric);
    let ticket = session.begin_request();
    let snapshot = loader(config)
        .load(&query)
        .await
        .with_context(|| format!("Could not load weather for '{query}'"))?;

    session.complete(ticket, snapshot, Local::now().time());
    let Some(weather) = session.snapshot() else {
        return Ok(());
    };

    if json {
        let out = serde_json::to_string_pretty(weather).context("Failed to serialize snapshot")?;
        println!("{out}");
        return Ok(());
    }

    if let Some(path) = html {
        let Some(regions) = session.regions() else {
            return Ok(());
        };
        let page = regions.page(session.background(), session.metric());
        std::fs::write(&path, page)
            .with_context(|| format!("Failed to write page: {}", path.display()))?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    println!("{}", summary(weather, session.metric()));
    if let Some(background) = session.background() {
        println!("Background: {background}");
    }
    Ok(())
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let loader = loader(config);
    let mut session = Session::new(config.metric);

    if let Some(home) = config.home_query() {
        load_into(&loader, &mut session, home).await;
    }

    loop {
        let input = match Text::new("Location (u = toggle units, q = quit):").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read input"),
        };

        match input.trim() {
            "q" => break,
            "u" => {
                session.toggle_units();
                print_session(&session);
            }
            "" => continue,
            _ => load_into(&loader, &mut session, LocationQuery::Text(input)).await,
        }
    }

    Ok(())
}

/// A failed load leaves the previous snapshot on screen.
async fn load_into(loader: &Loader, session: &mut Session, query: LocationQuery) {
    let ticket = session.begin_request();

    match loader.load(&query).await {
        Ok(snapshot) => {
            if let Some(BackgroundChange { remove, add }) =
                session.complete(ticket, snapshot, Local::now().time())
            {
                tracing::debug!(?remove, %add, "background changed");
            }
            print_session(session);
        }
        Err(err) => tracing::warn!(%query, error = %err, "weather load failed"),
    }
}

fn print_session(session: &Session) {
    if let Some(weather) = session.snapshot() {
        println!("{}", summary(weather, session.metric()));
        if let Some(background) = session.background() {
            println!("Background: {background}");
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    for id in ProviderId::all() {
        let current = config.endpoint(*id);
        let endpoint = Text::new(&format!("{id} endpoint:"))
            .with_default(&current)
            .prompt()
            .context("Failed to read endpoint")?;
        config.set_endpoint(*id, endpoint);
    }

    config.metric = Confirm::new("Use Celsius by default?")
        .with_default(config.metric)
        .prompt()
        .context("Failed to read unit preference")?;

    let current_home = config.home.map(|h| format!("{},{}", h.lat, h.long)).unwrap_or_default();
    let home = Text::new("Home location as lat,long (empty for none):")
        .with_default(&current_home)
        .prompt()
        .context("Failed to read home location")?;
    config.home = parse_home(&home)?;

    config.save()?;
    println!("Saved {}", Config::config_file_path()?.display());
    Ok(())
}

fn parse_home(text: &str) -> anyhow::Result<Option<HomeLocation>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let Some((lat, long)) = text.split_once(',') else {
        bail!("Expected lat,long but got '{text}'");
    };
    let lat = lat.trim().parse().with_context(|| format!("Bad latitude: {lat}"))?;
    let long = long.trim().parse().with_context(|| format!("Bad longitude: {long}"))?;

    Ok(Some(HomeLocation { lat, long }))
}
