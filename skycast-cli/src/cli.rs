use anyhow::{anyhow, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use skycast_core::{AppState, Config, OpenMeteoSource, UnitSystem, search};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather lookup CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions and forecast for a place.
    Show {
        /// Place name, e.g. "Berlin". Falls back to the configured default.
        place: Option<String>,

        /// Display units: "metric" or "imperial".
        #[arg(long)]
        units: Option<String>,
    },

    /// Search repeatedly and toggle units without refetching.
    Interactive,

    /// Set default units and an optional default place.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { place, units } => show(place, units).await,
            Command::Interactive => interactive().await,
            Command::Configure => configure(),
        }
    }
}

async fn show(place: Option<String>, units: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;

    let units = match units {
        Some(s) => UnitSystem::try_from(s.as_str())?,
        None => config.units_or_default(),
    };

    let place = place.or(config.default_place).ok_or_else(|| {
        anyhow!(
            "No place given.\n\
             Hint: pass one (`skycast show Berlin`) or set a default with `skycast configure`."
        )
    })?;

    let place = place.trim().to_string();
    if place.is_empty() {
        bail!("Place name is empty.");
    }

    let source = OpenMeteoSource::new();
    let snapshot = search(&source, &place).await?;

    println!("{}", render::report(&snapshot, units, Local::now().naive_local()));
    Ok(())
}

const CHOICE_TOGGLE: &str = "Toggle units";
const CHOICE_SEARCH: &str = "New search";
const CHOICE_QUIT: &str = "Quit";

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let source = OpenMeteoSource::new();
    let mut state = AppState::new(config.units_or_default());

    loop {
        let query = Text::new("Place:").prompt()?;
        let query = query.trim().to_string();

        if query.is_empty() {
            println!("Nothing to search for.");
        } else {
            let generation = state.begin_search();
            match search(&source, &query).await {
                Ok(snapshot) => {
                    state.commit(generation, snapshot);
                }
                // Prior snapshot stays active; the session continues.
                Err(e) => println!("Error: {e}"),
            }
        }

        if let Some(snapshot) = state.snapshot() {
            println!();
            println!(
                "{}",
                render::report(snapshot, state.units(), Local::now().naive_local())
            );
        }

        loop {
            println!();
            let choice =
                Select::new("Next:", vec![CHOICE_TOGGLE, CHOICE_SEARCH, CHOICE_QUIT]).prompt()?;

            match choice {
                CHOICE_TOGGLE => {
                    let units = state.toggle_units();
                    match state.snapshot() {
                        Some(snapshot) => println!(
                            "{}",
                            render::report(snapshot, units, Local::now().naive_local())
                        ),
                        None => println!("Units set to {units}."),
                    }
                }
                CHOICE_SEARCH => break,
                _ => return Ok(()),
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let options: Vec<&str> = UnitSystem::all().iter().map(UnitSystem::as_str).collect();
    let chosen = Select::new("Default units:", options).prompt()?;
    config.units = Some(UnitSystem::try_from(chosen)?);

    let place = Text::new("Default place (leave empty for none):")
        .with_initial_value(config.default_place.as_deref().unwrap_or(""))
        .prompt()?;
    let place = place.trim();
    config.default_place = if place.is_empty() { None } else { Some(place.to_string()) };

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
