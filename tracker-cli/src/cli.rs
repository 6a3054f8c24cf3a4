use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use inquire::Select;
use std::path::Path;
use tracker_core::{
    Config, GeocodeResult, JsonFileStore, LocationId, LocationRegistry, LocationStore,
    MAX_LOCATIONS, RefreshOrchestrator, TrackedLocation, WeatherSource, baseline::parse_baseline,
    source_from_config,
};

use crate::view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-tracker", version, about = "Track current weather for a few places")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for cities by name.
    Search {
        query: String,

        /// Maximum number of matches; defaults to the configured search limit.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show current weather for a city without tracking it.
    Now { city: String },

    /// Start tracking a city.
    Add {
        query: String,

        #[arg(long)]
        note: Option<String>,

        /// Reference temperature in °C to compare against.
        #[arg(long)]
        baseline: Option<String>,

        /// Take the first match instead of asking.
        #[arg(long)]
        first: bool,
    },

    /// List tracked locations.
    List,

    /// Fetch fresh weather for every tracked location.
    Refresh,

    /// Set or clear the baseline temperature of a tracked location.
    Baseline {
        /// Position in the list (1-based) or city name.
        target: String,

        #[command(flatten)]
        value: BaselineValue,
    },

    /// Set the note of a tracked location; omit the text to clear it.
    Note { target: String, text: Option<String> },

    /// Stop tracking a location.
    Remove { target: String },

    /// Show the config file path and effective settings.
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Write a config file holding the default settings.
    Init {
        /// Replace an existing config file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct BaselineValue {
    /// Temperature in °C.
    #[arg(allow_negative_numbers = true)]
    temperature: Option<String>,

    /// Use the latest fetched temperature.
    #[arg(long)]
    current: bool,

    #[arg(long)]
    clear: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        // Runs before loading so a broken config file can be replaced.
        if let Command::Config { action: Some(ConfigAction::Init { force }) } = self.command {
            let path = Config::config_file_path()?;
            init_config(&path, force)?;
            println!("Wrote default config to {}", path.display());
            return Ok(());
        }

        let config = Config::load()?;

        match self.command {
            Command::Search { query, limit } => {
                let query = non_empty_query(&query)?;
                let source = source_from_config(&config)?;
                let results = source
                    .search_cities(query, limit.unwrap_or(config.search_limit))
                    .await?;

                if results.is_empty() {
                    println!("No cities found matching '{query}'");
                }
                for (i, result) in results.iter().enumerate() {
                    println!("{}", view::search_result_line(i + 1, result));
                }
            }
            Command::Now { city } => {
                let city = non_empty_query(&city)?;
                let source = source_from_config(&config)?;
                let (place, observation) = source.fetch_weather_for_city(city).await?;
                println!("{}", view::observation_summary(&place, &observation));
            }
            Command::Add { query, note, baseline, first } => {
                let mut registry = open_registry(&config)?;
                if registry.is_full() {
                    bail!(
                        "Already tracking {MAX_LOCATIONS} locations. \
                         Remove one before adding another."
                    );
                }

                let query = non_empty_query(&query)?;
                let source = source_from_config(&config)?;
                let results = source.search_cities(query, config.search_limit).await?;
                let choice = choose_result(query, results, first)?;

                let (baseline, notice) =
                    baseline.as_deref().map(read_baseline).unwrap_or_default();
                if let Some(notice) = notice {
                    eprintln!("{notice}");
                }
                let mut location =
                    TrackedLocation::new(&choice.name, choice.latitude, choice.longitude)
                        .with_note(note.as_deref())
                        .with_baseline(baseline);

                let orchestrator = RefreshOrchestrator::new(source);
                if let Err(e) = orchestrator.refresh_one(&mut location).await {
                    eprintln!("Added without current weather: {e}");
                }

                registry.insert(location)?;
                println!(
                    "Now tracking {} ({} slot(s) left)",
                    choice.display_name(),
                    registry.remaining()
                );
            }
            Command::List => {
                let registry = open_registry(&config)?;
                print_locations(&registry);
            }
            Command::Refresh => {
                let mut registry = open_registry(&config)?;
                let orchestrator = RefreshOrchestrator::new(source_from_config(&config)?);

                orchestrator.refresh_all(registry.all_mut()).await;
                registry.save()?;
                print_locations(&registry);
            }
            Command::Baseline { target, value } => {
                let mut registry = open_registry(&config)?;
                let id = resolve(&registry, &target)?;
                let pos = position(&registry, id);
                let location = registry.get_mut(id).context("location disappeared")?;

                if value.current {
                    if location.current_temp_c().is_none() {
                        bail!(
                            "{} has no current reading yet; run `weather-tracker refresh` first.",
                            location.city_name()
                        );
                    }
                    location.set_current_as_baseline();
                } else if value.clear {
                    location.update_baseline(None);
                } else {
                    let (parsed, notice) =
                        read_baseline(value.temperature.as_deref().unwrap_or_default());
                    if let Some(notice) = notice {
                        eprintln!("{notice}");
                    }
                    location.update_baseline(parsed);
                }

                println!("{}", view::location_card(pos, location));
                registry.save()?;
            }
            Command::Note { target, text } => {
                let mut registry = open_registry(&config)?;
                let id = resolve(&registry, &target)?;
                registry
                    .get_mut(id)
                    .context("location disappeared")?
                    .update_note(text.as_deref());
                registry.save()?;
                println!("Note updated for {target}");
            }
            Command::Remove { target } => {
                let mut registry = open_registry(&config)?;
                let id = resolve(&registry, &target)?;
                let removed = registry.delete(id)?;
                println!("Stopped tracking {}", removed.city_name());
            }
            Command::Config { .. } => {
                println!("# {}", Config::config_file_path()?.display());
                println!("# locations: {}", config.data_file_path()?.display());
                print!("{}", config.to_toml()?);
            }
        }

        Ok(())
    }
}

fn open_registry(config: &Config) -> Result<LocationRegistry<JsonFileStore>> {
    let path = config.data_file_path()?;
    tracing::debug!("Using location store {}", path.display());
    Ok(LocationRegistry::open(JsonFileStore::new(path))?)
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite it.", path.display());
    }
    Config::default().save_to(path)
}

/// Parses a typed baseline. Text that is not a temperature gives no baseline
/// and a notice for stderr.
fn read_baseline(text: &str) -> (Option<f64>, Option<String>) {
    match parse_baseline(text) {
        Some(value) => (Some(value), None),
        None => (None, Some(format!("'{}' is not a temperature; no baseline set.", text.trim()))),
    }
}

fn non_empty_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        bail!("Please enter a city name.");
    }
    Ok(trimmed)
}

fn resolve(registry: &LocationRegistry<JsonFileStore>, target: &str) -> Result<LocationId> {
    registry.find(target).map(TrackedLocation::id).ok_or_else(|| {
        anyhow!("No tracked location matches '{target}'. See `weather-tracker list`.")
    })
}

fn position(registry: &LocationRegistry<JsonFileStore>, id: LocationId) -> usize {
    registry.all().iter().position(|l| l.id() == id).map_or(1, |idx| idx + 1)
}

fn choose_result(
    query: &str,
    mut results: Vec<GeocodeResult>,
    first: bool,
) -> Result<GeocodeResult> {
    if results.is_empty() {
        bail!("No cities found matching '{query}'");
    }
    if first || results.len() == 1 {
        return Ok(results.swap_remove(0));
    }

    let labels: Vec<String> = results.iter().map(GeocodeResult::display_name).collect();
    let picked = Select::new("Which one?", labels)
        .raw_prompt()
        .context("No location selected")?;

    Ok(results.swap_remove(picked.index))
}

fn print_locations<S: LocationStore>(registry: &LocationRegistry<S>) {
    if registry.count() == 0 {
        println!("No tracked locations. Add one with `weather-tracker add <city>`.");
        return;
    }

    for (i, location) in registry.all().iter().enumerate() {
        println!("{}\n", view::location_card(i + 1, location));
    }
    println!("{} of {MAX_LOCATIONS} slots used", registry.count());
}
