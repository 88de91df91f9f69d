//! `paperflow` command-line front end.
//!
//! Every subcommand loads the track file, runs one operation through
//! `ReviewRegistry` and writes the file back when something changed. All
//! workflow rules live in `paperflow_core`; this binary only parses argv and
//! prints results.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use paperflow_core::{
    init_from_config, Command, Paper, PaperId, PaperState, ReviewConfig, ReviewRegistry, Track,
    ALL_STATES_FILTER,
};

#[derive(Parser)]
#[command(name = "paperflow")]
#[command(about = "Track conference papers through submission and review", version)]
struct Cli {
    /// Track file to read and write (overrides PAPERFLOW_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    /// Log level (overrides PAPERFLOW_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a track together with its first papers
    AddTrack {
        /// Track name, unique ignoring case
        name: String,
        /// Page limit (3-20)
        #[arg(long)]
        page_limit: u32,
        /// Pay rate per extra page (1-50)
        #[arg(long)]
        pay_rate: u32,
        /// Author names of an initial paper; repeat for more papers
        #[arg(long = "paper", required = true)]
        papers: Vec<String>,
    },
    /// Submit a new abstract to a track
    AddPaper {
        /// Track name (defaults to the first track in the file)
        #[arg(long)]
        track: Option<String>,
        /// Author names, e.g. "A. Smith; B. Jones"
        author_names: String,
    },
    /// Run a workflow command on a paper
    Exec {
        #[arg(long)]
        track: Option<String>,
        id: PaperId,
        /// ACCEPT, ASSIGN, CLOSE, MODIFY, PROCESS, PROPOSE, RECOMMEND or SUBMIT
        action: String,
        /// Reviewer id, recommendation code or closing reason
        payload: Option<String>,
    },
    /// Delete a paper from a track
    Delete {
        #[arg(long)]
        track: Option<String>,
        id: PaperId,
    },
    /// List the papers of a track
    List {
        #[arg(long)]
        track: Option<String>,
        /// Only papers in this state
        #[arg(long, default_value = ALL_STATES_FILTER)]
        state: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the full record of one paper
    Show {
        #[arg(long)]
        track: Option<String>,
        id: PaperId,
        #[arg(long)]
        json: bool,
    },
    /// List track names; the active one is starred
    Tracks,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ReviewConfig::from_env();
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(path) = cli.data_file {
        config.data_file = path;
    }
    if let Err(err) = init_from_config(&config) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let mut registry = load_registry(&config.data_file)?;
    let changed = run(&mut registry, cli.command)?;
    if changed {
        registry
            .save_tracks_to_file(&config.data_file)
            .with_context(|| format!("Unable to save file `{}`", config.data_file.display()))?;
        info!(
            "event=cli_saved module=cli status=ok tracks={}",
            registry.track_names().len()
        );
    }
    Ok(())
}

/// Loads the track file when it exists; a missing file starts empty.
fn load_registry(path: &Path) -> Result<ReviewRegistry> {
    let mut registry = ReviewRegistry::new();
    if path.exists() {
        registry
            .load_tracks_from_file(path)
            .with_context(|| format!("Unable to load file `{}`", path.display()))?;
    }
    Ok(registry)
}

/// Runs one subcommand. Returns whether the registry must be saved.
fn run(registry: &mut ReviewRegistry, command: Commands) -> Result<bool> {
    match command {
        Commands::AddTrack {
            name,
            page_limit,
            pay_rate,
            papers,
        } => {
            registry.add_track(&name, page_limit, pay_rate)?;
            for author_names in &papers {
                registry.add_paper_to_active_track(author_names)?;
            }
            println!("added track `{}` with {} paper(s)", name.trim(), papers.len());
            Ok(true)
        }
        Commands::AddPaper {
            track,
            author_names,
        } => {
            select_track(registry, track.as_deref())?;
            let id = registry
                .add_paper_to_active_track(&author_names)?
                .ok_or_else(|| anyhow!("no active track"))?;
            println!("{id}");
            Ok(true)
        }
        Commands::Exec {
            track,
            id,
            action,
            payload,
        } => {
            select_track(registry, track.as_deref())?;
            require_paper(registry, id)?;
            let command = Command::parse(&action, payload.as_deref())?;
            registry.execute_command(id, &command)?;
            let paper = require_paper(registry, id)?;
            println!("paper {id} is now {}", paper.state().as_str());
            Ok(true)
        }
        Commands::Delete { track, id } => {
            select_track(registry, track.as_deref())?;
            require_paper(registry, id)?;
            registry.delete_paper_by_id(id);
            println!("deleted paper {id}");
            if let Some(name) = empty_active_track(registry) {
                eprintln!("warning: track `{name}` has no papers left and will not be saved");
            }
            Ok(true)
        }
        Commands::List { track, state, json } => {
            select_track(registry, track.as_deref())?;
            if state != ALL_STATES_FILTER && PaperState::parse(&state).is_none() {
                bail!("unknown state `{state}`");
            }
            let papers = registry
                .list_papers(Some(&state))
                .ok_or_else(|| anyhow!("no active track"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&papers)?);
            } else {
                for paper in &papers {
                    println!(
                        "{:>4}  {:<11}  {:<9}  {}",
                        paper.id,
                        paper.state.as_str(),
                        paper.paper_type.as_str(),
                        paper.author_names
                    );
                }
            }
            Ok(false)
        }
        Commands::Show { track, id, json } => {
            select_track(registry, track.as_deref())?;
            let record = require_paper(registry, id)?.to_record();
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{record}");
            }
            Ok(false)
        }
        Commands::Tracks => {
            let active = registry.active_track_name().map(str::to_string);
            for name in registry.track_names() {
                let marker = if active.as_deref() == Some(name) { '*' } else { ' ' };
                println!("{marker} {name}");
            }
            Ok(false)
        }
    }
}

fn select_track(registry: &mut ReviewRegistry, track: Option<&str>) -> Result<()> {
    match track {
        Some(name) => registry.set_active_track(name)?,
        None if registry.active_track().is_none() => {
            bail!("no tracks yet; create one with `paperflow add-track`")
        }
        None => {}
    }
    Ok(())
}

fn require_paper(registry: &ReviewRegistry, id: PaperId) -> Result<&Paper> {
    registry
        .paper_by_id(id)
        .ok_or_else(|| anyhow!("paper {id} does not exist in the active track"))
}

/// Name of the active track when it has no papers; the file format drops it.
fn empty_active_track(registry: &ReviewRegistry) -> Option<&str> {
    registry
        .active_track()
        .filter(|track| track.is_empty())
        .map(Track::name)
}
