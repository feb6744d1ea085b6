//! Entity Census Runtime
//!
//! Runs `/ec` commands against a world snapshot (or a generated demo world)
//! and prints the replies. With no command on the command line, commands are
//! read from stdin one per line.

mod console;
mod demo;

use anyhow::{bail, Context, Result};
use census_core::Location;
use census_services::{
    EntityControl, GameWorld, MemoryPlayer, MemoryServer, Server, SettingsStore, USAGE,
};
use clap::Parser;
use console::StdoutSender;
use std::io::BufRead;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Largest accepted `--radius`.
const MAX_DEMO_RADIUS: i64 = 64;

/// Count and rank the entities in a world's loaded regions
#[derive(Parser)]
#[command(name = "census")]
#[command(version, about, long_about = None)]
struct Cli {
    /// World snapshot JSON; a generated demo world is used when omitted
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Settings file, created with defaults if missing
    #[arg(long, default_value = "census.json")]
    settings: PathBuf,

    /// Run commands as a player standing at spawn in this world
    #[arg(long, value_name = "WORLD")]
    player: Option<String>,

    /// Grant the player the admin permission
    #[arg(long, requires = "player")]
    admin: bool,

    /// Seed for the demo world
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Demo world radius in regions
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(i32).range(0..=MAX_DEMO_RADIUS))]
    radius: i32,

    /// One `/ec` command, e.g. `list world 2`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = SettingsStore::load_or_default(&cli.settings)?;
    init_logging(settings.get().debug);
    tracing::info!("Entity Census v{}", census_core::VERSION);

    let server = match &cli.snapshot {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read snapshot {}", path.display()))?;
            MemoryServer::from_json(&json)
                .with_context(|| format!("invalid snapshot {}", path.display()))?
        }
        None => {
            tracing::info!(seed = cli.seed, radius = cli.radius, "generating demo world");
            demo::demo_server(cli.seed, cli.radius)
        }
    };

    let mut sender = match &cli.player {
        Some(world_name) => {
            let Some(world) = server.world(world_name) else {
                bail!("no world named {:?} in the snapshot", world_name);
            };
            let spawn = Location::new(world.id(), 0.5, 64.0, 0.5);
            StdoutSender::for_player(MemoryPlayer::new(spawn), cli.admin)
        }
        None => StdoutSender::console(),
    };

    let mut control = EntityControl::new(settings);

    if !cli.command.is_empty() {
        let args: Vec<&str> = cli.command.iter().map(String::as_str).collect();
        run_command(&mut control, &mut sender, &server, &args);
        return Ok(());
    }

    for line in std::io::stdin().lock().lines() {
        let line = line.context("failed to read command")?;
        let mut words = line.split_whitespace().peekable();
        if words.next_if(|word| word.eq_ignore_ascii_case("/ec")).is_none() && words.peek().is_none() {
            continue;
        }
        let args: Vec<&str> = words.collect();
        run_command(&mut control, &mut sender, &server, &args);
    }

    Ok(())
}

fn run_command(control: &mut EntityControl, sender: &mut StdoutSender, server: &dyn Server, args: &[&str]) {
    if !control.on_command(sender, server, args) {
        println!("{}", USAGE);
    }
}

/// `RUST_LOG` wins; otherwise info, or debug when the settings ask for it.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
