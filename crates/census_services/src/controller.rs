// controller.rs - `/ec` command handling
//
// Owns one WorldCount per world name. Counts are only rebuilt by `/ec count`,
// or implicitly by `list` and `tp` when a world has never been counted, so
// every list and teleport id refers to the same snapshot until the next count.

use crate::command::{Command, CommandError};
use crate::host::{CommandSender, GameWorld, Server, ADMIN_PERMISSION, DEFAULT_WORLD};
use crate::report;
use crate::settings::SettingsStore;
use census_core::WorldCount;
use census_metrics::{Counter, PhaseProfiler, ScanTimer};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Number of rebuild timings kept for the rolling average.
const SCAN_HISTORY: usize = 32;

/// The entity census command handler.
pub struct EntityControl {
    settings: SettingsStore,
    worlds: HashMap<String, WorldCount>,
    scan_timer: ScanTimer,
    profiler: PhaseProfiler,
    counters: Counter,
}

impl EntityControl {
    pub fn new(settings: SettingsStore) -> Self {
        Self {
            settings,
            worlds: HashMap::new(),
            scan_timer: ScanTimer::new(SCAN_HISTORY),
            profiler: PhaseProfiler::new(),
            counters: Counter::new(),
        }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Counts kept for `world_name`, if it was ever counted.
    pub fn world_count(&self, world_name: &str) -> Option<&WorldCount> {
        self.worlds.get(world_name)
    }

    pub fn scan_timer(&self) -> &ScanTimer {
        &self.scan_timer
    }

    pub fn counters(&self) -> &Counter {
        &self.counters
    }

    /// Handle the arguments of one `/ec` command.
    ///
    /// Returns false when the host should show usage help instead.
    pub fn on_command(
        &mut self,
        sender: &mut dyn CommandSender,
        server: &dyn Server,
        args: &[&str],
    ) -> bool {
        let command = Command::parse(args);
        debug!(?args, ?command, "ec command");

        match command {
            Ok(ref command) if command.requires_player() && sender.player().is_none() => {
                sender.send_message("You must be in game to teleport.");
                true
            }
            Err(CommandError::InvalidId(_)) if sender.player().is_none() => {
                sender.send_message("You must be in game to teleport.");
                true
            }
            Ok(Command::Help) => false,
            Ok(Command::Reload) => {
                self.reload(sender);
                true
            }
            Ok(Command::Debug) => {
                self.toggle_debug(sender);
                true
            }
            Ok(Command::Count { world }) => {
                if let Some(world) = resolve_world(sender, server, world.as_deref()) {
                    self.count_world(sender, world);
                }
                true
            }
            Ok(Command::List { world, page }) => {
                if let Some(world) = resolve_world(sender, server, world.as_deref()) {
                    self.list(sender, world, page);
                }
                true
            }
            Ok(Command::Tp { world, id }) => {
                if let Some(world) = resolve_world(sender, server, world.as_deref()) {
                    self.teleport(sender, world, id);
                }
                true
            }
            Err(CommandError::InvalidSyntax) => {
                sender.send_message(&CommandError::InvalidSyntax.to_string());
                false
            }
            Err(error) => {
                sender.send_message(&error.to_string());
                true
            }
        }
    }

    fn reload(&mut self, sender: &mut dyn CommandSender) {
        if !sender.has_permission(ADMIN_PERMISSION) {
            sender.send_message("You don't have permission to reload the configuration.");
            return;
        }
        match self.settings.reload() {
            Ok(()) => sender.send_message("EntityControl configuration reloaded."),
            Err(error) => {
                warn!(%error, "settings reload failed");
                sender.send_message(&format!("Unable to reload the configuration: {}", error));
            }
        }
    }

    fn toggle_debug(&mut self, sender: &mut dyn CommandSender) {
        let enabled = !self.settings.get().debug;
        self.settings.get_mut().debug = enabled;
        sender.send_message(if enabled {
            "EntityControl debug logging ENABLED."
        } else {
            "EntityControl debug logging DISABLED."
        });
        if let Err(error) = self.settings.save() {
            warn!(%error, "settings save failed");
        }
    }

    /// Recount every loaded region of `world` and report the totals.
    pub fn count_world(&mut self, sender: &mut dyn CommandSender, world: &dyn GameWorld) {
        let start = Instant::now();
        let regions = world.loaded_regions();
        let counts = self.worlds.entry(world.name().to_string()).or_default();

        self.profiler.time_phase("count", || {
            counts.clear(regions.len());
            for region in &regions {
                counts.count_region(region.coord(), region.entities());
            }
        });

        let summary = counts.summarise();
        sender.send_message(&summary.to_string());
        let elapsed = start.elapsed();
        sender.send_message(&report::counted_line(regions.len(), elapsed));

        info!(
            world = world.name(),
            regions = regions.len(),
            entities = summary.total,
            elapsed_ms = elapsed.as_millis() as u64,
            "counted world"
        );

        self.scan_timer.record(elapsed);
        self.counters.increment("scans", 1);
        self.counters.increment("regions", regions.len() as u64);
        self.counters.increment("entities", summary.total);

        census_metrics::metrics! {
            if self.settings.get().debug {
                let (min_ms, max_ms) = self.scan_timer.range_ms();
                debug!(
                    scans = self.scan_timer.scans(),
                    last_ms = self.scan_timer.last_ms(),
                    average_ms = self.scan_timer.average_ms(),
                    min_ms,
                    max_ms,
                    total_regions = self.counters.get("regions"),
                    total_entities = self.counters.get("entities"),
                    count_runs = self.profiler.runs("count"),
                    count_phase_ms = self.profiler.average_ms("count"),
                    sort_phase_ms = self.profiler.average_ms("sort"),
                    "rebuild metrics"
                );
            }
        }
    }

    fn list(&mut self, sender: &mut dyn CommandSender, world: &dyn GameWorld, page: i64) {
        self.ensure_counted(sender, world);
        self.ensure_sorted(sender, world.name());

        let page_size = self.settings.get().page_size;
        let Some(counts) = self.worlds.get(world.name()) else {
            return;
        };
        match counts.list(page, page_size) {
            Ok(page) => {
                for line in report::page_lines(&page) {
                    sender.send_message(&line);
                }
            }
            Err(error) => sender.send_message(&report::list_error(&error)),
        }
    }

    fn teleport(&mut self, sender: &mut dyn CommandSender, world: &dyn GameWorld, id: i64) {
        self.ensure_counted(sender, world);
        self.ensure_sorted(sender, world.name());

        let Some(counts) = self.worlds.get(world.name()) else {
            return;
        };
        match counts.group(id) {
            Ok(&group) => {
                if let Some(player) = sender.player_mut() {
                    player.teleport(group.location());
                }
                sender.send_message(&report::teleport_line(&group));
            }
            Err(error) => sender.send_message(&report::teleport_error(&error)),
        }
    }

    fn ensure_counted(&mut self, sender: &mut dyn CommandSender, world: &dyn GameWorld) {
        let counted = self
            .worlds
            .get(world.name())
            .is_some_and(WorldCount::has_counts);
        if !counted {
            self.count_world(sender, world);
        }
    }

    /// Build the ranked group list now, if needed, so the sort can be timed.
    fn ensure_sorted(&mut self, sender: &mut dyn CommandSender, world_name: &str) {
        let Some(counts) = self.worlds.get(world_name) else {
            return;
        };
        if counts.is_sorted() {
            return;
        }
        let start = Instant::now();
        let groups = self
            .profiler
            .time_phase("sort", || counts.sorted_groups().len());
        sender.send_message(&report::sorted_line(groups, start.elapsed()));
        self.counters.increment("groups", groups as u64);
    }
}

/// The world named in the command, else the player's world, else the default.
fn resolve_world<'s>(
    sender: &mut dyn CommandSender,
    server: &'s dyn Server,
    name: Option<&str>,
) -> Option<&'s dyn GameWorld> {
    if let Some(name) = name {
        let world = server.world(name);
        if world.is_none() {
            sender.send_message("Invalid world name specified.");
        }
        return world;
    }

    if let Some(player) = sender.player() {
        let id = player.location().world;
        let world = server.world_by_id(id);
        if world.is_none() {
            sender.send_message("The world you are in is not available.");
        }
        return world;
    }

    match server.world(DEFAULT_WORLD) {
        Some(world) => {
            sender.send_message(&format!("Counting in the default world, \"{}\".", DEFAULT_WORLD));
            Some(world)
        }
        None => {
            sender.send_message(&format!(
                "Default world \"{}\" doesn't exist. You must specify a world when running from Console.",
                DEFAULT_WORLD
            ));
            None
        }
    }
}
