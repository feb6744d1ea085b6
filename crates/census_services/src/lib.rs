//! Entity Census Services Layer
//!
//! Host abstraction, settings and the `/ec` command surface over census_core.

pub mod command;
pub mod controller;
pub mod host;
pub mod memory;
pub mod report;
pub mod settings;

pub use command::{Command, CommandError, USAGE};
pub use controller::EntityControl;
pub use host::{CommandSender, GameWorld, LoadedRegion, Player, Server, ADMIN_PERMISSION, DEFAULT_WORLD};
pub use memory::{MemoryPlayer, MemoryRegion, MemoryServer, MemoryWorld, RecordingSender};
pub use settings::{Settings, SettingsError, SettingsStore};
