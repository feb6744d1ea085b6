//! Host server abstraction
//!
//! The census never talks to a game server directly. Whatever embeds it
//! implements these traits over its own world, chunk and player types.

use census_core::{EntitySnapshot, Location, RegionCoord, WorldId};

/// Name of the world used when the console does not name one.
pub const DEFAULT_WORLD: &str = "world";

/// Permission required for `/ec reload`.
pub const ADMIN_PERMISSION: &str = "EntityControl.admin";

/// Lookup of worlds by name.
pub trait Server {
    fn world(&self, name: &str) -> Option<&dyn GameWorld>;

    /// World holding locations tagged with `id`.
    fn world_by_id(&self, id: WorldId) -> Option<&dyn GameWorld>;
}

/// One world and its currently loaded regions.
pub trait GameWorld {
    fn name(&self) -> &str;

    fn id(&self) -> WorldId;

    /// Regions loaded right now, in the host's enumeration order.
    fn loaded_regions(&self) -> Vec<&dyn LoadedRegion>;
}

/// A loaded region (chunk column) that can enumerate its entities.
pub trait LoadedRegion {
    fn coord(&self) -> RegionCoord;

    /// Every entity currently inside the region.
    fn entities(&self) -> Box<dyn Iterator<Item = EntitySnapshot> + '_>;
}

/// Whoever issued a command: the console or a player.
pub trait CommandSender {
    fn send_message(&mut self, message: &str);

    fn has_permission(&self, permission: &str) -> bool;

    fn player(&self) -> Option<&dyn Player>;

    fn player_mut(&mut self) -> Option<&mut dyn Player>;
}

/// In-game capabilities of a player sender.
pub trait Player {
    /// Current location; its world is the world the player stands in.
    fn location(&self) -> Location;

    fn teleport(&mut self, location: Location);
}
