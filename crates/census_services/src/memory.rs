// memory.rs - In-memory host implementation
//
// Backs the census binary and the command tests. Worlds can be built in code
// with `spawn` or loaded from a JSON snapshot:
//
// {
//   "worlds": [
//     { "name": "world",
//       "entities": [ { "type": "COW", "x": 10.5, "y": 64.0, "z": -3.2 } ] }
//   ]
// }
//
// Every region that holds an entity counts as loaded, plus any listed under
// "loaded_regions".

use crate::host::{CommandSender, GameWorld, LoadedRegion, Player, Server};
use census_core::{EntitySnapshot, EntityType, Location, RegionCoord, WorldId};
use serde::Deserialize;
use std::collections::BTreeMap;

/// A loaded region holding a fixed list of entities.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegion {
    coord: RegionCoord,
    entities: Vec<EntitySnapshot>,
}

impl MemoryRegion {
    pub fn new(coord: RegionCoord) -> Self {
        Self {
            coord,
            entities: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl LoadedRegion for MemoryRegion {
    fn coord(&self) -> RegionCoord {
        self.coord
    }

    fn entities(&self) -> Box<dyn Iterator<Item = EntitySnapshot> + '_> {
        Box::new(self.entities.iter().copied())
    }
}

/// A world whose loaded regions are kept in coordinate order.
#[derive(Debug, Clone)]
pub struct MemoryWorld {
    id: WorldId,
    name: String,
    regions: BTreeMap<(i32, i32), MemoryRegion>,
}

impl MemoryWorld {
    pub fn new(id: WorldId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            regions: BTreeMap::new(),
        }
    }

    /// Mark a region as loaded even if it holds no entities.
    pub fn load_region(&mut self, coord: RegionCoord) -> &mut MemoryRegion {
        self.regions
            .entry((coord.x, coord.z))
            .or_insert_with(|| MemoryRegion::new(coord))
    }

    /// Place an entity, loading the region that contains it.
    pub fn spawn(&mut self, kind: EntityType, x: f64, y: f64, z: f64) -> Location {
        let location = Location::new(self.id, x, y, z);
        let block = location.block();
        let coord = RegionCoord::from_block(block.x, block.z);
        self.load_region(coord)
            .entities
            .push(EntitySnapshot::new(kind, location));
        location
    }

    pub fn entity_count(&self) -> usize {
        self.regions.values().map(MemoryRegion::len).sum()
    }
}

impl GameWorld for MemoryWorld {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> WorldId {
        self.id
    }

    fn loaded_regions(&self) -> Vec<&dyn LoadedRegion> {
        self.regions
            .values()
            .map(|region| region as &dyn LoadedRegion)
            .collect()
    }
}

/// A server holding any number of in-memory worlds.
#[derive(Debug, Clone, Default)]
pub struct MemoryServer {
    worlds: Vec<MemoryWorld>,
}

impl MemoryServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty world, or return the existing one with that name.
    pub fn add_world(&mut self, name: &str) -> &mut MemoryWorld {
        let index = match self.worlds.iter().position(|world| world.name == name) {
            Some(index) => index,
            None => {
                let id = WorldId(self.worlds.len() as u32);
                self.worlds.push(MemoryWorld::new(id, name));
                self.worlds.len() - 1
            }
        };
        &mut self.worlds[index]
    }

    pub fn world_mut(&mut self, name: &str) -> Option<&mut MemoryWorld> {
        self.worlds.iter_mut().find(|world| world.name == name)
    }

    pub fn worlds(&self) -> &[MemoryWorld] {
        &self.worlds
    }

    /// Build a server from a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let snapshot: ServerSnapshot = serde_json::from_str(json)?;
        let mut server = Self::new();
        for world_snapshot in snapshot.worlds {
            let world = server.add_world(&world_snapshot.name);
            for coord in world_snapshot.loaded_regions {
                world.load_region(coord);
            }
            for entity in world_snapshot.entities {
                world.spawn(entity.kind, entity.x, entity.y, entity.z);
            }
        }
        Ok(server)
    }
}

impl Server for MemoryServer {
    fn world(&self, name: &str) -> Option<&dyn GameWorld> {
        self.worlds
            .iter()
            .find(|world| world.name == name)
            .map(|world| world as &dyn GameWorld)
    }

    fn world_by_id(&self, id: WorldId) -> Option<&dyn GameWorld> {
        self.worlds
            .iter()
            .find(|world| world.id == id)
            .map(|world| world as &dyn GameWorld)
    }
}

#[derive(Debug, Deserialize)]
struct ServerSnapshot {
    worlds: Vec<WorldSnapshot>,
}

#[derive(Debug, Deserialize)]
struct WorldSnapshot {
    name: String,
    #[serde(default)]
    loaded_regions: Vec<RegionCoord>,
    #[serde(default)]
    entities: Vec<EntityRecord>,
}

#[derive(Debug, Deserialize)]
struct EntityRecord {
    #[serde(rename = "type")]
    kind: EntityType,
    x: f64,
    y: f64,
    z: f64,
}

/// A player standing somewhere in one of the server's worlds.
#[derive(Debug, Clone)]
pub struct MemoryPlayer {
    location: Location,
}

impl MemoryPlayer {
    pub fn new(location: Location) -> Self {
        Self { location }
    }
}

impl Player for MemoryPlayer {
    fn location(&self) -> Location {
        self.location
    }

    fn teleport(&mut self, location: Location) {
        self.location = location;
    }
}

/// A sender that records every message it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingSender {
    messages: Vec<String>,
    permissions: Vec<String>,
    player: Option<MemoryPlayer>,
}

impl RecordingSender {
    /// The server console: no player, every permission.
    pub fn console() -> Self {
        Self {
            permissions: vec!["*".to_string()],
            ..Self::default()
        }
    }

    /// A player without any permissions.
    pub fn for_player(player: MemoryPlayer) -> Self {
        Self {
            player: Some(player),
            ..Self::default()
        }
    }

    pub fn with_permission(mut self, permission: &str) -> Self {
        self.permissions.push(permission.to_string());
        self
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Return and forget the recorded messages.
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    pub fn player_state(&self) -> Option<&MemoryPlayer> {
        self.player.as_ref()
    }
}

impl CommandSender for RecordingSender {
    fn send_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|granted| granted == "*" || granted == permission)
    }

    fn player(&self) -> Option<&dyn Player> {
        self.player.as_ref().map(|player| player as &dyn Player)
    }

    fn player_mut(&mut self) -> Option<&mut dyn Player> {
        self.player.as_mut().map(|player| player as &mut dyn Player)
    }
}
