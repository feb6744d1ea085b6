//! Ranked entity groups

use crate::entity::EntityType;
use crate::location::Location;

/// Entities of one kind counted in one cell, with a teleport target.
///
/// Every cell contributes one group per kind it saw; groups of the same kind
/// from different cells are kept apart so the ranking points at a single
/// 16-block cube.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EntityGroup {
    kind: EntityType,
    count: u32,
    location: Location,
}

impl EntityGroup {
    pub fn new(kind: EntityType, count: u32, location: Location) -> Self {
        Self {
            kind,
            count,
            location,
        }
    }

    pub fn kind(&self) -> EntityType {
        self.kind
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Location of one counted entity near the centre of the group.
    pub fn location(&self) -> Location {
        self.location
    }
}
