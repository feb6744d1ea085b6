//! Entity Census Core
//!
//! Counts the entities of a world's loaded regions:
//! - Per-type counters
//! - 16-block cell aggregation with representative locations
//! - Region and world roll-ups
//! - Ranked, paged entity groups

pub mod cell;
pub mod counts;
pub mod entity;
pub mod group;
pub mod location;
pub mod region;
pub mod world;

pub use cell::CellCount;
pub use counts::EntityCounts;
pub use entity::{EntitySnapshot, EntityType, UnknownEntityType};
pub use group::EntityGroup;
pub use location::{Location, LocationError, WorldId};
pub use region::{cell_index, RegionCoord, RegionCount, CELLS_PER_REGION, CELL_HEIGHT, REGION_WIDTH};
pub use world::{page_count, GroupPage, QueryError, Summary, WorldCount};

pub use glam;

/// Census version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
