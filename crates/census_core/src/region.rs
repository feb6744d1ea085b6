//! Per-region counts
//!
//! A region is one loaded chunk column. Its entities are split into
//! vertically stacked 16-block cells, lowest altitude first.

use crate::cell::CellCount;
use crate::entity::EntitySnapshot;
use serde::{Deserialize, Serialize};

/// Height of one cell in blocks.
pub const CELL_HEIGHT: i32 = 16;

/// Number of cells stacked in a region.
pub const CELLS_PER_REGION: usize = 16;

/// Width and depth of a region in blocks.
pub const REGION_WIDTH: i32 = 16;

/// Horizontal region coordinate (in regions, not blocks).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionCoord {
    pub x: i32,
    pub z: i32,
}

impl RegionCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Region containing the given block column.
    pub const fn from_block(block_x: i32, block_z: i32) -> Self {
        Self {
            x: block_x.div_euclid(REGION_WIDTH),
            z: block_z.div_euclid(REGION_WIDTH),
        }
    }
}

/// Cell index for a block Y coordinate.
///
/// Entities below the bottom cell land in cell 0 and entities above the top
/// cell land in the last cell.
#[inline]
pub fn cell_index(block_y: i32) -> usize {
    block_y
        .div_euclid(CELL_HEIGHT)
        .clamp(0, CELLS_PER_REGION as i32 - 1) as usize
}

/// Entity counts for one region, built once from a snapshot.
#[derive(Debug, Clone)]
pub struct RegionCount {
    coord: RegionCoord,
    cells: [Option<Box<CellCount>>; CELLS_PER_REGION],
}

impl RegionCount {
    /// An empty region with no cells allocated.
    pub fn new(coord: RegionCoord) -> Self {
        Self {
            coord,
            cells: std::array::from_fn(|_| None),
        }
    }

    /// Count every entity in the snapshot, routing each to its cell.
    pub fn from_entities<I>(coord: RegionCoord, entities: I) -> Self
    where
        I: IntoIterator<Item = EntitySnapshot>,
    {
        let mut region = Self::new(coord);
        for entity in entities {
            let index = cell_index(entity.location.block_y());
            region.box_mut(index).count_entity(entity.kind, entity.location);
        }
        region
    }

    pub fn coord(&self) -> RegionCoord {
        self.coord
    }

    /// True if at least one entity was routed to cell `index`.
    pub fn has_box(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(Some(_)))
    }

    /// Cell at `index`, created on first access.
    ///
    /// # Panics
    /// Panics if `index >= CELLS_PER_REGION`.
    pub fn box_mut(&mut self, index: usize) -> &mut CellCount {
        self.cells[index].get_or_insert_with(Box::default)
    }

    /// Cell at `index` without allocating.
    pub fn cell(&self, index: usize) -> Option<&CellCount> {
        self.cells.get(index).and_then(|cell| cell.as_deref())
    }

    /// Existing cells, bottom to top.
    pub fn cells(&self) -> impl Iterator<Item = (usize, &CellCount)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.as_deref().map(|cell| (index, cell)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityType;
    use crate::location::{Location, WorldId};

    fn entity(kind: EntityType, x: f64, y: f64, z: f64) -> EntitySnapshot {
        EntitySnapshot::new(kind, Location::new(WorldId(0), x, y, z))
    }

    #[test]
    fn cell_index_uses_floor_division() {
        assert_eq!(cell_index(0), 0);
        assert_eq!(cell_index(15), 0);
        assert_eq!(cell_index(16), 1);
        assert_eq!(cell_index(255), 15);
    }

    #[test]
    fn cell_index_clamps_out_of_range_heights() {
        assert_eq!(cell_index(-1), 0);
        assert_eq!(cell_index(-64), 0);
        assert_eq!(cell_index(256), 15);
        assert_eq!(cell_index(319), 15);
    }

    #[test]
    fn region_coord_from_negative_blocks() {
        assert_eq!(RegionCoord::from_block(-1, 16), RegionCoord::new(-1, 1));
        assert_eq!(RegionCoord::from_block(15, -16), RegionCoord::new(0, -1));
    }

    #[test]
    fn entities_route_to_matching_cells() {
        let region = RegionCount::from_entities(
            RegionCoord::new(0, 0),
            vec![
                entity(EntityType::Cow, 1.0, 3.0, 1.0),
                entity(EntityType::Cow, 2.0, 15.9, 2.0),
                entity(EntityType::Bat, 3.0, 40.0, 3.0),
            ],
        );

        assert!(region.has_box(0));
        assert!(!region.has_box(1));
        assert!(region.has_box(2));
        assert_eq!(region.cell(0).map(|c| c.total(EntityType::Cow)), Some(2));
        assert_eq!(region.cell(2).map(|c| c.total(EntityType::Bat)), Some(1));
        assert!(region.cell(1).is_none());
    }

    #[test]
    fn cells_iteration_does_not_allocate() {
        let region = RegionCount::from_entities(
            RegionCoord::new(2, -3),
            vec![entity(EntityType::Squid, 40.0, 62.0, -40.0)],
        );

        let indices: Vec<usize> = region.cells().map(|(index, _)| index).collect();
        assert_eq!(indices, vec![3]);
        for index in 0..CELLS_PER_REGION {
            assert_eq!(region.has_box(index), index == 3);
        }
        assert!(!region.has_box(CELLS_PER_REGION));
        assert_eq!(region.coord(), RegionCoord::new(2, -3));
    }

    #[test]
    fn box_mut_creates_on_demand() {
        let mut region = RegionCount::new(RegionCoord::default());
        assert!(!region.has_box(5));
        region.box_mut(5);
        assert!(region.has_box(5));
        assert_eq!(region.cells().count(), 1);
    }
}
