//! 16x16x16 cell counts
//!
//! A cell counts the entities inside one 16-block cube of a region and keeps,
//! per kind, a running mean location plus a representative location: the
//! location of the counted entity that was closest to the mean when it was
//! seen. Because earlier entities are compared against a mean that is still
//! moving, the representative approximates rather than equals the entity
//! nearest the final mean.

use crate::counts::EntityCounts;
use crate::entity::EntityType;
use crate::group::EntityGroup;
use crate::location::{Location, LocationError};
use tracing::warn;

/// Counts and centre tracking for a single cell.
#[derive(Debug, Clone)]
pub struct CellCount {
    counts: EntityCounts,
    average: [Option<Location>; EntityType::COUNT],
    representative: [Option<Location>; EntityType::COUNT],
}

impl CellCount {
    pub fn new() -> Self {
        Self {
            counts: EntityCounts::new(),
            average: [None; EntityType::COUNT],
            representative: [None; EntityType::COUNT],
        }
    }

    /// Count one entity and fold its location into the centre tracking.
    ///
    /// The count always increments. If the location belongs to a different
    /// world than the kind's earlier entities, the centre update is skipped
    /// and a warning is logged.
    pub fn count_entity(&mut self, kind: EntityType, location: Location) {
        self.counts.add_entity(kind);

        let slot = kind.ordinal();
        match (self.average[slot], self.representative[slot]) {
            (Some(average), Some(representative)) => {
                let count = self.counts.total(kind);
                if let Err(err) = self.fold_location(slot, count, average, representative, location) {
                    warn!(kind = %kind, error = %err, "skipping centre update for entity");
                }
            }
            _ => {
                // First entity of this kind.
                self.average[slot] = Some(location);
                self.representative[slot] = Some(location);
            }
        }
    }

    /// Incremental mean update weighted by the pre-increment count, then swap
    /// the representative when the new entity is strictly closer to the mean.
    fn fold_location(
        &mut self,
        slot: usize,
        count: u32,
        average: Location,
        representative: Location,
        location: Location,
    ) -> Result<(), LocationError> {
        average.ensure_same_world(&location)?;

        let previous = f64::from(count - 1);
        let mean = Location {
            world: average.world,
            position: (average.position * previous + location.position) / f64::from(count),
        };

        let candidate = mean.distance_squared(&location)?;
        let current = mean.distance_squared(&representative)?;

        self.average[slot] = Some(mean);
        if candidate < current {
            self.representative[slot] = Some(location);
        }
        Ok(())
    }

    /// Add this cell's counts into `totals`.
    pub fn add_counts_to(&self, totals: &mut EntityCounts) {
        self.counts.add_to(totals);
    }

    /// Append one group per kind with a non-zero count, in ordinal order.
    pub fn add_entity_groups_to(&self, groups: &mut Vec<EntityGroup>) {
        for (kind, count) in self.counts.iter_nonzero() {
            if let Some(location) = self.representative[kind.ordinal()] {
                groups.push(EntityGroup::new(kind, count, location));
            }
        }
    }

    pub fn total(&self, kind: EntityType) -> u32 {
        self.counts.total(kind)
    }

    pub fn average(&self, kind: EntityType) -> Option<Location> {
        self.average[kind.ordinal()]
    }

    pub fn representative(&self, kind: EntityType) -> Option<Location> {
        self.representative[kind.ordinal()]
    }
}

impl Default for CellCount {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::WorldId;
    use glam::DVec3;

    const OVERWORLD: WorldId = WorldId(0);

    fn at(x: f64, y: f64, z: f64) -> Location {
        Location::new(OVERWORLD, x, y, z)
    }

    #[test]
    fn first_entity_sets_average_and_representative() {
        let mut cell = CellCount::new();
        cell.count_entity(EntityType::Cow, at(10.0, 3.0, 10.0));

        assert_eq!(cell.total(EntityType::Cow), 1);
        assert_eq!(cell.average(EntityType::Cow), Some(at(10.0, 3.0, 10.0)));
        assert_eq!(cell.representative(EntityType::Cow), Some(at(10.0, 3.0, 10.0)));
    }

    #[test]
    fn equidistant_entity_keeps_first_representative() {
        let mut cell = CellCount::new();
        cell.count_entity(EntityType::Cow, at(10.0, 3.0, 10.0));
        cell.count_entity(EntityType::Cow, at(12.0, 5.0, 10.0));

        assert_eq!(cell.total(EntityType::Cow), 2);
        assert_eq!(cell.average(EntityType::Cow), Some(at(11.0, 4.0, 10.0)));
        assert_eq!(cell.representative(EntityType::Cow), Some(at(10.0, 3.0, 10.0)));
    }

    #[test]
    fn closer_entity_replaces_representative() {
        let mut cell = CellCount::new();
        cell.count_entity(EntityType::Zombie, at(0.0, 0.0, 0.0));
        cell.count_entity(EntityType::Zombie, at(8.0, 0.0, 0.0));
        // mean is now (4, 0, 0); (4, 0, 0) lands exactly on the new mean
        cell.count_entity(EntityType::Zombie, at(4.0, 0.0, 0.0));

        assert_eq!(cell.average(EntityType::Zombie), Some(at(4.0, 0.0, 0.0)));
        assert_eq!(cell.representative(EntityType::Zombie), Some(at(4.0, 0.0, 0.0)));
    }

    #[test]
    fn representative_is_always_a_fed_location() {
        let positions = [
            at(1.0, 2.0, 3.0),
            at(7.5, 9.0, 1.25),
            at(3.0, 3.0, 3.0),
            at(15.9, 0.0, 15.9),
            at(4.0, 4.0, 4.0),
            at(2.0, 14.0, 6.0),
        ];
        let mut cell = CellCount::new();
        for &position in &positions {
            cell.count_entity(EntityType::DroppedItem, position);
            let representative = cell.representative(EntityType::DroppedItem).unwrap();
            assert!(positions.contains(&representative));
        }
        assert_eq!(cell.total(EntityType::DroppedItem), positions.len() as u32);

        let expected = positions.iter().map(|p| p.position).sum::<DVec3>() / positions.len() as f64;
        let average = cell.average(EntityType::DroppedItem).unwrap().position;
        assert!(average.distance(expected) < 1e-9);
    }

    #[test]
    fn mixed_world_entity_is_counted_but_not_averaged() {
        let mut cell = CellCount::new();
        cell.count_entity(EntityType::Pig, at(1.0, 1.0, 1.0));
        cell.count_entity(EntityType::Pig, Location::new(WorldId(7), 100.0, 100.0, 100.0));

        assert_eq!(cell.total(EntityType::Pig), 2);
        assert_eq!(cell.average(EntityType::Pig), Some(at(1.0, 1.0, 1.0)));
        assert_eq!(cell.representative(EntityType::Pig), Some(at(1.0, 1.0, 1.0)));
    }

    #[test]
    fn groups_only_for_nonzero_kinds() {
        let mut cell = CellCount::new();
        cell.count_entity(EntityType::Zombie, at(1.0, 1.0, 1.0));
        cell.count_entity(EntityType::Cow, at(2.0, 2.0, 2.0));
        cell.count_entity(EntityType::Cow, at(2.0, 2.0, 2.0));

        let mut groups = Vec::new();
        cell.add_entity_groups_to(&mut groups);

        assert_eq!(
            groups,
            vec![
                EntityGroup::new(EntityType::Zombie, 1, at(1.0, 1.0, 1.0)),
                EntityGroup::new(EntityType::Cow, 2, at(2.0, 2.0, 2.0)),
            ]
        );
    }

    #[test]
    fn add_counts_to_accumulates() {
        let mut cell = CellCount::new();
        cell.count_entity(EntityType::Bat, at(0.0, 0.0, 0.0));

        let mut totals = EntityCounts::new();
        cell.add_counts_to(&mut totals);
        cell.add_counts_to(&mut totals);
        assert_eq!(totals.total(EntityType::Bat), 2);
    }
}
