// counts.rs - Per-type entity counters
//
// One slot per EntityType ordinal. Counters only grow between clears and
// are summed into an accumulator to build world totals.

use crate::entity::EntityType;

/// Entity counts indexed by `EntityType::ordinal()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCounts {
    counts: [u32; EntityType::COUNT],
}

impl EntityCounts {
    pub fn new() -> Self {
        Self {
            counts: [0; EntityType::COUNT],
        }
    }

    /// Reset every count to zero.
    pub fn clear(&mut self) {
        self.counts.fill(0);
    }

    /// Count one entity of `kind`.
    #[inline]
    pub fn add_entity(&mut self, kind: EntityType) {
        self.counts[kind.ordinal()] += 1;
    }

    #[inline]
    pub fn total(&self, kind: EntityType) -> u32 {
        self.counts[kind.ordinal()]
    }

    /// Add every count in `self` into `accumulator`.
    pub fn add_to(&self, accumulator: &mut EntityCounts) {
        for (sum, count) in accumulator.counts.iter_mut().zip(self.counts.iter()) {
            *sum += *count;
        }
    }

    /// Sum over all kinds.
    pub fn grand_total(&self) -> u64 {
        self.counts.iter().map(|&count| u64::from(count)).sum()
    }

    /// Kinds with a non-zero count, in ordinal order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (EntityType, u32)> + '_ {
        EntityType::ALL
            .iter()
            .zip(self.counts.iter())
            .filter(|(_, count)| **count != 0)
            .map(|(&kind, &count)| (kind, count))
    }
}

impl Default for EntityCounts {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_of(kinds: &[EntityType]) -> EntityCounts {
        let mut counts = EntityCounts::new();
        for &kind in kinds {
            counts.add_entity(kind);
        }
        counts
    }

    #[test]
    fn counts_every_entity_fed() {
        let counts = counts_of(&[EntityType::Cow, EntityType::Cow, EntityType::Zombie]);
        assert_eq!(counts.total(EntityType::Cow), 2);
        assert_eq!(counts.total(EntityType::Zombie), 1);
        assert_eq!(counts.total(EntityType::Pig), 0);
        assert_eq!(counts.grand_total(), 3);
    }

    #[test]
    fn clear_zeroes_every_kind() {
        let mut counts = counts_of(&[EntityType::Cow, EntityType::DroppedItem]);
        counts.clear();
        for &kind in EntityType::ALL {
            assert_eq!(counts.total(kind), 0);
        }
        assert_eq!(counts.iter_nonzero().count(), 0);
    }

    #[test]
    fn add_to_is_order_independent() {
        let a = counts_of(&[EntityType::Cow, EntityType::Cow, EntityType::Bat]);
        let b = counts_of(&[EntityType::Cow, EntityType::Zombie]);

        let mut ab = EntityCounts::new();
        a.add_to(&mut ab);
        b.add_to(&mut ab);

        let mut ba = EntityCounts::new();
        b.add_to(&mut ba);
        a.add_to(&mut ba);

        assert_eq!(ab, ba);
        assert_eq!(ab.total(EntityType::Cow), 3);
        assert_eq!(ab.grand_total(), 5);
    }

    #[test]
    fn add_to_is_associative() {
        let a = counts_of(&[EntityType::Sheep]);
        let b = counts_of(&[EntityType::Sheep, EntityType::Wolf]);
        let c = counts_of(&[EntityType::Wolf, EntityType::Arrow]);

        // (a + b) + c
        let mut left = EntityCounts::new();
        let mut ab = EntityCounts::new();
        a.add_to(&mut ab);
        b.add_to(&mut ab);
        ab.add_to(&mut left);
        c.add_to(&mut left);

        // a + (b + c)
        let mut right = EntityCounts::new();
        let mut bc = EntityCounts::new();
        b.add_to(&mut bc);
        c.add_to(&mut bc);
        a.add_to(&mut right);
        bc.add_to(&mut right);

        assert_eq!(left, right);
    }

    #[test]
    fn iter_nonzero_follows_ordinal_order() {
        let counts = counts_of(&[EntityType::Zombie, EntityType::DroppedItem, EntityType::Zombie]);
        let pairs: Vec<_> = counts.iter_nonzero().collect();
        assert_eq!(
            pairs,
            vec![(EntityType::DroppedItem, 1), (EntityType::Zombie, 2)]
        );
    }
}
