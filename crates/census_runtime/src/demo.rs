//! Generated demo worlds
//!
//! Used when no snapshot is given: a few mob farms and item piles scattered
//! over a square of loaded regions, the same layout for the same seed.

use census_core::{EntityType, REGION_WIDTH};
use census_services::MemoryServer;

/// Deterministic pseudo-random numbers (32-bit LCG)
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        const A: u64 = 1664525;
        const C: u64 = 1013904223;
        const M: u64 = 1u64 << 32;

        self.state = (A.wrapping_mul(self.state).wrapping_add(C)) % M;
        self.state as u32
    }

    /// Uniform in `0.0..1.0`
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Uniform in `low..high`
    pub fn range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u32() as usize % items.len()]
    }
}

const AMBIENT: &[EntityType] = &[
    EntityType::Cow,
    EntityType::Pig,
    EntityType::Sheep,
    EntityType::Chicken,
    EntityType::Zombie,
    EntityType::Skeleton,
    EntityType::Creeper,
    EntityType::Spider,
    EntityType::Bat,
    EntityType::Squid,
];

const HOTSPOTS: &[EntityType] = &[
    EntityType::DroppedItem,
    EntityType::Chicken,
    EntityType::Cow,
    EntityType::ExperienceOrb,
    EntityType::Villager,
];

/// Build a server with a single "world" of `radius` regions around spawn.
///
/// `radius` is expected to be small (the CLI caps it at 64).
pub fn demo_server(seed: u64, radius: i32) -> MemoryServer {
    let mut rng = DeterministicRng::new(seed);
    let mut server = MemoryServer::new();
    let world = server.add_world("world");
    let width = f64::from(REGION_WIDTH);
    let extent = f64::from(radius) * width;

    // Scattered mobs, a few per region.
    let regions = (2 * radius + 1).pow(2);
    for _ in 0..regions * 4 {
        let kind = *rng.pick(AMBIENT);
        let x = rng.range(-extent, extent + width);
        let z = rng.range(-extent, extent + width);
        let y = rng.range(40.0, 90.0);
        world.spawn(kind, x, y, z);
    }

    // Dense clusters that should top the ranking.
    for _ in 0..radius.max(1) * 2 {
        let kind = *rng.pick(HOTSPOTS);
        let centre_x = rng.range(-extent, extent);
        let centre_z = rng.range(-extent, extent);
        let centre_y = rng.range(50.0, 80.0);
        let size = 20 + rng.next_u32() % 150;
        for _ in 0..size {
            world.spawn(
                kind,
                centre_x + rng.range(-3.0, 3.0),
                centre_y + rng.range(0.0, 2.0),
                centre_z + rng.range(-3.0, 3.0),
            );
        }
    }

    server
}

#[cfg(test)]
mod tests {
    use super::*;
    use census_services::Server;

    #[test]
    fn same_seed_same_world() {
        let first = demo_server(7, 2);
        let second = demo_server(7, 2);
        assert_eq!(
            first.worlds()[0].entity_count(),
            second.worlds()[0].entity_count()
        );
        assert!(first.world("world").is_some());
    }

    #[test]
    fn rng_stays_in_range() {
        let mut rng = DeterministicRng::new(1);
        for _ in 0..1000 {
            let value = rng.range(-5.0, 5.0);
            assert!((-5.0..5.0).contains(&value));
        }
    }
}
