//! World-tagged positions
//!
//! Positions only compare within a single world; asking for the distance
//! between two worlds is an error rather than a number.

use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Host world identifier.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldId(pub u32);

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "world#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("cannot compare locations in different worlds: {expected} vs {found}")]
    MixedWorlds { expected: WorldId, found: WorldId },
}

/// A position inside one world.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Location {
    pub world: WorldId,
    pub position: DVec3,
}

impl Location {
    pub fn new(world: WorldId, x: f64, y: f64, z: f64) -> Self {
        Self {
            world,
            position: DVec3::new(x, y, z),
        }
    }

    /// Integer block coordinates containing this position.
    pub fn block(&self) -> IVec3 {
        self.position.floor().as_ivec3()
    }

    pub fn block_y(&self) -> i32 {
        self.position.y.floor() as i32
    }

    /// Fails when `other` lives in a different world.
    pub fn ensure_same_world(&self, other: &Location) -> Result<(), LocationError> {
        if self.world == other.world {
            Ok(())
        } else {
            Err(LocationError::MixedWorlds {
                expected: self.world,
                found: other.world,
            })
        }
    }

    /// Squared euclidean distance to `other`.
    pub fn distance_squared(&self, other: &Location) -> Result<f64, LocationError> {
        self.ensure_same_world(other)?;
        Ok(self.position.distance_squared(other.position))
    }
}
