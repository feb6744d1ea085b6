//! Entity kinds and per-entity snapshots
//!
//! The host exposes a closed set of entity kinds. Each kind has a dense
//! ordinal so counters can be plain arrays indexed by `kind.ordinal()`.

use crate::location::Location;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Declares the `EntityType` enum together with its ordinal table and names.
///
/// Names must be the upper snake case form of the variant so that the serde
/// representation and `name()` agree.
macro_rules! entity_types {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Kind of a spawned entity.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum EntityType {
            $($variant),+
        }

        impl EntityType {
            /// Every kind, in ordinal order.
            pub const ALL: &'static [EntityType] = &[$(EntityType::$variant),+];

            /// Display name used in reports, e.g. `DROPPED_ITEM`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(EntityType::$variant => $name),+
                }
            }
        }
    };
}

entity_types! {
    DroppedItem => "DROPPED_ITEM",
    ExperienceOrb => "EXPERIENCE_ORB",
    AreaEffectCloud => "AREA_EFFECT_CLOUD",
    LeashHitch => "LEASH_HITCH",
    Painting => "PAINTING",
    ItemFrame => "ITEM_FRAME",
    ArmorStand => "ARMOR_STAND",
    Arrow => "ARROW",
    SpectralArrow => "SPECTRAL_ARROW",
    Snowball => "SNOWBALL",
    Egg => "EGG",
    Fireball => "FIREBALL",
    SmallFireball => "SMALL_FIREBALL",
    DragonFireball => "DRAGON_FIREBALL",
    WitherSkull => "WITHER_SKULL",
    EnderPearl => "ENDER_PEARL",
    EnderSignal => "ENDER_SIGNAL",
    SplashPotion => "SPLASH_POTION",
    ThrownExpBottle => "THROWN_EXP_BOTTLE",
    ShulkerBullet => "SHULKER_BULLET",
    LlamaSpit => "LLAMA_SPIT",
    EvokerFangs => "EVOKER_FANGS",
    PrimedTnt => "PRIMED_TNT",
    FallingBlock => "FALLING_BLOCK",
    Firework => "FIREWORK",
    EnderCrystal => "ENDER_CRYSTAL",
    Boat => "BOAT",
    Minecart => "MINECART",
    MinecartChest => "MINECART_CHEST",
    MinecartFurnace => "MINECART_FURNACE",
    MinecartTnt => "MINECART_TNT",
    MinecartHopper => "MINECART_HOPPER",
    MinecartMobSpawner => "MINECART_MOB_SPAWNER",
    MinecartCommand => "MINECART_COMMAND",
    Creeper => "CREEPER",
    Skeleton => "SKELETON",
    WitherSkeleton => "WITHER_SKELETON",
    Stray => "STRAY",
    Spider => "SPIDER",
    CaveSpider => "CAVE_SPIDER",
    Giant => "GIANT",
    Zombie => "ZOMBIE",
    Husk => "HUSK",
    ZombieVillager => "ZOMBIE_VILLAGER",
    PigZombie => "PIG_ZOMBIE",
    Slime => "SLIME",
    MagmaCube => "MAGMA_CUBE",
    Ghast => "GHAST",
    Blaze => "BLAZE",
    Enderman => "ENDERMAN",
    Endermite => "ENDERMITE",
    Silverfish => "SILVERFISH",
    Witch => "WITCH",
    Guardian => "GUARDIAN",
    ElderGuardian => "ELDER_GUARDIAN",
    Shulker => "SHULKER",
    Evoker => "EVOKER",
    Vex => "VEX",
    Vindicator => "VINDICATOR",
    Illusioner => "ILLUSIONER",
    EnderDragon => "ENDER_DRAGON",
    Wither => "WITHER",
    Bat => "BAT",
    Pig => "PIG",
    Sheep => "SHEEP",
    Cow => "COW",
    MushroomCow => "MUSHROOM_COW",
    Chicken => "CHICKEN",
    Squid => "SQUID",
    Wolf => "WOLF",
    Ocelot => "OCELOT",
    Parrot => "PARROT",
    Rabbit => "RABBIT",
    PolarBear => "POLAR_BEAR",
    Horse => "HORSE",
    Donkey => "DONKEY",
    Mule => "MULE",
    SkeletonHorse => "SKELETON_HORSE",
    ZombieHorse => "ZOMBIE_HORSE",
    Llama => "LLAMA",
    Snowman => "SNOWMAN",
    IronGolem => "IRON_GOLEM",
    Villager => "VILLAGER",
    Player => "PLAYER",
    Unknown => "UNKNOWN",
}

impl EntityType {
    /// Number of entity kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index in `0..COUNT`.
    #[inline]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Look up a kind by ordinal.
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity type '{0}'")]
pub struct UnknownEntityType(pub String);

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    /// Case-insensitive match against `name()`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEntityType(s.to_string()))
    }
}

/// One entity as seen at scan time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EntitySnapshot {
    pub kind: EntityType,
    pub location: Location,
}

impl EntitySnapshot {
    pub fn new(kind: EntityType, location: Location) -> Self {
        Self { kind, location }
    }
}
