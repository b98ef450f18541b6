//! Stat identifier module.
//!
//! Provides the `StatId` type, a closed enumeration of every gameplay
//! attribute. The numeric ids are stable: they are what persisted modifier
//! lists store, so existing values must never be renumbered.

use crate::error::StatError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, FromRepr, IntoEnumIterator};

/// Identifier for one named gameplay attribute.
///
/// Every `StatId` is bound by the [`registry`](crate::registry) to exactly one
/// stat definition, and therefore to exactly one value type.
///
/// # Examples
///
/// ```rust
/// use nightstat::StatId;
///
/// assert_eq!(StatId::Health.raw(), 1);
/// assert_eq!(StatId::from_raw(4).unwrap(), StatId::CritChance);
/// assert!(StatId::from_raw(14).is_err());
///
/// let parsed: StatId = "CanCrit".parse().unwrap();
/// assert_eq!(parsed, StatId::CanCrit);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    FromRepr,
    AsRefStr,
)]
#[repr(u32)]
pub enum StatId {
    Health = 1,
    BaseDamage = 2,
    CreatureSpeed = 3,
    CritChance = 4,
    CritMultiplier = 5,
    Accuracy = 6,
    Evasion = 7,
    DamageResistance = 8,
    DamageReduction = 9,
    MeleeHealthDrainPercent = 10,
    HealthGainOnMeleeHit = 11,
    SkillSpeedMultiplier = 12,
    StunDurationOnEnemies = 13,
    AddedStunChance = 15,
    MeleeReflect = 17,
    HealthRegenerationPerSecond = 18,
    ManaCost = 19,
    InfluenceCost = 20,
    ProjectileSpeed = 21,
    HitboxRadius = 22,
    StartingMana = 24,
    Influence = 25,
    StartingHandSize = 26,
    ManaGain = 27,
    CardDrawInterval = 28,
    EnemySpawnDelay = 29,
    InitialEnemySpawnDelay = 30,
    EnemiesToSpawn = 31,
    IsManaCreature = 32,
    GainedDamageOnKill = 33,
    MaxMeleeAreaTargets = 34,
    ProjectileDamageMultiplier = 35,
    ChainProjectileDamageMultiplier = 36,
    SkillCooldownRecovery = 37,
    KnockbackDuration = 38,
    ManaGainInterval = 39,
    UsesAccuracy = 40,
    CanCrit = 41,
    CanStun = 42,
    IgnoresDamageResistance = 43,
    IgnoresDamageReduction = 44,
    MaximumDamageReduction = 45,
    MaximumDamageResistance = 46,
    MaximumStunChance = 47,
    Cooldown = 48,
    AddedManaGain = 49,
    MeleeDamageMultiplier = 50,
    ProjectileSequenceCount = 51,
    ProjectileSequenceDelay = 52,
    ProjectileArcCount = 53,
    ProjectileArcRotationOffset = 54,
    ProjectileAdjacentsCount = 55,
    ProjectileAdjacentsOffset = 56,
    KnockbackDistanceMultiplier = 57,
    ProjectileChainCount = 58,
    MaxProjectileTimesChained = 59,
    Untargeted = 60,
    SameTargetAddedDamage = 61,
    CurseDuration = 62,
    GlobalDamageMultiplier = 63,
    ShockChance = 64,
    ShockDuration = 65,
    IsShocked = 66,
    ReceiveCritsChance = 67,
    ShockAddedReceiveCritsChance = 68,
    BuffDuration = 69,
}

impl StatId {
    /// Get the stable numeric id of this stat.
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Resolve a stable numeric id.
    ///
    /// Ids come from persisted data, so an unknown id is a data error rather
    /// than a programming error.
    pub fn from_raw(raw: u32) -> Result<Self, StatError> {
        Self::from_repr(raw).ok_or(StatError::UnknownStat(raw))
    }

    /// Iterate every registered stat in id order.
    pub fn all() -> impl Iterator<Item = StatId> {
        Self::iter()
    }
}

impl Serialize for StatId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StatId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u32::deserialize(deserializer)?;
        StatId::from_raw(raw).map_err(serde::de::Error::custom)
    }
}
