//! The stat registry.
//!
//! One constant definition per [`StatId`], plus the exhaustive mapping from
//! id to definition. The mapping is a `match`, so adding a `StatId` without
//! registering it fails to compile.
//!
//! # Examples
//!
//! ```rust
//! use nightstat::registry::{self, StatDefinition};
//! use nightstat::{StatId, ValueType};
//!
//! assert_eq!(StatId::CritChance.value_type(), ValueType::Percentage);
//! assert!(matches!(StatId::CanCrit.definition(), StatDefinition::Bool(_)));
//! assert_eq!(StatId::Health.definition(), StatDefinition::Int(registry::HEALTH));
//! ```

use crate::stat::{
    BoolStat, DurationStat, IntRangeStat, IntStat, PercentageStat, Stat, TaggedValuesStat,
};
use crate::stat_id::StatId;
use crate::tag::{DamageType, School};
use crate::value::{IntRangeValue, PercentageValue, ValueType};

/// A registered stat definition, tagged by value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatDefinition {
    Int(IntStat),
    Duration(DurationStat),
    Percentage(PercentageStat),
    IntRange(IntRangeStat),
    Bool(BoolStat),
    DamageTypeInts(TaggedValuesStat<DamageType, i32>),
    DamageTypePercentages(TaggedValuesStat<DamageType, PercentageValue>),
    DamageTypeRanges(TaggedValuesStat<DamageType, IntRangeValue>),
    SchoolInts(TaggedValuesStat<School, i32>),
}

impl StatDefinition {
    /// The stat this definition is registered for.
    pub fn id(&self) -> StatId {
        match self {
            StatDefinition::Int(stat) => stat.id(),
            StatDefinition::Duration(stat) => stat.id(),
            StatDefinition::Percentage(stat) => stat.id(),
            StatDefinition::IntRange(stat) => stat.id(),
            StatDefinition::Bool(stat) => stat.id(),
            StatDefinition::DamageTypeInts(stat) => stat.id(),
            StatDefinition::DamageTypePercentages(stat) => stat.id(),
            StatDefinition::DamageTypeRanges(stat) => stat.id(),
            StatDefinition::SchoolInts(stat) => stat.id(),
        }
    }

    /// The value type bound to the stat.
    pub fn value_type(&self) -> ValueType {
        match self {
            StatDefinition::Int(_) => ValueType::Int,
            StatDefinition::Duration(_) => ValueType::Duration,
            StatDefinition::Percentage(_) => ValueType::Percentage,
            StatDefinition::IntRange(_) => ValueType::IntRange,
            StatDefinition::Bool(_) => ValueType::Bool,
            StatDefinition::DamageTypeInts(_) => ValueType::DamageTypeInts,
            StatDefinition::DamageTypePercentages(_) => ValueType::DamageTypePercentages,
            StatDefinition::DamageTypeRanges(_) => ValueType::DamageTypeRanges,
            StatDefinition::SchoolInts(_) => ValueType::SchoolInts,
        }
    }
}

macro_rules! registry {
    ($($konst:ident: $variant:ident($ty:ty) = $id:ident;)*) => {
        $(
            #[doc = concat!("Definition of [`StatId::", stringify!($id), "`].")]
            pub const $konst: $ty = <$ty>::new(StatId::$id);
        )*

        impl StatId {
            /// The definition registered for this stat.
            pub fn definition(self) -> StatDefinition {
                match self {
                    $(StatId::$id => StatDefinition::$variant($konst),)*
                }
            }
        }
    };
}

registry! {
    HEALTH: Int(IntStat) = Health;
    BASE_DAMAGE: DamageTypeRanges(TaggedValuesStat<DamageType, IntRangeValue>) = BaseDamage;
    CREATURE_SPEED: Int(IntStat) = CreatureSpeed;
    CRIT_CHANCE: Percentage(PercentageStat) = CritChance;
    CRIT_MULTIPLIER: Percentage(PercentageStat) = CritMultiplier;
    ACCURACY: Int(IntStat) = Accuracy;
    EVASION: Int(IntStat) = Evasion;
    DAMAGE_RESISTANCE: DamageTypeInts(TaggedValuesStat<DamageType, i32>) = DamageResistance;
    DAMAGE_REDUCTION: DamageTypeInts(TaggedValuesStat<DamageType, i32>) = DamageReduction;
    MELEE_HEALTH_DRAIN_PERCENT: Percentage(PercentageStat) = MeleeHealthDrainPercent;
    HEALTH_GAIN_ON_MELEE_HIT: Int(IntStat) = HealthGainOnMeleeHit;
    SKILL_SPEED_MULTIPLIER: Percentage(PercentageStat) = SkillSpeedMultiplier;
    STUN_DURATION_ON_ENEMIES: Duration(DurationStat) = StunDurationOnEnemies;
    ADDED_STUN_CHANCE: Percentage(PercentageStat) = AddedStunChance;
    MELEE_REFLECT: Int(IntStat) = MeleeReflect;
    HEALTH_REGENERATION_PER_SECOND: Int(IntStat) = HealthRegenerationPerSecond;
    MANA_COST: Int(IntStat) = ManaCost;
    INFLUENCE_COST: SchoolInts(TaggedValuesStat<School, i32>) = InfluenceCost;
    PROJECTILE_SPEED: Int(IntStat) = ProjectileSpeed;
    HITBOX_RADIUS: Int(IntStat) = HitboxRadius;
    STARTING_MANA: Int(IntStat) = StartingMana;
    INFLUENCE: SchoolInts(TaggedValuesStat<School, i32>) = Influence;
    STARTING_HAND_SIZE: Int(IntStat) = StartingHandSize;
    MANA_GAIN: Int(IntStat) = ManaGain;
    CARD_DRAW_INTERVAL: Duration(DurationStat) = CardDrawInterval;
    ENEMY_SPAWN_DELAY: Duration(DurationStat) = EnemySpawnDelay;
    INITIAL_ENEMY_SPAWN_DELAY: Duration(DurationStat) = InitialEnemySpawnDelay;
    ENEMIES_TO_SPAWN: Int(IntStat) = EnemiesToSpawn;
    IS_MANA_CREATURE: Bool(BoolStat) = IsManaCreature;
    GAINED_DAMAGE_ON_KILL: DamageTypeInts(TaggedValuesStat<DamageType, i32>) = GainedDamageOnKill;
    MAX_MELEE_AREA_TARGETS: Int(IntStat) = MaxMeleeAreaTargets;
    PROJECTILE_DAMAGE_MULTIPLIER: Percentage(PercentageStat) = ProjectileDamageMultiplier;
    CHAIN_PROJECTILE_DAMAGE_MULTIPLIER: Percentage(PercentageStat) =
        ChainProjectileDamageMultiplier;
    SKILL_COOLDOWN_RECOVERY: Duration(DurationStat) = SkillCooldownRecovery;
    KNOCKBACK_DURATION: Duration(DurationStat) = KnockbackDuration;
    MANA_GAIN_INTERVAL: Duration(DurationStat) = ManaGainInterval;
    USES_ACCURACY: Bool(BoolStat) = UsesAccuracy;
    CAN_CRIT: Bool(BoolStat) = CanCrit;
    CAN_STUN: Bool(BoolStat) = CanStun;
    IGNORES_DAMAGE_RESISTANCE: Bool(BoolStat) = IgnoresDamageResistance;
    IGNORES_DAMAGE_REDUCTION: Bool(BoolStat) = IgnoresDamageReduction;
    MAXIMUM_DAMAGE_REDUCTION: Percentage(PercentageStat) = MaximumDamageReduction;
    MAXIMUM_DAMAGE_RESISTANCE: Percentage(PercentageStat) = MaximumDamageResistance;
    MAXIMUM_STUN_CHANCE: Percentage(PercentageStat) = MaximumStunChance;
    COOLDOWN: Duration(DurationStat) = Cooldown;
    ADDED_MANA_GAIN: Int(IntStat) = AddedManaGain;
    MELEE_DAMAGE_MULTIPLIER: Percentage(PercentageStat) = MeleeDamageMultiplier;
    PROJECTILE_SEQUENCE_COUNT: Int(IntStat) = ProjectileSequenceCount;
    PROJECTILE_SEQUENCE_DELAY: Duration(DurationStat) = ProjectileSequenceDelay;
    PROJECTILE_ARC_COUNT: Int(IntStat) = ProjectileArcCount;
    PROJECTILE_ARC_ROTATION_OFFSET: Int(IntStat) = ProjectileArcRotationOffset;
    PROJECTILE_ADJACENTS_COUNT: Int(IntStat) = ProjectileAdjacentsCount;
    PROJECTILE_ADJACENTS_OFFSET: Int(IntStat) = ProjectileAdjacentsOffset;
    KNOCKBACK_DISTANCE_MULTIPLIER: Percentage(PercentageStat) = KnockbackDistanceMultiplier;
    PROJECTILE_CHAIN_COUNT: Int(IntStat) = ProjectileChainCount;
    MAX_PROJECTILE_TIMES_CHAINED: Int(IntStat) = MaxProjectileTimesChained;
    UNTARGETED: Bool(BoolStat) = Untargeted;
    SAME_TARGET_ADDED_DAMAGE: DamageTypeRanges(TaggedValuesStat<DamageType, IntRangeValue>) =
        SameTargetAddedDamage;
    CURSE_DURATION: Duration(DurationStat) = CurseDuration;
    GLOBAL_DAMAGE_MULTIPLIER: Percentage(PercentageStat) = GlobalDamageMultiplier;
    SHOCK_CHANCE: Percentage(PercentageStat) = ShockChance;
    SHOCK_DURATION: Duration(DurationStat) = ShockDuration;
    IS_SHOCKED: Bool(BoolStat) = IsShocked;
    RECEIVE_CRITS_CHANCE: Percentage(PercentageStat) = ReceiveCritsChance;
    SHOCK_ADDED_RECEIVE_CRITS_CHANCE: Percentage(PercentageStat) = ShockAddedReceiveCritsChance;
    BUFF_DURATION: Duration(DurationStat) = BuffDuration;
}

impl StatId {
    /// The value type the registry binds to this stat.
    pub fn value_type(self) -> ValueType {
        self.definition().value_type()
    }
}

/// Look up the definition for a raw id known to be registered.
///
/// # Panics
///
/// Panics if `raw` is not a registered stat id. Use
/// [`StatId::from_raw`] for ids that come from data.
pub fn definition_for_raw(raw: u32) -> StatDefinition {
    match StatId::from_raw(raw) {
        Ok(id) => id.definition(),
        Err(err) => panic!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_maps_to_itself() {
        for id in StatId::all() {
            assert_eq!(id.definition().id(), id);
        }
    }

    #[test]
    fn test_value_types() {
        assert_eq!(StatId::BaseDamage.value_type(), ValueType::DamageTypeRanges);
        assert_eq!(StatId::DamageResistance.value_type(), ValueType::DamageTypeInts);
        assert_eq!(StatId::Influence.value_type(), ValueType::SchoolInts);
        assert_eq!(StatId::Cooldown.value_type(), ValueType::Duration);
        assert_eq!(StatId::IsShocked.value_type(), ValueType::Bool);
        assert_eq!(StatId::StartingHandSize.value_type(), ValueType::Int);
    }

    #[test]
    fn test_definition_for_raw() {
        assert_eq!(definition_for_raw(41), StatDefinition::Bool(CAN_CRIT));
    }

    #[test]
    #[should_panic(expected = "Unknown stat id: 16")]
    fn test_definition_for_unregistered_raw_panics() {
        definition_for_raw(16);
    }
}
