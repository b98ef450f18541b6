//! Stat definitions.
//!
//! A definition binds a [`StatId`] to a value type and a reduction rule, and
//! is the only way to build a well-typed [`Modifier`] for that stat. The
//! constructors available on each definition type mirror what its value type
//! supports: boolean stats have `set` and nothing else.
//!
//! Definitions are created once, as constants in the
//! [`registry`](crate::registry).

use crate::modifier::Modifier;
use crate::numeric::NumericValue;
use crate::operation::{
    BooleanOperation, NumericGroups, NumericOperation, OperationPayload, TaggedNumericOperation,
};
use crate::sealed::Sealed;
use crate::stat_id::StatId;
use crate::tag::StatTag;
use crate::value::{DurationValue, IntRangeValue, PercentageValue, TaggedValues, ValueType};
use std::collections::BTreeSet;
use std::marker::PhantomData;

/// Trait implemented by every stat definition.
///
/// Ties the stat to the operation type it accepts and the value its
/// reduction produces. [`StatTable::get`](crate::StatTable::get) is generic
/// over this trait.
///
/// The trait is sealed. Only the definitions in this crate implement it, so
/// a stat id can never be paired with a foreign operation type:
///
/// ```compile_fail
/// use nightstat::{BooleanOperation, Stat, StatId};
///
/// #[derive(Clone, Copy)]
/// struct FakeHealth;
///
/// impl Stat for FakeHealth {
///     type Operation = BooleanOperation;
///     type Value = bool;
///
///     fn id(&self) -> StatId {
///         StatId::Health
///     }
///
///     fn compute<'a, I>(&self, _operations: I) -> bool
///     where
///         I: IntoIterator<Item = &'a BooleanOperation>,
///         BooleanOperation: 'a,
///     {
///         true
///     }
/// }
/// ```
pub trait Stat: Copy + Sealed {
    /// The typed operation stored for this stat.
    type Operation: OperationPayload;

    /// The reduced value.
    type Value;

    fn id(&self) -> StatId;

    /// Reduce operations, given in insertion order, to the current value.
    fn compute<'a, I>(&self, operations: I) -> Self::Value
    where
        I: IntoIterator<Item = &'a Self::Operation>,
        Self::Operation: 'a;

    fn value_type(&self) -> ValueType {
        Self::Operation::VALUE_TYPE
    }

    /// Wrap a typed operation for this stat in a modifier.
    fn modifier(&self, operation: Self::Operation) -> Modifier {
        Modifier::typed(self.id(), operation.into_operation())
    }
}

/// A stat whose value is a single numeric payload of type `V`.
///
/// # Examples
///
/// ```rust
/// use nightstat::{registry, PercentageValue, StatTable};
///
/// let table = StatTable::new()
///     .insert(registry::HEALTH.overwrite(100))
///     .insert(registry::HEALTH.add(5))
///     .insert(registry::HEALTH.add(10))
///     .insert(registry::HEALTH.increase(PercentageValue::from_percent(20)));
///
/// assert_eq!(table.get(registry::HEALTH), 138);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericStat<V> {
    id: StatId,
    _value: PhantomData<fn() -> V>,
}

/// A stat holding a plain integer.
pub type IntStat = NumericStat<i32>;
/// A stat holding a duration in milliseconds.
pub type DurationStat = NumericStat<DurationValue>;
/// A stat holding a percentage in basis points.
pub type PercentageStat = NumericStat<PercentageValue>;
/// A stat holding an inclusive integer range.
pub type IntRangeStat = NumericStat<IntRangeValue>;

impl<V> NumericStat<V> {
    pub(crate) const fn new(id: StatId) -> Self {
        Self {
            id,
            _value: PhantomData,
        }
    }
}

impl<V> Sealed for NumericStat<V> {}

impl<V: NumericValue> NumericStat<V> {
    /// Reduce operations that have already been partitioned by kind.
    pub fn compute_groups(&self, groups: &NumericGroups<V>) -> V {
        V::compute(groups)
    }
}

impl<V: NumericValue> NumericStat<V>
where
    NumericOperation<V>: OperationPayload,
{
    /// Add `value` to the base.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nightstat::{registry, StatTable};
    ///
    /// let table = StatTable::new()
    ///     .insert(registry::STARTING_MANA.add(3))
    ///     .insert(registry::STARTING_MANA.add(4));
    /// assert_eq!(table.get(registry::STARTING_MANA), 7);
    /// ```
    pub fn add(self, value: V) -> Modifier {
        self.modifier(NumericOperation::Add(value))
    }

    /// Scale the value by `percentage`.
    ///
    /// All increases on a stat are summed before they multiply, so two 50%
    /// increases double the value.
    pub fn increase(self, percentage: PercentageValue) -> Modifier {
        self.modifier(NumericOperation::Increase(percentage))
    }

    /// Replace the base value. The last overwrite wins; adds and increases
    /// still apply on top.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nightstat::{registry, StatTable};
    ///
    /// let table = StatTable::new()
    ///     .insert(registry::CREATURE_SPEED.add(1))
    ///     .insert(registry::CREATURE_SPEED.overwrite(10))
    ///     .insert(registry::CREATURE_SPEED.overwrite(40));
    /// assert_eq!(table.get(registry::CREATURE_SPEED), 41);
    /// ```
    pub fn overwrite(self, value: V) -> Modifier {
        self.modifier(NumericOperation::Overwrite(value))
    }
}

impl<V: NumericValue> Stat for NumericStat<V>
where
    NumericOperation<V>: OperationPayload,
{
    type Operation = NumericOperation<V>;
    type Value = V;

    fn id(&self) -> StatId {
        self.id
    }

    fn compute<'a, I>(&self, operations: I) -> V
    where
        I: IntoIterator<Item = &'a NumericOperation<V>>,
        NumericOperation<V>: 'a,
    {
        self.compute_groups(&NumericGroups::from_operations(operations))
    }
}

/// A stat that is either on or off.
///
/// The value is `true` only if something set it to `true` and nothing set it
/// to `false`. A single `set(false)` anywhere in the table chain disables the
/// stat, regardless of insertion order.
///
/// # Examples
///
/// ```rust
/// use nightstat::{registry, StatTable};
///
/// let base = StatTable::new().insert(registry::CAN_CRIT.set(true));
/// assert!(base.get(registry::CAN_CRIT));
///
/// let silenced = StatTable::with_parent(&base).insert(registry::CAN_CRIT.set(false));
/// assert!(!silenced.get(registry::CAN_CRIT));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoolStat {
    id: StatId,
}

impl BoolStat {
    pub(crate) const fn new(id: StatId) -> Self {
        Self { id }
    }

    /// Turn the stat on or off. Any `set(false)` in the chain wins.
    pub fn set(self, value: bool) -> Modifier {
        self.modifier(BooleanOperation::Set(value))
    }
}

impl Sealed for BoolStat {}

impl Stat for BoolStat {
    type Operation = BooleanOperation;
    type Value = bool;

    fn id(&self) -> StatId {
        self.id
    }

    fn compute<'a, I>(&self, operations: I) -> bool
    where
        I: IntoIterator<Item = &'a BooleanOperation>,
        BooleanOperation: 'a,
    {
        let mut any_true = false;
        for operation in operations {
            if !operation.value() {
                return false;
            }
            any_true = true;
        }
        any_true
    }
}

/// A stat with one independent numeric value per tag.
///
/// Each tag is reduced on its own, using only the operations that mention
/// it. Tags that no operation mentions are absent from the result, and an
/// overwrite only resets the tags it names.
///
/// # Examples
///
/// ```rust
/// use nightstat::{registry, DamageType, StatTable, TaggedValues};
///
/// let creature = StatTable::new()
///     .insert(registry::GAINED_DAMAGE_ON_KILL.add(TaggedValues::from([(DamageType::Fire, 5)])));
/// let affix = StatTable::with_parent(&creature)
///     .insert(registry::GAINED_DAMAGE_ON_KILL.add(TaggedValues::from([(DamageType::Cold, 3)])));
///
/// let gained = affix.get(registry::GAINED_DAMAGE_ON_KILL);
/// assert_eq!(gained.get(DamageType::Fire), Some(&5));
/// assert_eq!(gained.get(DamageType::Cold), Some(&3));
/// assert_eq!(gained.get(DamageType::Radiant), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaggedValuesStat<T, V> {
    id: StatId,
    child: NumericStat<V>,
    _tag: PhantomData<fn() -> T>,
}

impl<T, V> TaggedValuesStat<T, V> {
    pub(crate) const fn new(id: StatId) -> Self {
        Self {
            id,
            child: NumericStat::new(id),
            _tag: PhantomData,
        }
    }
}

impl<T: StatTag, V: NumericValue> TaggedValuesStat<T, V>
where
    TaggedNumericOperation<T, V>: OperationPayload,
{
    /// Add a value to each named tag.
    pub fn add(self, values: TaggedValues<T, V>) -> Modifier {
        self.modifier(TaggedNumericOperation::Add(values))
    }

    /// Increase each named tag by its percentage. Other tags are unaffected.
    pub fn increase(self, percentages: TaggedValues<T, PercentageValue>) -> Modifier {
        self.modifier(TaggedNumericOperation::Increase(percentages))
    }

    /// Replace the base of each named tag. Other tags keep their values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nightstat::{registry, DamageType, StatTable, TaggedValues};
    ///
    /// let table = StatTable::new()
    ///     .insert(registry::DAMAGE_RESISTANCE.add(TaggedValues::from([
    ///         (DamageType::Fire, 5),
    ///         (DamageType::Cold, 5),
    ///     ])))
    ///     .insert(registry::DAMAGE_RESISTANCE.overwrite(TaggedValues::from([(
    ///         DamageType::Fire,
    ///         20,
    ///     )])));
    ///
    /// let resistance = table.get(registry::DAMAGE_RESISTANCE);
    /// assert_eq!(resistance.get(DamageType::Fire), Some(&25));
    /// assert_eq!(resistance.get(DamageType::Cold), Some(&5));
    /// ```
    pub fn overwrite(self, values: TaggedValues<T, V>) -> Modifier {
        self.modifier(TaggedNumericOperation::Overwrite(values))
    }
}

impl<T, V> Sealed for TaggedValuesStat<T, V> {}

impl<T: StatTag, V: NumericValue> Stat for TaggedValuesStat<T, V>
where
    TaggedNumericOperation<T, V>: OperationPayload,
{
    type Operation = TaggedNumericOperation<T, V>;
    type Value = TaggedValues<T, V>;

    fn id(&self) -> StatId {
        self.id
    }

    fn compute<'a, I>(&self, operations: I) -> TaggedValues<T, V>
    where
        I: IntoIterator<Item = &'a TaggedNumericOperation<T, V>>,
        TaggedNumericOperation<T, V>: 'a,
    {
        let operations: Vec<&TaggedNumericOperation<T, V>> = operations.into_iter().collect();
        let tags: BTreeSet<T> = operations.iter().flat_map(|op| op.all_tags()).collect();

        tags.into_iter()
            .map(|tag| {
                let mut groups = NumericGroups::new();
                for op in &operations {
                    if let Some(scalar) = op.as_numeric_operation(tag) {
                        groups.push(&scalar);
                    }
                }
                (tag, self.child.compute_groups(&groups))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::DamageType;

    const SPEED: IntStat = NumericStat::new(StatId::CreatureSpeed);
    const CAN_STUN: BoolStat = BoolStat::new(StatId::CanStun);
    const DAMAGE: TaggedValuesStat<DamageType, IntRangeValue> =
        TaggedValuesStat::new(StatId::BaseDamage);

    #[test]
    fn test_bool_compute() {
        let set = BooleanOperation::Set;
        assert!(!CAN_STUN.compute(&[]));
        assert!(CAN_STUN.compute(&[set(true), set(true)]));
        assert!(!CAN_STUN.compute(&[set(true), set(false)]));
        assert!(!CAN_STUN.compute(&[set(false), set(true)]));
        assert!(!CAN_STUN.compute(&[set(false)]));
    }

    #[test]
    fn test_overwrite_last_wins() {
        let ops = [
            NumericOperation::Overwrite(10),
            NumericOperation::Overwrite(999),
            NumericOperation::Overwrite(40),
        ];
        assert_eq!(SPEED.compute(&ops), 40);
    }

    #[test]
    fn test_additive_associativity() {
        let split = [NumericOperation::Add(3), NumericOperation::Add(4)];
        let joined = [NumericOperation::Add(7)];
        assert_eq!(SPEED.compute(&split), SPEED.compute(&joined));
    }

    #[test]
    fn test_range_grains_are_independent() {
        let range: IntRangeStat = NumericStat::new(StatId::BaseDamage);
        let ops = [
            NumericOperation::Overwrite(IntRangeValue::new(10, 20)),
            NumericOperation::Add(IntRangeValue::new(1, 5)),
            NumericOperation::Increase(PercentageValue::from_percent(10)),
        ];
        // low 11 * 1.1 = 12.1, high 25 * 1.1 = 27.5 → 28
        assert_eq!(range.compute(&ops), IntRangeValue::new(12, 28));
    }

    #[test]
    fn test_percentage_stat_can_be_increased() {
        let crit: PercentageStat = NumericStat::new(StatId::CritChance);
        let ops = [
            NumericOperation::Add(PercentageValue::from_percent(5)),
            NumericOperation::Increase(PercentageValue::from_percent(50)),
        ];
        assert_eq!(crit.compute(&ops), PercentageValue::from_basis_points(750));
    }

    #[test]
    fn test_tagged_overwrite_keeps_other_tags() {
        let ops = [
            TaggedNumericOperation::Add(TaggedValues::from([
                (DamageType::Fire, IntRangeValue::new(1, 2)),
                (DamageType::Cold, IntRangeValue::new(3, 4)),
            ])),
            TaggedNumericOperation::Overwrite(TaggedValues::from([(
                DamageType::Fire,
                IntRangeValue::new(10, 10),
            )])),
        ];
        let result = DAMAGE.compute(&ops);
        assert_eq!(result.get(DamageType::Fire), Some(&IntRangeValue::new(11, 12)));
        assert_eq!(result.get(DamageType::Cold), Some(&IntRangeValue::new(3, 4)));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_tagged_increase_alone_yields_zero_entry() {
        let ops = [TaggedNumericOperation::Increase(TaggedValues::from([(
            DamageType::Lightning,
            PercentageValue::from_percent(30),
        )]))];
        let result = DAMAGE.compute(&ops);
        assert_eq!(result.get(DamageType::Lightning), Some(&IntRangeValue::ZERO));
    }

    #[test]
    fn test_value_type() {
        assert_eq!(SPEED.value_type(), ValueType::Int);
        assert_eq!(CAN_STUN.value_type(), ValueType::Bool);
        assert_eq!(DAMAGE.value_type(), ValueType::DamageTypeRanges);
    }
}
