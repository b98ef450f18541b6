//! Stat tables.
//!
//! Provides the `StatTable` type, the main entry point for stat
//! computation. A table holds the operations inserted into it, keyed by
//! stat, and an optional parent table whose operations apply first.
//!
//! Tables are immutable values. Inserting returns a new table that shares
//! everything it did not touch with the old one, so a creature can hold its
//! table while its owner keeps building buffed layers on top.

use crate::breakdown::StatBreakdown;
use crate::modifier::Modifier;
use crate::operation::{Operation, OperationPayload};
use crate::stat::Stat;
use crate::stat_id::StatId;
use std::collections::HashMap;
use std::sync::Arc;

/// An immutable, layered collection of modifiers.
///
/// Cloning is cheap: a table is a pointer to shared state.
///
/// # Examples
///
/// ```rust
/// use nightstat::{registry, PercentageValue, StatTable};
///
/// let creature = StatTable::new()
///     .insert(registry::HEALTH.overwrite(100))
///     .insert(registry::HEALTH.add(15));
///
/// let buffed = StatTable::with_parent(&creature)
///     .insert(registry::HEALTH.increase(PercentageValue::from_percent(20)));
///
/// assert_eq!(creature.get(registry::HEALTH), 115);
/// assert_eq!(buffed.get(registry::HEALTH), 138);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatTable {
    inner: Arc<TableNode>,
}

#[derive(Debug, Default)]
struct TableNode {
    parent: Option<StatTable>,
    depth: usize,
    /// Operations per stat, in insertion order.
    modifiers: HashMap<StatId, Arc<Vec<Operation>>>,
}

impl Drop for TableNode {
    // Unlink ancestors one at a time so a long chain cannot exhaust the
    // stack. Stops at the first ancestor another table still holds.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(table) = next {
            next = Arc::into_inner(table.inner).and_then(|mut node| node.parent.take());
        }
    }
}

impl StatTable {
    /// Create an empty root table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table layered on top of `parent`.
    ///
    /// Queries see the parent's operations first, then this table's.
    pub fn with_parent(parent: &StatTable) -> Self {
        Self {
            inner: Arc::new(TableNode {
                parent: Some(parent.clone()),
                depth: parent.depth() + 1,
                modifiers: HashMap::new(),
            }),
        }
    }

    /// Return a new table with `modifier` appended to its stat's list.
    ///
    /// `self` is left unchanged.
    pub fn insert(&self, modifier: Modifier) -> StatTable {
        self.insert_all(std::iter::once(modifier))
    }

    /// Like [`insert`](Self::insert), but `None` returns an unchanged copy.
    pub fn insert_optional(&self, modifier: Option<Modifier>) -> StatTable {
        match modifier {
            Some(modifier) => self.insert(modifier),
            None => self.clone(),
        }
    }

    /// Return a new table with every modifier appended, in order.
    pub fn insert_all<I>(&self, modifiers: I) -> StatTable
    where
        I: IntoIterator<Item = Modifier>,
    {
        let mut buckets = self.inner.modifiers.clone();
        for modifier in modifiers {
            let (stat_id, operation) = modifier.into_parts();
            tracing::trace!(stat = %stat_id, depth = self.depth(), "inserting modifier");
            Arc::make_mut(buckets.entry(stat_id).or_default()).push(operation);
        }

        StatTable {
            inner: Arc::new(TableNode {
                parent: self.inner.parent.clone(),
                depth: self.inner.depth,
                modifiers: buckets,
            }),
        }
    }

    /// Compute the current value of `stat`.
    ///
    /// Operations from every ancestor are applied root first. A stat with no
    /// operations anywhere yields zero, `false`, or an empty tag map.
    ///
    /// # Panics
    ///
    /// Panics if an operation stored for the stat has a different value
    /// type from the stat. Modifiers built through the registry or
    /// [`Modifier::new`] can never cause this.
    pub fn get<S: Stat>(&self, stat: S) -> S::Value {
        let operations = self.modifiers_for(stat.id());
        tracing::trace!(
            stat = %stat.id(),
            depth = self.depth(),
            operations = operations.len(),
            "computing stat"
        );
        stat.compute(operations.into_iter().map(|op| project::<S>(stat.id(), op)))
    }

    /// Compute `stat` along with the operations that produced it.
    pub fn breakdown<S: Stat>(&self, stat: S) -> StatBreakdown<S::Value> {
        let mut breakdown = StatBreakdown::new(stat.id(), self.get(stat));
        for layer in self.layers() {
            if let Some(operations) = layer.inner.modifiers.get(&stat.id()) {
                for operation in operations.iter() {
                    breakdown.add_contribution(layer.depth(), operation.clone());
                }
            }
        }
        breakdown
    }

    /// The table this one is layered on, if any.
    pub fn parent(&self) -> Option<&StatTable> {
        self.inner.parent.as_ref()
    }

    /// Number of ancestors. A root table has depth 0.
    pub fn depth(&self) -> usize {
        self.inner.depth
    }

    /// Operations inserted into this table for `stat_id`, ignoring
    /// ancestors.
    pub fn local_modifiers(&self, stat_id: StatId) -> &[Operation] {
        self.inner
            .modifiers
            .get(&stat_id)
            .map(|ops| ops.as_slice())
            .unwrap_or(&[])
    }

    /// Every operation that applies to `stat_id`, root layer first.
    pub fn modifiers_for(&self, stat_id: StatId) -> Vec<&Operation> {
        self.layers()
            .into_iter()
            .flat_map(|layer| layer.local_modifiers(stat_id))
            .collect()
    }

    /// True when neither this table nor any ancestor holds a modifier.
    pub fn is_empty(&self) -> bool {
        self.layers()
            .iter()
            .all(|layer| layer.inner.modifiers.is_empty())
    }

    /// This table and its ancestors, root first.
    fn layers(&self) -> Vec<&StatTable> {
        let mut layers = Vec::with_capacity(self.depth() + 1);
        let mut current = Some(self);
        while let Some(table) = current {
            layers.push(table);
            current = table.parent();
        }
        layers.reverse();
        layers
    }
}

fn project<S: Stat>(stat_id: StatId, operation: &Operation) -> &S::Operation {
    match <S::Operation as OperationPayload>::from_operation(operation) {
        Some(typed) => typed,
        None => panic!(
            "stored {} operation for stat {stat_id}, which expects {}",
            operation.value_type(),
            <S::Operation as OperationPayload>::VALUE_TYPE,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::NumericOperation;
    use crate::registry;
    use crate::tag::{DamageType, School};
    use crate::value::{DurationValue, IntRangeValue, PercentageValue, TaggedValues};

    #[test]
    fn test_empty_table_defaults() {
        let table = StatTable::new();
        assert!(table.is_empty());
        assert_eq!(table.depth(), 0);
        assert!(table.parent().is_none());
        assert_eq!(table.get(registry::HEALTH), 0);
        assert_eq!(
            table.get(registry::CARD_DRAW_INTERVAL),
            DurationValue::from_millis(0)
        );
        assert!(!table.get(registry::CAN_CRIT));
        assert!(table.get(registry::BASE_DAMAGE).is_empty());
    }

    #[test]
    fn test_insert_leaves_original_untouched() {
        let before = StatTable::new().insert(registry::HEALTH.add(10));
        let after = before.insert(registry::HEALTH.add(5));

        assert_eq!(before.get(registry::HEALTH), 10);
        assert_eq!(after.get(registry::HEALTH), 15);
        assert_eq!(before.local_modifiers(StatId::Health).len(), 1);
        assert_eq!(after.local_modifiers(StatId::Health).len(), 2);
    }

    #[test]
    fn test_child_overwrite_beats_parent() {
        let parent = StatTable::new().insert(registry::CREATURE_SPEED.overwrite(10));
        let child =
            StatTable::with_parent(&parent).insert(registry::CREATURE_SPEED.overwrite(50));

        assert_eq!(child.get(registry::CREATURE_SPEED), 50);
        assert_eq!(parent.get(registry::CREATURE_SPEED), 10);
        assert_eq!(child.depth(), 1);
    }

    #[test]
    fn test_parent_adds_apply_under_child_increase() {
        let parent = StatTable::new()
            .insert(registry::HEALTH.overwrite(100))
            .insert(registry::HEALTH.add(5));
        let child = StatTable::with_parent(&parent)
            .insert(registry::HEALTH.add(10))
            .insert(registry::HEALTH.increase(PercentageValue::from_percent(20)));

        assert_eq!(child.get(registry::HEALTH), 138);
    }

    #[test]
    fn test_insert_keeps_parent() {
        let parent = StatTable::new().insert(registry::STARTING_MANA.add(3));
        let child = StatTable::with_parent(&parent).insert(registry::MANA_GAIN.add(1));
        let grandchild = child.insert(registry::STARTING_MANA.add(2));

        assert_eq!(grandchild.depth(), 1);
        assert_eq!(grandchild.get(registry::STARTING_MANA), 5);
        assert_eq!(grandchild.get(registry::MANA_GAIN), 1);
    }

    #[test]
    fn test_insert_optional() {
        let table = StatTable::new().insert(registry::HEALTH.add(1));
        let same = table.insert_optional(None);
        let more = table.insert_optional(Some(registry::HEALTH.add(1)));

        assert_eq!(same.get(registry::HEALTH), 1);
        assert_eq!(more.get(registry::HEALTH), 2);
    }

    #[test]
    fn test_insert_all_preserves_order() {
        let table = StatTable::new().insert_all([
            registry::HEALTH.overwrite(10),
            registry::HEALTH.overwrite(20),
            registry::DAMAGE_RESISTANCE.add(TaggedValues::from([(DamageType::Fire, 4)])),
        ]);

        assert_eq!(table.get(registry::HEALTH), 20);
        assert_eq!(
            table.local_modifiers(StatId::Health),
            &[
                Operation::Int(NumericOperation::Overwrite(10)),
                Operation::Int(NumericOperation::Overwrite(20)),
            ]
        );
    }

    #[test]
    fn test_modifiers_for_is_root_first() {
        let root = StatTable::new().insert(registry::HEALTH.add(1));
        let middle = StatTable::with_parent(&root).insert(registry::HEALTH.add(2));
        let leaf = StatTable::with_parent(&middle).insert(registry::HEALTH.add(3));

        let adds: Vec<_> = leaf
            .modifiers_for(StatId::Health)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(
            adds,
            vec![
                Operation::Int(NumericOperation::Add(1)),
                Operation::Int(NumericOperation::Add(2)),
                Operation::Int(NumericOperation::Add(3)),
            ]
        );
        assert_eq!(leaf.depth(), 2);
        assert!(leaf.local_modifiers(StatId::CritChance).is_empty());
    }

    #[test]
    fn test_boolean_veto_from_parent() {
        let parent = StatTable::new().insert(registry::CAN_STUN.set(false));
        let child = StatTable::with_parent(&parent).insert(registry::CAN_STUN.set(true));
        assert!(!child.get(registry::CAN_STUN));
    }

    #[test]
    fn test_tagged_layers() {
        let base = TaggedValues::from([(DamageType::Physical, IntRangeValue::new(4, 8))]);
        let bonus = TaggedValues::from([(DamageType::Physical, PercentageValue::from_percent(50))]);
        let parent = StatTable::new().insert(registry::BASE_DAMAGE.overwrite(base));
        let child = StatTable::with_parent(&parent).insert(registry::BASE_DAMAGE.increase(bonus));

        let damage = child.get(registry::BASE_DAMAGE);
        assert_eq!(
            damage.get(DamageType::Physical),
            Some(&IntRangeValue::new(6, 12))
        );
        assert_eq!(damage.len(), 1);
    }

    #[test]
    fn test_school_costs() {
        let cost = TaggedValues::from([(School::Flame, 2), (School::Shadow, 1)]);
        let table = StatTable::new().insert(registry::INFLUENCE_COST.add(cost));
        let cost = table.get(registry::INFLUENCE_COST);
        assert_eq!(cost.get(School::Flame), Some(&2));
        assert_eq!(cost.get(School::Ice), None);
    }

    #[test]
    fn test_breakdown_matches_get() {
        let parent =
            StatTable::new().insert(registry::CRIT_CHANCE.add(PercentageValue::from_percent(5)));
        let child = StatTable::with_parent(&parent)
            .insert(registry::CRIT_CHANCE.increase(PercentageValue::from_percent(100)));

        let breakdown = child.breakdown(registry::CRIT_CHANCE);
        assert_eq!(breakdown.value, child.get(registry::CRIT_CHANCE));
        assert_eq!(breakdown.stat_id, StatId::CritChance);
        assert_eq!(breakdown.at_depth(0).count(), 1);
        assert_eq!(breakdown.at_depth(1).count(), 1);
    }

    #[test]
    fn test_is_empty_sees_ancestors() {
        let parent = StatTable::new().insert(registry::HEALTH.add(1));
        let child = StatTable::with_parent(&parent);
        assert!(!child.is_empty());
        assert!(StatTable::with_parent(&StatTable::new()).is_empty());
    }

    #[test]
    fn test_deep_chain_drops_without_overflow() {
        let root = StatTable::new().insert(registry::HEALTH.add(1));
        let mut table = root.clone();
        for _ in 0..200_000 {
            table = StatTable::with_parent(&table);
        }
        assert_eq!(table.depth(), 200_000);
        assert_eq!(table.get(registry::HEALTH), 1);

        drop(table);
        // Ancestors still held elsewhere survive the unlinking.
        assert_eq!(root.get(registry::HEALTH), 1);
    }

    #[test]
    fn test_dropping_child_keeps_shared_parent() {
        let parent = StatTable::new().insert(registry::HEALTH.add(3));
        let first = StatTable::with_parent(&parent).insert(registry::HEALTH.add(1));
        let second = StatTable::with_parent(&parent);
        drop(first);
        assert_eq!(second.get(registry::HEALTH), 3);
        assert_eq!(second.parent().map(StatTable::depth), Some(0));
    }

    #[test]
    fn test_tables_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StatTable>();
    }

    #[test]
    #[should_panic(expected = "which expects")]
    fn test_mismatched_projection_panics() {
        let table = StatTable::new().insert(registry::HEALTH.add(1));
        // Same stat id, queried through a definition of the wrong type.
        let wrong = crate::stat::BoolStat::new(StatId::Health);
        table.get(wrong);
    }
}
