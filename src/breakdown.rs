//! Stat breakdowns.
//!
//! Contains the `StatBreakdown` type: a computed stat value together with
//! every operation that fed into it, for debugging and tooltips.

use crate::operation::Operation;
use crate::stat_id::StatId;
use serde::{Deserialize, Serialize};

/// One operation that contributed to a computed stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Depth of the table layer the operation was inserted into. The root
    /// table is depth 0.
    pub depth: usize,

    pub operation: Operation,
}

/// A computed stat value with full breakdown information.
///
/// Contributions are listed root layer first, insertion order within each
/// layer, which is exactly the order the reduction saw them in.
///
/// # Examples
///
/// ```rust
/// use nightstat::{registry, StatTable};
///
/// let base = StatTable::new().insert(registry::HEALTH.add(100));
/// let buffed = StatTable::with_parent(&base).insert(registry::HEALTH.add(20));
///
/// let breakdown = buffed.breakdown(registry::HEALTH);
/// assert_eq!(breakdown.value, 120);
/// assert_eq!(breakdown.contributions.len(), 2);
/// assert_eq!(breakdown.contributions[0].depth, 0);
/// assert_eq!(breakdown.contributions[1].depth, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBreakdown<V> {
    pub stat_id: StatId,

    /// The reduced value, identical to what `StatTable::get` returns.
    pub value: V,

    pub contributions: Vec<Contribution>,
}

impl<V> StatBreakdown<V> {
    /// Create a breakdown with no contributions yet.
    pub fn new(stat_id: StatId, value: V) -> Self {
        Self {
            stat_id,
            value,
            contributions: Vec::new(),
        }
    }

    /// Record an operation inserted at the layer at `depth`.
    ///
    /// Called by [`StatTable::breakdown`](crate::StatTable::breakdown) in
    /// reduction order.
    pub fn add_contribution(&mut self, depth: usize, operation: Operation) {
        self.contributions.push(Contribution { depth, operation });
    }

    /// Contributions inserted at a single layer.
    pub fn at_depth(&self, depth: usize) -> impl Iterator<Item = &Operation> + '_ {
        self.contributions
            .iter()
            .filter(move |c| c.depth == depth)
            .map(|c| &c.operation)
    }
}
