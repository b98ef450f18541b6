//! # nightstat - Layered, Deterministic Stat Engine
//!
//! Computes the stats of cards, creatures, skills and the player in a
//! tower-defense card game. It provides:
//! - **Typed** stats (every stat id is bound to one value type at compile time)
//! - **Deterministic** reduction (integer math, fixed rounding, fixed order)
//! - **Immutable** tables (inserting returns a new table)
//! - **Layered** lookup (a table delegates to its parent)
//!
//! ## Core Concepts
//!
//! ### Reduction Pipeline
//!
//! Each numeric stat reduces the operations recorded for it in three stages:
//!
//! ```text
//! [Overwrite] → [Add] → [Increase]
//! ```
//!
//! 1. **Overwrite** sets the base (last one wins, default 0)
//! 2. **Add** sums onto the base
//! 3. **Increase** sums percentages into a single multiplier
//!
//! Boolean stats are `true` only when something set them and nothing
//! vetoed them. Tagged stats (damage by type, influence by school) reduce
//! each tag independently.
//!
//! ### Layering
//!
//! A creature's table sits on its card's table, which sits on the player's.
//! Queries walk the chain root first, so every layer sees the operations of
//! the layers beneath it.
//!
//! ## Example
//!
//! ```rust
//! use nightstat::*;
//!
//! let card = StatTable::new()
//!     .insert(registry::HEALTH.overwrite(100))
//!     .insert(registry::HEALTH.add(5));
//!
//! let creature = StatTable::with_parent(&card)
//!     .insert(registry::HEALTH.add(10))
//!     .insert(registry::HEALTH.increase(PercentageValue::from_percent(20)));
//!
//! assert_eq!(creature.get(registry::HEALTH), 138); // (100 + 5 + 10) * 1.2
//! assert_eq!(card.get(registry::HEALTH), 105);
//! ```
//!
//! ## Modules
//!
//! - [`stat_id`] - Stable stat identifiers
//! - [`registry`] - One definition per stat
//! - [`stat`] - Stat definitions and their reduction rules
//! - [`value`] - Value types
//! - [`tag`] - Tag dimensions for tagged stats
//! - [`operation`] - Operations and the operation union
//! - [`modifier`] - Operations bound to a stat
//! - [`table`] - Layered stat tables
//! - [`breakdown`] - Computed values with their contributions
//! - [`numeric`] - Integer reduction and rounding
//! - [`error`] - Error types

pub mod breakdown;
pub mod error;
pub mod modifier;
pub mod numeric;
pub mod operation;
pub mod registry;
pub mod stat;
pub mod stat_id;
pub mod table;
pub mod tag;
pub mod value;

mod sealed {
    /// Restricts `Stat` and `OperationPayload` to the types this crate
    /// defines, so every stat id keeps exactly one operation type.
    pub trait Sealed {}
}

// Re-export main types for convenience
pub use breakdown::{Contribution, StatBreakdown};
pub use error::{StatError, ValueParseError};
pub use modifier::Modifier;
pub use registry::StatDefinition;
pub use stat_id::StatId;
pub use table::StatTable;

// Re-export stat definitions
pub use stat::{
    BoolStat, DurationStat, IntRangeStat, IntStat, NumericStat, PercentageStat, Stat,
    TaggedValuesStat,
};

// Re-export values and operations
pub use numeric::{NumericValue, BASIS_POINTS_PER_UNIT};
pub use operation::{
    BooleanOperation, NumericGroups, NumericOperation, Operation, OperationPayload,
    OperationType, TaggedNumericOperation,
};
pub use tag::{DamageType, School, StatTag};
pub use value::{DurationValue, IntRangeValue, PercentageValue, TaggedValues, ValueType};
