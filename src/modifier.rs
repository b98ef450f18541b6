//! Modifiers: operations bound to the stat they target.

use crate::error::StatError;
use crate::operation::Operation;
use crate::stat_id::StatId;
use serde::{Deserialize, Serialize};

/// A stored `(StatId, Operation)` pair.
///
/// Modifiers built through a stat definition (`registry::HEALTH.add(5)`) are
/// well-typed by construction. Modifiers assembled from untyped parts go
/// through [`Modifier::new`], which checks the operation against the
/// registry; deserialization runs the same check.
///
/// # Examples
///
/// ```rust
/// use nightstat::{BooleanOperation, Modifier, NumericOperation, Operation, StatId};
///
/// let ok = Modifier::new(StatId::Health, Operation::Int(NumericOperation::Add(5)));
/// assert!(ok.is_ok());
///
/// let wrong = Modifier::new(StatId::Health, Operation::Bool(BooleanOperation::Set(true)));
/// assert!(wrong.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ModifierRecord")]
pub struct Modifier {
    stat_id: StatId,
    operation: Operation,
}

impl Modifier {
    /// Create a modifier from untyped parts, validating the operation's
    /// value type against the stat registry.
    pub fn new(stat_id: StatId, operation: Operation) -> Result<Self, StatError> {
        let expected = stat_id.value_type();
        let found = operation.value_type();
        if expected != found {
            tracing::debug!(
                stat = %stat_id,
                %expected,
                %found,
                "rejected modifier with mismatched value type"
            );
            return Err(StatError::TypeMismatch {
                stat: stat_id,
                expected,
                found,
            });
        }
        Ok(Self::typed(stat_id, operation))
    }

    /// Build a modifier whose type is already guaranteed by a stat
    /// definition.
    pub(crate) fn typed(stat_id: StatId, operation: Operation) -> Self {
        debug_assert_eq!(stat_id.value_type(), operation.value_type());
        Self { stat_id, operation }
    }

    /// The stat this modifier targets.
    pub fn stat_id(&self) -> StatId {
        self.stat_id
    }

    /// The operation applied to the stat.
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Split into the target stat and the operation.
    pub fn into_parts(self) -> (StatId, Operation) {
        (self.stat_id, self.operation)
    }
}

#[derive(Deserialize)]
struct ModifierRecord {
    stat_id: StatId,
    operation: Operation,
}

impl TryFrom<ModifierRecord> for Modifier {
    type Error = StatError;

    fn try_from(record: ModifierRecord) -> Result<Self, Self::Error> {
        Modifier::new(record.stat_id, record.operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{NumericOperation, TaggedNumericOperation};
    use crate::registry;
    use crate::tag::School;
    use crate::value::{DurationValue, TaggedValues, ValueType};

    #[test]
    fn test_typed_constructors_match_registry() {
        let m = registry::CARD_DRAW_INTERVAL.overwrite(DurationValue::from_millis(4000));
        assert_eq!(m.stat_id(), StatId::CardDrawInterval);
        assert_eq!(m.operation().value_type(), ValueType::Duration);
    }

    #[test]
    fn test_new_rejects_mismatch() {
        let err = Modifier::new(
            StatId::Influence,
            Operation::Int(NumericOperation::Add(1)),
        )
        .unwrap_err();
        assert_eq!(
            err,
            StatError::TypeMismatch {
                stat: StatId::Influence,
                expected: ValueType::SchoolInts,
                found: ValueType::Int,
            }
        );
    }

    #[test]
    fn test_new_accepts_tagged() {
        let op = Operation::SchoolInts(TaggedNumericOperation::Add(TaggedValues::from([(
            School::Flame,
            2,
        )])));
        let m = Modifier::new(StatId::InfluenceCost, op.clone()).unwrap();
        assert_eq!(m.into_parts(), (StatId::InfluenceCost, op));
    }
}
