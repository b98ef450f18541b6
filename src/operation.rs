//! Operations: single contributions to a stat.
//!
//! Numeric stats accept three kinds of operation, reduced in a fixed stage
//! order:
//!
//! 1. **Overwrite** - replaces the base value; the last one recorded wins.
//! 2. **Add** - summed onto the base.
//! 3. **Increase** - percentages summed into one multiplier.
//!
//! Boolean stats only accept `Set`. The [`Operation`] union closes over
//! every (kind, value type) pair a stored modifier can carry.

use crate::sealed::Sealed;
use crate::tag::{DamageType, School, StatTag};
use crate::value::{DurationValue, IntRangeValue, PercentageValue, TaggedValues, ValueType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::Display;

/// The kind of a numeric or tagged operation.
///
/// Variants are declared in reduction order, so `Ord` follows the stage in
/// which each kind is applied.
///
/// # Examples
///
/// ```rust
/// use nightstat::OperationType;
///
/// assert!(OperationType::Overwrite < OperationType::Add);
/// assert!(OperationType::Add < OperationType::Increase);
/// assert_eq!(OperationType::Increase.stage(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum OperationType {
    Overwrite,
    Add,
    Increase,
}

impl OperationType {
    /// Position of this kind in the reduction pipeline.
    pub fn stage(self) -> u8 {
        match self {
            OperationType::Overwrite => 0,
            OperationType::Add => 1,
            OperationType::Increase => 2,
        }
    }
}

/// One contribution to a numeric stat with payload type `V`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericOperation<V> {
    Add(V),
    Increase(PercentageValue),
    Overwrite(V),
}

impl<V> NumericOperation<V> {
    /// The kind of this operation.
    pub fn operation_type(&self) -> OperationType {
        match self {
            NumericOperation::Add(_) => OperationType::Add,
            NumericOperation::Increase(_) => OperationType::Increase,
            NumericOperation::Overwrite(_) => OperationType::Overwrite,
        }
    }
}

/// Numeric operations partitioned by kind, insertion order preserved
/// within each kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericGroups<V> {
    pub overwrites: Vec<V>,
    pub adds: Vec<V>,
    pub increases: Vec<PercentageValue>,
}

impl<V: Copy> NumericGroups<V> {
    /// Create empty groups.
    pub fn new() -> Self {
        Self {
            overwrites: Vec::new(),
            adds: Vec::new(),
            increases: Vec::new(),
        }
    }

    /// Append one operation to the group of its kind.
    pub fn push(&mut self, operation: &NumericOperation<V>) {
        match *operation {
            NumericOperation::Add(value) => self.adds.push(value),
            NumericOperation::Increase(percentage) => self.increases.push(percentage),
            NumericOperation::Overwrite(value) => self.overwrites.push(value),
        }
    }

    /// Partition operations by kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nightstat::{NumericGroups, NumericOperation, PercentageValue};
    ///
    /// let ops = [
    ///     NumericOperation::Add(2),
    ///     NumericOperation::Overwrite(10),
    ///     NumericOperation::Increase(PercentageValue::from_percent(50)),
    ///     NumericOperation::Add(3),
    /// ];
    /// let groups = NumericGroups::from_operations(&ops);
    /// assert_eq!(groups.overwrites, vec![10]);
    /// assert_eq!(groups.adds, vec![2, 3]);
    /// assert_eq!(groups.len(), 4);
    /// ```
    pub fn from_operations<'a, I>(operations: I) -> Self
    where
        I: IntoIterator<Item = &'a NumericOperation<V>>,
        V: 'a,
    {
        let mut groups = Self::new();
        for operation in operations {
            groups.push(operation);
        }
        groups
    }

    /// Total number of operations across all kinds.
    pub fn len(&self) -> usize {
        self.overwrites.len() + self.adds.len() + self.increases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Copy> Default for NumericGroups<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The only operation a boolean stat accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanOperation {
    Set(bool),
}

impl BooleanOperation {
    /// The value this operation sets.
    pub fn value(self) -> bool {
        match self {
            BooleanOperation::Set(value) => value,
        }
    }
}

/// One contribution to a tagged stat: the same three kinds as
/// [`NumericOperation`], with one payload per tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: StatTag, V: Serialize",
    deserialize = "T: StatTag, V: serde::de::DeserializeOwned"
))]
pub enum TaggedNumericOperation<T: StatTag, V> {
    Add(TaggedValues<T, V>),
    Increase(TaggedValues<T, PercentageValue>),
    Overwrite(TaggedValues<T, V>),
}

impl<T: StatTag, V: Copy> TaggedNumericOperation<T, V> {
    /// The kind of this operation.
    pub fn operation_type(&self) -> OperationType {
        match self {
            TaggedNumericOperation::Add(_) => OperationType::Add,
            TaggedNumericOperation::Increase(_) => OperationType::Increase,
            TaggedNumericOperation::Overwrite(_) => OperationType::Overwrite,
        }
    }

    /// Every tag this operation mentions.
    pub fn all_tags(&self) -> BTreeSet<T> {
        match self {
            TaggedNumericOperation::Add(values) | TaggedNumericOperation::Overwrite(values) => {
                values.tags().collect()
            }
            TaggedNumericOperation::Increase(values) => values.tags().collect(),
        }
    }

    /// True if this operation carries a value for `tag`.
    pub fn mentions(&self, tag: T) -> bool {
        match self {
            TaggedNumericOperation::Add(values) | TaggedNumericOperation::Overwrite(values) => {
                values.contains(tag)
            }
            TaggedNumericOperation::Increase(values) => values.contains(tag),
        }
    }

    /// The scalar operation this contributes to `tag`, if it mentions it.
    pub fn as_numeric_operation(&self, tag: T) -> Option<NumericOperation<V>> {
        match self {
            TaggedNumericOperation::Add(values) => {
                values.get(tag).copied().map(NumericOperation::Add)
            }
            TaggedNumericOperation::Increase(values) => {
                values.get(tag).copied().map(NumericOperation::Increase)
            }
            TaggedNumericOperation::Overwrite(values) => {
                values.get(tag).copied().map(NumericOperation::Overwrite)
            }
        }
    }
}

/// Every operation a stored modifier can carry.
///
/// Variant order fixes the persisted discriminant returned by
/// [`Operation::discriminant`]; append new variants, never reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Int(NumericOperation<i32>),
    Duration(NumericOperation<DurationValue>),
    Percentage(NumericOperation<PercentageValue>),
    IntRange(NumericOperation<IntRangeValue>),
    Bool(BooleanOperation),
    DamageTypeInts(TaggedNumericOperation<DamageType, i32>),
    DamageTypePercentages(TaggedNumericOperation<DamageType, PercentageValue>),
    DamageTypeRanges(TaggedNumericOperation<DamageType, IntRangeValue>),
    SchoolInts(TaggedNumericOperation<School, i32>),
}

impl Operation {
    /// Stable numeric discriminant of this variant.
    pub fn discriminant(&self) -> u8 {
        match self {
            Operation::Int(_) => 0,
            Operation::Duration(_) => 1,
            Operation::Percentage(_) => 2,
            Operation::IntRange(_) => 3,
            Operation::Bool(_) => 4,
            Operation::DamageTypeInts(_) => 5,
            Operation::DamageTypePercentages(_) => 6,
            Operation::DamageTypeRanges(_) => 7,
            Operation::SchoolInts(_) => 8,
        }
    }

    /// The payload type, used to validate against the stat registry.
    pub fn value_type(&self) -> ValueType {
        match self {
            Operation::Int(_) => ValueType::Int,
            Operation::Duration(_) => ValueType::Duration,
            Operation::Percentage(_) => ValueType::Percentage,
            Operation::IntRange(_) => ValueType::IntRange,
            Operation::Bool(_) => ValueType::Bool,
            Operation::DamageTypeInts(_) => ValueType::DamageTypeInts,
            Operation::DamageTypePercentages(_) => ValueType::DamageTypePercentages,
            Operation::DamageTypeRanges(_) => ValueType::DamageTypeRanges,
            Operation::SchoolInts(_) => ValueType::SchoolInts,
        }
    }

    /// The kind of this operation, or `None` for boolean sets.
    pub fn operation_type(&self) -> Option<OperationType> {
        match self {
            Operation::Int(op) => Some(op.operation_type()),
            Operation::Duration(op) => Some(op.operation_type()),
            Operation::Percentage(op) => Some(op.operation_type()),
            Operation::IntRange(op) => Some(op.operation_type()),
            Operation::Bool(_) => None,
            Operation::DamageTypeInts(op) => Some(op.operation_type()),
            Operation::DamageTypePercentages(op) => Some(op.operation_type()),
            Operation::DamageTypeRanges(op) => Some(op.operation_type()),
            Operation::SchoolInts(op) => Some(op.operation_type()),
        }
    }
}

/// A typed operation that can be stored in, and recovered from, the
/// [`Operation`] union.
///
/// Sealed: the nine payload types below are the only implementors.
///
/// ```compile_fail
/// use nightstat::{Operation, OperationPayload, ValueType};
///
/// #[derive(Clone)]
/// struct Forged;
///
/// impl OperationPayload for Forged {
///     const VALUE_TYPE: ValueType = ValueType::Int;
///
///     fn into_operation(self) -> Operation {
///         unimplemented!()
///     }
///
///     fn from_operation(_operation: &Operation) -> Option<&Self> {
///         None
///     }
/// }
/// ```
pub trait OperationPayload: Clone + Sized + Sealed + 'static {
    const VALUE_TYPE: ValueType;

    fn into_operation(self) -> Operation;

    fn from_operation(operation: &Operation) -> Option<&Self>;
}

macro_rules! operation_payload {
    ($payload:ty, $variant:ident) => {
        impl Sealed for $payload {}

        impl OperationPayload for $payload {
            const VALUE_TYPE: ValueType = ValueType::$variant;

            fn into_operation(self) -> Operation {
                Operation::$variant(self)
            }

            fn from_operation(operation: &Operation) -> Option<&Self> {
                match operation {
                    Operation::$variant(op) => Some(op),
                    _ => None,
                }
            }
        }

        impl From<$payload> for Operation {
            fn from(op: $payload) -> Self {
                Operation::$variant(op)
            }
        }
    };
}

operation_payload!(NumericOperation<i32>, Int);
operation_payload!(NumericOperation<DurationValue>, Duration);
operation_payload!(NumericOperation<PercentageValue>, Percentage);
operation_payload!(NumericOperation<IntRangeValue>, IntRange);
operation_payload!(BooleanOperation, Bool);
operation_payload!(TaggedNumericOperation<DamageType, i32>, DamageTypeInts);
operation_payload!(
    TaggedNumericOperation<DamageType, PercentageValue>,
    DamageTypePercentages
);
operation_payload!(TaggedNumericOperation<DamageType, IntRangeValue>, DamageTypeRanges);
operation_payload!(TaggedNumericOperation<School, i32>, SchoolInts);
