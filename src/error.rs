//! Error types for the stat engine.
//!
//! Stat tables themselves never fail: every query over a well-typed table
//! succeeds. Errors only arise at the data boundary, when untyped input
//! (raw stat ids, persisted operations, text values) is turned into typed
//! modifiers.

use crate::stat_id::StatId;
use crate::value::ValueType;
use thiserror::Error;

/// Errors raised while validating untyped stat data.
///
/// # Examples
///
/// ```rust
/// use nightstat::StatError;
///
/// let err = StatError::UnknownStat(14);
/// assert_eq!(err.to_string(), "Unknown stat id: 14");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatError {
    /// A raw numeric id does not name any registered stat.
    #[error("Unknown stat id: {0}")]
    UnknownStat(u32),

    /// An operation's payload type does not match the value type the
    /// registry binds to the target stat.
    #[error("Type mismatch for stat {stat}: expected {expected}, found {found}")]
    TypeMismatch {
        stat: StatId,
        expected: ValueType,
        found: ValueType,
    },

    /// A value could not be parsed from text.
    #[error("Invalid value: {0}")]
    InvalidValue(#[from] ValueParseError),
}

/// Errors raised while parsing a stat value from its text form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueParseError {
    #[error("invalid integer {0:?}")]
    InvalidInt(String),

    #[error("invalid duration {0:?}")]
    InvalidDuration(String),

    #[error("invalid percentage {0:?}")]
    InvalidPercentage(String),

    #[error("invalid range {0:?}")]
    InvalidRange(String),

    /// Range bounds parsed but `low > high`.
    #[error("inverted range {low}-{high}")]
    InvertedRange { low: i32, high: i32 },

    #[error("unknown tag {0:?}")]
    UnknownTag(String),

    /// A tagged entry was not of the form `<value> <Tag>`.
    #[error("malformed tagged entry {0:?}")]
    MalformedEntry(String),

    #[error("duplicate tag {0:?}")]
    DuplicateTag(String),
}
