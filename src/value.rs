//! Stat value types.
//!
//! Small immutable value objects carried by operations and returned by
//! queries. All of them compare structurally and have a compact text form
//! (`"1.5s"`, `"12.5%"`, `"3-5"`, `"5 Fire, 3 Cold"`).

use crate::error::ValueParseError;
use crate::numeric::{compute_grain, fraction_basis_points, NumericValue, BASIS_POINTS_PER_UNIT};
use crate::operation::NumericGroups;
use crate::tag::StatTag;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use strum::Display;

/// The value type a stat is bound to.
///
/// Also identifies the payload type of an [`Operation`](crate::Operation),
/// which is how untyped modifiers are validated against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ValueType {
    Int,
    Duration,
    Percentage,
    IntRange,
    Bool,
    DamageTypeInts,
    DamageTypePercentages,
    DamageTypeRanges,
    SchoolInts,
}

/// A length of time, in whole milliseconds.
///
/// # Examples
///
/// ```rust
/// use nightstat::DurationValue;
///
/// let d: DurationValue = "1.5s".parse().unwrap();
/// assert_eq!(d.as_millis(), 1500);
/// assert_eq!(d.to_string(), "1.5s");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DurationValue {
    millis: i32,
}

impl DurationValue {
    /// Create a duration from whole milliseconds.
    pub const fn from_millis(millis: i32) -> Self {
        Self { millis }
    }

    /// Whole milliseconds.
    pub fn as_millis(self) -> i32 {
        self.millis
    }

    /// Seconds, for display and timers.
    pub fn as_seconds(self) -> f32 {
        self.millis as f32 / 1000.0
    }
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", f64::from(self.millis) / 1000.0)
    }
}

impl FromStr for DurationValue {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let seconds: f64 = s
            .trim()
            .trim_end_matches('s')
            .parse()
            .map_err(|_| ValueParseError::InvalidDuration(s.to_string()))?;
        Ok(Self::from_millis((seconds * 1000.0).round_ties_even() as i32))
    }
}

impl NumericValue for DurationValue {
    fn zero() -> Self {
        Self::default()
    }

    fn compute(groups: &NumericGroups<Self>) -> Self {
        Self::from_millis(compute_grain(groups, |d| d.millis))
    }

    fn parse_value(input: &str) -> Result<Self, ValueParseError> {
        input.parse()
    }
}

/// A percentage expressed in basis points (10000 = 100%).
///
/// # Examples
///
/// ```rust
/// use nightstat::PercentageValue;
///
/// let p = PercentageValue::from_basis_points(1250);
/// assert_eq!(p.to_string(), "12.5%");
/// assert_eq!(p.calculate_fraction(200), 25);
/// assert_eq!("12.5%".parse::<PercentageValue>().unwrap(), p);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PercentageValue {
    basis_points: i32,
}

impl PercentageValue {
    /// Create a percentage from basis points (`100` is 1%).
    pub const fn from_basis_points(basis_points: i32) -> Self {
        Self { basis_points }
    }

    /// Whole percent, e.g. `from_percent(20)` is 2000 bp.
    pub const fn from_percent(percent: i32) -> Self {
        Self {
            basis_points: percent * 100,
        }
    }

    /// The raw basis-point value.
    pub fn basis_points(self) -> i32 {
        self.basis_points
    }

    /// `1.0` for 100%.
    pub fn as_multiplier(self) -> f32 {
        self.basis_points as f32 / BASIS_POINTS_PER_UNIT as f32
    }

    /// This percentage of `input`, rounded half to even.
    pub fn calculate_fraction(self, input: i32) -> i32 {
        fraction_basis_points(input, self.basis_points)
    }

    /// Negative percentages render as reductions.
    pub fn is_negative(self) -> bool {
        self.basis_points < 0
    }
}

impl fmt::Display for PercentageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", f64::from(self.basis_points) / 100.0)
    }
}

impl FromStr for PercentageValue {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let percent: f64 = s
            .trim()
            .trim_end_matches('%')
            .parse()
            .map_err(|_| ValueParseError::InvalidPercentage(s.to_string()))?;
        Ok(Self::from_basis_points(
            (percent * 100.0).round_ties_even() as i32
        ))
    }
}

impl NumericValue for PercentageValue {
    fn zero() -> Self {
        Self::default()
    }

    fn compute(groups: &NumericGroups<Self>) -> Self {
        Self::from_basis_points(compute_grain(groups, |p| p.basis_points))
    }

    fn parse_value(input: &str) -> Result<Self, ValueParseError> {
        input.parse()
    }
}

/// An inclusive integer range, typically a damage roll.
///
/// Reduction treats `low` and `high` as independent grains.
///
/// # Examples
///
/// ```rust
/// use nightstat::IntRangeValue;
///
/// let r: IntRangeValue = "3-5".parse().unwrap();
/// assert_eq!(r, IntRangeValue::new(3, 5));
/// assert!("5-3".parse::<IntRangeValue>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "IntRangeRecord")]
pub struct IntRangeValue {
    pub low: i32,
    pub high: i32,
}

/// Persisted ranges are validated like parsed ones.
#[derive(Deserialize)]
struct IntRangeRecord {
    low: i32,
    high: i32,
}

impl TryFrom<IntRangeRecord> for IntRangeValue {
    type Error = ValueParseError;

    fn try_from(record: IntRangeRecord) -> Result<Self, Self::Error> {
        Self::try_new(record.low, record.high)
    }
}

impl IntRangeValue {
    /// The empty roll, `0-0`.
    pub const ZERO: IntRangeValue = IntRangeValue::new(0, 0);

    /// Create a range without checking bound order.
    ///
    /// Computed ranges may legitimately end up inverted (a negative
    /// multiplier swaps the ends), so only parsing and deserialization enforce
    /// `low <= high`.
    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    /// Create a range, rejecting `low > high`.
    pub fn try_new(low: i32, high: i32) -> Result<Self, ValueParseError> {
        if low > high {
            return Err(ValueParseError::InvertedRange { low, high });
        }
        Ok(Self::new(low, high))
    }
}

impl fmt::Display for IntRangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

impl FromStr for IntRangeValue {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValueParseError::InvalidRange(s.to_string());
        let trimmed = s.trim();
        // Skip a leading sign so "-3-5" splits after the low bound.
        let split = trimmed
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .map(|(i, _)| i)
            .ok_or_else(invalid)?;
        let low = trimmed[..split].trim().parse().map_err(|_| invalid())?;
        let high = trimmed[split + 1..].trim().parse().map_err(|_| invalid())?;
        Self::try_new(low, high)
    }
}

impl NumericValue for IntRangeValue {
    fn zero() -> Self {
        Self::ZERO
    }

    fn compute(groups: &NumericGroups<Self>) -> Self {
        Self::new(
            compute_grain(groups, |r| r.low),
            compute_grain(groups, |r| r.high),
        )
    }

    fn parse_value(input: &str) -> Result<Self, ValueParseError> {
        input.parse()
    }
}

/// One value per tag, for multi-dimensional stats.
///
/// Keys are unique and iterate in tag order. A missing tag means "never
/// mentioned", which is distinct from an explicit zero.
///
/// # Examples
///
/// ```rust
/// use nightstat::{DamageType, TaggedValues};
///
/// let damage = TaggedValues::from([(DamageType::Fire, 5), (DamageType::Cold, 3)]);
/// assert_eq!(damage.get(DamageType::Fire), Some(&5));
/// assert_eq!(damage.get(DamageType::Radiant), None);
/// assert_eq!(damage.to_string(), "5 Fire, 3 Cold");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "T: StatTag, V: Serialize",
    deserialize = "T: StatTag, V: serde::de::DeserializeOwned"
))]
pub struct TaggedValues<T: StatTag, V> {
    values: BTreeMap<T, V>,
}

impl<T: StatTag, V> TaggedValues<T, V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Return a copy with `tag` set to `value`.
    pub fn with(mut self, tag: T, value: V) -> Self {
        self.values.insert(tag, value);
        self
    }

    /// The value for `tag`, or `None` if it is absent.
    pub fn get(&self, tag: T) -> Option<&V> {
        self.values.get(&tag)
    }

    /// True if `tag` has a value.
    pub fn contains(&self, tag: T) -> bool {
        self.values.contains_key(&tag)
    }

    /// Tags with a value, in tag order.
    pub fn tags(&self) -> impl Iterator<Item = T> + '_ {
        self.values.keys().copied()
    }

    /// Iterate `(tag, value)` pairs in tag order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nightstat::{School, TaggedValues};
    ///
    /// let influence = TaggedValues::from([(School::Shadow, 2), (School::Light, 1)]);
    /// let pairs: Vec<_> = influence.iter().collect();
    /// assert_eq!(pairs, vec![(&School::Light, &1), (&School::Shadow, &2)]);
    /// ```
    pub fn iter(&self) -> btree_map::Iter<'_, T, V> {
        self.values.iter()
    }

    /// Number of tags with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T: StatTag, V> Default for TaggedValues<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StatTag, V> FromIterator<(T, V)> for TaggedValues<T, V> {
    fn from_iter<I: IntoIterator<Item = (T, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<T: StatTag, V, const N: usize> From<[(T, V); N]> for TaggedValues<T, V> {
    fn from(entries: [(T, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, T: StatTag, V> IntoIterator for &'a TaggedValues<T, V> {
    type Item = (&'a T, &'a V);
    type IntoIter = btree_map::Iter<'a, T, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T: StatTag, V: fmt::Display> fmt::Display for TaggedValues<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (tag, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", value, tag)?;
        }
        Ok(())
    }
}

impl<T: StatTag, V: NumericValue> FromStr for TaggedValues<T, V> {
    type Err = ValueParseError;

    /// Parse `"<value> <Tag>, <value> <Tag>, ..."`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = BTreeMap::new();
        for entry in s.split(',') {
            let mut parts = entry.split_whitespace();
            let (value, tag) = match (parts.next(), parts.next(), parts.next()) {
                (Some(value), Some(tag), None) => (value, tag),
                _ => return Err(ValueParseError::MalformedEntry(entry.trim().to_string())),
            };
            let value = V::parse_value(value)?;
            let tag: T = tag
                .parse()
                .map_err(|_| ValueParseError::UnknownTag(tag.to_string()))?;
            if values.insert(tag, value).is_some() {
                return Err(ValueParseError::DuplicateTag(tag.to_string()));
            }
        }
        Ok(Self { values })
    }
}
