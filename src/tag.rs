//! Tag dimensions for multi-dimensional stats.
//!
//! A tagged stat (damage-by-type, influence-by-school) stores one value per
//! tag. Each dimension is a closed enum implementing [`StatTag`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// A closed set of tags that keys a tagged stat.
///
/// Tags are totally ordered so tagged values iterate deterministically.
pub trait StatTag:
    Copy
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Display
    + FromStr
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Every tag in this dimension, in declaration order.
    fn all_tags() -> Vec<Self>;
}

/// Damage types.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
)]
pub enum DamageType {
    Untyped,
    Radiant,
    Lightning,
    Fire,
    Cold,
    Physical,
    Necrotic,
}

impl StatTag for DamageType {
    fn all_tags() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Schools of magic. Cards cost influence in one or more schools.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
)]
pub enum School {
    Light,
    Sky,
    Flame,
    Ice,
    Earth,
    Shadow,
}

impl StatTag for School {
    fn all_tags() -> Vec<Self> {
        Self::iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names_parse() {
        assert_eq!("Fire".parse::<DamageType>().unwrap(), DamageType::Fire);
        assert_eq!("Shadow".parse::<School>().unwrap(), School::Shadow);
        assert!("Arcane".parse::<School>().is_err());
    }

    #[test]
    fn test_all_tags() {
        assert_eq!(DamageType::all_tags().len(), DamageType::COUNT);
        assert_eq!(School::all_tags().first(), Some(&School::Light));
    }
}
