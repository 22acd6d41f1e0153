//! Identifier types used throughout the planscope crates.
//!
//! The planning API issues integer identifiers, but payloads are not
//! schema-enforced and occasionally carry them as numeric strings. Every id
//! therefore deserializes from either form and always serializes as a number.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw API identifier.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw API identifier.
            #[must_use]
            pub const fn get(&self) -> u64 {
                self.0
            }

            /// Parses an identifier from its decimal string form.
            pub fn parse(s: &str) -> Result<Self, ParseIntError> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserialize_id(deserializer).map(Self)
            }
        }
    };
}

integer_id! {
    /// Identifier of a plan, plan entity or governing entity.
    ///
    /// Plan entities and governing entities share one id space in the API,
    /// which is what lets `parentId` and `support` cross between the lists.
    EntityId
}

integer_id! {
    /// Identifier of an entity or attachment prototype.
    PrototypeId
}

integer_id! {
    /// Identifier of an attachment record.
    AttachmentId
}
