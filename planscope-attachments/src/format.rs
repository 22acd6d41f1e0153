//! Presentation descriptors for data point values.
//!
//! Locale-aware rendering belongs to the UI layer; these descriptors carry
//! the number plus the formatting decision so every renderer agrees.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormattedValue {
    /// Value passed through untouched.
    Raw { value: Option<f64> },
    /// A ratio to be shown as a percentage.
    Percent { ratio: Option<f64>, decimals: u8 },
    Currency { value: Option<f64> },
    /// A plain amount, rounded when `decimals` is set.
    Amount {
        amount: Option<f64>,
        decimals: Option<u8>,
    },
    /// Formatting chosen from the attachment's unit type.
    Autoformat {
        value: Option<f64>,
        unit_type: String,
    },
}

impl FormattedValue {
    /// The number carried by the descriptor, whatever its formatting.
    #[must_use]
    pub fn number(&self) -> Option<f64> {
        match self {
            Self::Raw { value }
            | Self::Currency { value }
            | Self::Autoformat { value, .. } => *value,
            Self::Percent { ratio, .. } => *ratio,
            Self::Amount { amount, .. } => *amount,
        }
    }
}
