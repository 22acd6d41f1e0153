//! Declarative data point configuration and evaluation.
//!
//! Editors store data point definitions as loose strings
//! ([`DataPointSpec`]). They are parsed once into [`DataPointConfig`], whose
//! closed enums make every processing, calculation and formatting mode an
//! exhaustive match. Evaluation of a parsed config cannot fail.

use crate::{DataAttachment, DataPointError, DataPointResult, FormattedValue};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Data point definition as stored by the host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPointSpec {
    pub processing: String,
    #[serde(default)]
    pub data_points: Vec<DataPointRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<String>,
    pub formatting: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
}

/// Position of a value in a data attachment's `values`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPointRef {
    #[serde(deserialize_with = "index")]
    pub index: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Number(usize),
    Text(String),
}

fn index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    match RawIndex::deserialize(deserializer)? {
        RawIndex::Number(n) => Ok(n),
        RawIndex::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calculation {
    Addition,
    /// Spelled as the stored configuration spells it.
    Substraction,
    Division,
    Percentage,
}

impl FromStr for Calculation {
    type Err = DataPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "addition" => Ok(Self::Addition),
            "substraction" => Ok(Self::Substraction),
            "division" => Ok(Self::Division),
            "percentage" => Ok(Self::Percentage),
            _ => Err(DataPointError::InvalidCalculationType(s.to_string())),
        }
    }
}

impl Calculation {
    /// Applies the calculation to two positional values.
    ///
    /// Addition and subtraction read one absent operand as 0 and are absent
    /// only when both are. Division and percentage are absent when the
    /// divisor is absent or 0; an absent numerator reads as 0.
    #[must_use]
    pub fn apply(self, v1: Option<f64>, v2: Option<f64>) -> Option<f64> {
        match self {
            Self::Addition | Self::Substraction => {
                if v1.is_none() && v2.is_none() {
                    return None;
                }
                let (a, b) = (v1.unwrap_or(0.0), v2.unwrap_or(0.0));
                Some(if self == Self::Addition { a + b } else { a - b })
            }
            Self::Division => match v1 {
                Some(divisor) if divisor != 0.0 => Some(v2.unwrap_or(0.0) / divisor),
                _ => None,
            },
            Self::Percentage => match v2 {
                Some(total) if total != 0.0 => Some(1.0 / total * v1.unwrap_or(0.0)),
                _ => None,
            },
        }
    }
}

/// How the value is obtained from the attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Processing {
    Single {
        index: usize,
    },
    Calculated {
        first: usize,
        second: usize,
        calculation: Calculation,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatting {
    Raw,
    Auto,
    Currency,
    Amount,
    AmountRounded,
    Percent,
}

impl FromStr for Formatting {
    type Err = DataPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Self::Raw),
            "auto" => Ok(Self::Auto),
            "currency" => Ok(Self::Currency),
            "amount" => Ok(Self::Amount),
            "amount_rounded" => Ok(Self::AmountRounded),
            "percent" => Ok(Self::Percent),
            _ => Err(DataPointError::InvalidFormattingType(s.to_string())),
        }
    }
}

/// Presentation hint passed through to the rendering layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    #[default]
    None,
    Progressbar,
    PieChart,
    SparkLine,
}

impl Widget {
    fn parse_lenient(s: &str) -> Self {
        match s {
            "" | "none" => Self::None,
            "progressbar" => Self::Progressbar,
            "pie_chart" => Self::PieChart,
            "spark_line" => Self::SparkLine,
            other => {
                warn!(widget = other, "Unknown data point widget, rendering without one");
                Self::None
            }
        }
    }
}

/// A validated data point definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataPointConfig {
    pub processing: Processing,
    pub formatting: Formatting,
    pub widget: Widget,
}

impl TryFrom<&DataPointSpec> for Processing {
    type Error = DataPointError;

    /// Reads the processing mode, its data points and, for calculated
    /// values, the calculation. `formatting` and `widget` are not looked at.
    fn try_from(spec: &DataPointSpec) -> Result<Self, Self::Error> {
        let point = |n: usize, expected: usize| {
            spec.data_points
                .get(n)
                .map(|p| p.index)
                .ok_or(DataPointError::MissingDataPoint {
                    expected,
                    found: spec.data_points.len(),
                })
        };
        match spec.processing.as_str() {
            "single" => Ok(Self::Single { index: point(0, 1)? }),
            "calculated" => {
                let first = point(0, 2)?;
                let second = point(1, 2)?;
                let calculation = spec.calculation.as_deref().unwrap_or_default().parse()?;
                Ok(Self::Calculated {
                    first,
                    second,
                    calculation,
                })
            }
            other => Err(DataPointError::InvalidProcessingType(other.to_string())),
        }
    }
}

impl Processing {
    /// Extracts or calculates the value from the attachment.
    #[must_use]
    pub fn value(&self, attachment: &DataAttachment) -> Option<f64> {
        match *self {
            Self::Single { index } => attachment.value(index),
            Self::Calculated {
                first,
                second,
                calculation,
            } => calculation.apply(attachment.value(first), attachment.value(second)),
        }
    }
}

impl TryFrom<&DataPointSpec> for DataPointConfig {
    type Error = DataPointError;

    fn try_from(spec: &DataPointSpec) -> Result<Self, Self::Error> {
        Ok(Self {
            processing: Processing::try_from(spec)?,
            formatting: spec.formatting.parse()?,
            widget: spec
                .widget
                .as_deref()
                .map(Widget::parse_lenient)
                .unwrap_or_default(),
        })
    }
}

impl TryFrom<DataPointSpec> for DataPointConfig {
    type Error = DataPointError;

    fn try_from(spec: DataPointSpec) -> Result<Self, Self::Error> {
        Self::try_from(&spec)
    }
}

impl DataPointConfig {
    /// Reads one value directly.
    #[must_use]
    pub fn single(index: usize, formatting: Formatting) -> Self {
        Self {
            processing: Processing::Single { index },
            formatting,
            widget: Widget::None,
        }
    }

    /// Combines two values.
    #[must_use]
    pub fn calculated(first: usize, second: usize, calculation: Calculation, formatting: Formatting) -> Self {
        Self {
            processing: Processing::Calculated {
                first,
                second,
                calculation,
            },
            formatting,
            widget: Widget::None,
        }
    }

    #[must_use]
    pub fn with_widget(mut self, widget: Widget) -> Self {
        self.widget = widget;
        self
    }

    /// Parses a stored definition from JSON.
    pub fn from_value(value: serde_json::Value) -> DataPointResult<Self> {
        let spec: DataPointSpec = serde_json::from_value(value)?;
        Self::try_from(spec)
    }

    fn calculation(&self) -> Option<Calculation> {
        match self.processing {
            Processing::Single { .. } => None,
            Processing::Calculated { calculation, .. } => Some(calculation),
        }
    }

    /// Extracts or calculates the value from the attachment.
    #[must_use]
    pub fn value(&self, attachment: &DataAttachment) -> Option<f64> {
        self.processing.value(attachment)
    }

    /// Computes the value and wraps it in a presentation descriptor.
    #[must_use]
    pub fn format(&self, attachment: &DataAttachment) -> FormattedValue {
        let value = self.value(attachment);
        match self.formatting {
            Formatting::Raw => FormattedValue::Raw { value },
            Formatting::Auto if self.calculation() == Some(Calculation::Percentage) => {
                FormattedValue::Percent {
                    ratio: value,
                    decimals: 1,
                }
            }
            Formatting::Auto => FormattedValue::Autoformat {
                value,
                unit_type: attachment.unit_type().to_string(),
            },
            Formatting::Currency => FormattedValue::Currency { value },
            Formatting::Amount => FormattedValue::Amount {
                amount: value,
                decimals: None,
            },
            Formatting::AmountRounded => FormattedValue::Amount {
                amount: value,
                decimals: Some(1),
            },
            Formatting::Percent => FormattedValue::Percent {
                ratio: value,
                decimals: 1,
            },
        }
    }

    /// Human label built from the attachment's field names.
    #[must_use]
    pub fn label(&self, attachment: &DataAttachment) -> String {
        let name = |index: usize| {
            attachment
                .prototype
                .fields
                .get(index)
                .cloned()
                .unwrap_or_default()
        };
        match self.processing {
            Processing::Single { index } => name(index),
            Processing::Calculated {
                first,
                second,
                calculation,
            } => {
                let (a, b) = (name(first), name(second));
                match calculation {
                    Calculation::Addition => format!("{a} + {b}"),
                    Calculation::Substraction => format!("{a} - {b}"),
                    Calculation::Division => format!("{b} / {a}"),
                    Calculation::Percentage => format!("{a} % of {b}"),
                }
            }
        }
    }
}

/// Evaluates a stored definition against an attachment. Only the parts
/// that select and combine values are validated.
pub fn get_value(attachment: &DataAttachment, spec: &DataPointSpec) -> DataPointResult<Option<f64>> {
    Ok(Processing::try_from(spec)?.value(attachment))
}

/// Evaluates and formats a stored definition against an attachment.
pub fn format_value(attachment: &DataAttachment, spec: &DataPointSpec) -> DataPointResult<FormattedValue> {
    Ok(DataPointConfig::try_from(spec)?.format(attachment))
}
