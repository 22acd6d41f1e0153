//! Localized strings as delivered by the planning API.

use serde::{Deserialize, Serialize};

/// A translatable string.
///
/// Most names arrive as `{"en": "..."}`, but some endpoints flatten them to a
/// bare string. Both shapes are accepted and round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Translated {
        #[serde(default)]
        en: Option<String>,
    },
}

impl LocalizedText {
    /// Returns the English text, if any.
    #[must_use]
    pub fn en(&self) -> Option<&str> {
        match self {
            Self::Plain(s) => Some(s.as_str()),
            Self::Translated { en } => en.as_deref(),
        }
    }

    /// Returns the English text, or an empty string.
    #[must_use]
    pub fn en_or_empty(&self) -> &str {
        self.en().unwrap_or_default()
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        Self::Translated {
            en: Some(s.to_string()),
        }
    }
}
