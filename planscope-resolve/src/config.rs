//! Resolver configuration. Reads an optional `[resolver]` TOML section that
//! tunes the child-id closure and the handling of malformed support graphs.

use crate::ResolveResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// What to do when a support chain loops back on itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    #[default]
    /// Stop following the loop and keep what was collected so far.
    Truncate,
    /// Fail with `ResolveError::CyclicSupportGraph`.
    Error,
}

/// Tunables for entity resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolverConfig {
    /// Prototype ref codes of main-level plan entities whose first support
    /// target is treated as their parent in the child-id closure.
    #[serde(default = "default_root_ref_codes")]
    pub root_ref_codes: Vec<String>,
    #[serde(default)]
    pub cycle_policy: CyclePolicy,
}

fn default_root_ref_codes() -> Vec<String> {
    ["CQ", "SO", "SP"].map(String::from).to_vec()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_ref_codes: default_root_ref_codes(),
            cycle_policy: CyclePolicy::default(),
        }
    }
}

/// Raw TOML structure; the resolver settings live under `[resolver]`.
#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    resolver: Option<ResolverConfig>,
}

impl ResolverConfig {
    /// Parses the `[resolver]` section of a TOML document.
    /// A document without that section yields the defaults.
    pub fn from_toml_str(contents: &str) -> ResolveResult<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        Ok(file.resolver.unwrap_or_default())
    }

    /// Loads configuration from a file.
    /// Falls back to the defaults with a warning when the file is missing,
    /// unreadable or malformed.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No resolver config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded resolver config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse resolver config {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read resolver config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Whether entities of this prototype ref code sit at the main level.
    #[must_use]
    pub fn is_root_ref_code(&self, ref_code: &str) -> bool {
        self.root_ref_codes.iter().any(|code| code == ref_code)
    }
}
