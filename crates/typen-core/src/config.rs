//! Configuration file loading for typen.
//!
//! Reads `typen.json` from a project's config directory and provides typed
//! access to the enforcement policy and the coercion lattice. Falls back to
//! defaults when the file is missing or incomplete.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::lattice::CoercionLattice;
use crate::mode::{EnforcementMode, Requirements};

pub const CONFIG_FILE: &str = "typen.json";

/// Top-level typen configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypenConfig {
    pub version: String,
    #[serde(default)]
    pub enforce: EnforceConfig,
    #[serde(default)]
    pub coercion: CoercionLattice,
}

/// Admission policy for wrappers built from this configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnforceConfig {
    #[serde(default)]
    pub mode: EnforcementMode,
    /// Overrides the parameter requirement implied by `mode`.
    #[serde(default)]
    pub require_parameters: Option<bool>,
    /// Overrides the return requirement implied by `mode`.
    #[serde(default)]
    pub require_return: Option<bool>,
}

impl EnforceConfig {
    pub fn requirements(&self) -> Requirements {
        let base = Requirements::from(self.mode);
        Requirements {
            parameters: self.require_parameters.unwrap_or(base.parameters),
            return_value: self.require_return.unwrap_or(base.return_value),
        }
    }
}

impl Default for TypenConfig {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            enforce: EnforceConfig::default(),
            coercion: CoercionLattice::default(),
        }
    }
}

impl TypenConfig {
    /// Load configuration from `typen.json` inside the given directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(config_dir: &Path) -> Self {
        let config_path = config_dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse typen config, using defaults"
                );
                Self::default()
            }
        }
    }

    pub fn requirements(&self) -> Requirements {
        self.enforce.requirements()
    }
}
