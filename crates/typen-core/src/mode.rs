use std::fmt;

use serde::{Deserialize, Serialize};

/// Decoration-time admission policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnforcementMode {
    /// Undeclared slots accept any value.
    #[default]
    Permissive,
    /// Every non-exempt slot must declare a specifier.
    Strict,
}

impl EnforcementMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnforcementMode::Permissive => "permissive",
            EnforcementMode::Strict => "strict",
        }
    }
}

impl fmt::Display for EnforcementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which slots must carry a specifier. Strict mode requires both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Requirements {
    pub parameters: bool,
    pub return_value: bool,
}

impl Requirements {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            parameters: true,
            return_value: true,
        }
    }

    pub fn parameters_only() -> Self {
        Self {
            parameters: true,
            return_value: false,
        }
    }

    pub fn return_only() -> Self {
        Self {
            parameters: false,
            return_value: true,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.parameters && self.return_value
    }
}

impl From<EnforcementMode> for Requirements {
    fn from(mode: EnforcementMode) -> Self {
        match mode {
            EnforcementMode::Permissive => Requirements::none(),
            EnforcementMode::Strict => Requirements::all(),
        }
    }
}
