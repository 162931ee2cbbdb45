//! Selection settings loaded from TOML.
//!
//! ```
//! use dispersion::{Method, SelectionConfig};
//!
//! let config = SelectionConfig::from_toml_str(r#"
//!     k = 500
//!     method = "greedy"
//!     quiet = true
//! "#).unwrap();
//!
//! assert_eq!(config.k, Some(500));
//! assert_eq!(config.method, Some(Method::Greedy));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DispersionError, Result};
use crate::forest::Method;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    /// Number of nodes to choose.
    pub k: Option<usize>,
    pub method: Option<Method>,
    /// Do not print the chosen nodes.
    pub quiet: bool,
}

impl SelectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Fills unset fields from `other`; values already set win.
    pub fn or(self, other: Self) -> Self {
        Self {
            k: self.k.or(other.k),
            method: self.method.or(other.method),
            quiet: self.quiet || other.quiet,
        }
    }
}

/// Rejects targets that leave no pair to measure.
pub fn validate_target(k: usize) -> Result<usize> {
    if k < 2 {
        return Err(DispersionError::InvalidTarget { k });
    }
    Ok(k)
}
