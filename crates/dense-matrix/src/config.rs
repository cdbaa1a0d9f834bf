use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::math::SINGULAR_TOLERANCE;

/// Central configuration for linear solvers in the crate.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Relative pivot tolerance: pivots smaller than this times the largest
    /// coefficient magnitude are reported as singular.
    pub singular_tolerance: f64,

    pub strategy: SolverKind,
}

/// Supported solving strategies.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// In-place Gaussian elimination with partial pivoting on `[A | B]`.
    #[default]
    Elimination,
    /// Hand the system to a `dgesv`-style dense routine.
    Delegated,
}

impl FromStr for SolverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "elimination" | "gauss" | "gaussian" => Ok(SolverKind::Elimination),
            "delegated" | "dgesv" | "lapack" => Ok(SolverKind::Delegated),
            _ => Err(format!(
                "Unknown solver strategy: {}. Expected one of `elimination` or `delegated`",
                s
            )),
        }
    }
}

impl SolverConfig {
    pub fn new(singular_tolerance: f64, strategy: SolverKind) -> Self {
        Self {
            singular_tolerance,
            strategy,
        }
    }

    /// Load a configuration from a JSON file. Missing or invalid fields fall
    /// back to their defaults with a warning.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read solver config file: {}", path.display()))?;
        Self::from_json_str(&config_json)
    }

    pub fn from_json_str(config_json: &str) -> Result<Self> {
        let partial: serde_json::Value =
            serde_json::from_str(config_json).context("Solver config is not valid JSON")?;
        let mut config = SolverConfig::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                if let Some(val) = partial.get(stringify!($field)) {
                    if let Ok(parsed) = serde_json::from_value(val.clone()) {
                        config.$field = parsed;
                    } else {
                        log::warn!(
                            "Config Invalid value for '{}', using default: {:?}",
                            stringify!($field), config.$field
                        );
                    }
                } else {
                    log::warn!(
                        "Config Missing field '{}', using default: {:?}",
                        stringify!($field), config.$field
                    );
                }
            };
        }

        load_or_default!(singular_tolerance);
        load_or_default!(strategy);

        Ok(config)
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            singular_tolerance: SINGULAR_TOLERANCE,
            strategy: SolverKind::default(),
        }
    }
}
