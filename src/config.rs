//! Typed, serde-backed configuration for a search. Mirrors this codebase's
//! `AiConfig` convention: every field has a sensible default so a caller can
//! supply a partial (or absent) JSON blob and still get a working engine.

use serde::{Deserialize, Serialize};

use crate::strategy::{StrategyKind, StrategyParams};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionPolicy {
    FirstUntried,
    RandomUntried,
}

impl Default for ExpansionPolicy {
    fn default() -> Self {
        ExpansionPolicy::FirstUntried
    }
}

fn default_max_retries() -> u8 {
    50
}

fn default_can_lead_trump() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default)]
    pub strategy_params: StrategyParams,
    /// Open question from the design notes, resolved as a config flag: the
    /// "cannot lead trump until broken" restriction defaults to off, i.e.
    /// trump may be led freely unless this is explicitly set to `false`.
    #[serde(default = "default_can_lead_trump")]
    pub can_lead_trump_before_broken: bool,
    #[serde(default = "default_max_retries")]
    pub max_determinization_retries: u8,
    #[serde(default)]
    pub expansion_policy: ExpansionPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            strategy: StrategyKind::Default,
            strategy_params: StrategyParams::default(),
            can_lead_trump_before_broken: default_can_lead_trump(),
            max_determinization_retries: default_max_retries(),
            expansion_policy: ExpansionPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Builds a config from an optional raw JSON blob, falling back to
    /// defaults wholesale on a malformed blob rather than failing the
    /// caller's request over a config parse error.
    pub fn from_json(config: Option<&serde_json::Value>) -> Self {
        match config {
            Some(v) => serde_json::from_value(v.clone()).unwrap_or_default(),
            None => Self::default(),
        }
    }
}
