use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const CONFIG_PATH: &str = "engine_config.json";

/// Engine tunables, loadable from `engine_config.json` next to the binary.
/// Missing file or parse failure falls back to the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIConfig {
    pub version: String,
    pub search: SearchConfig,
    pub heuristics: HeuristicConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Safety margin reserved below the per-move deadline, in milliseconds.
    pub timer_margin_ms: u64,
    /// Depth used by non-iterative (fixed-depth) search.
    pub fixed_depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// Decay ratio of the weighted-reachability score.
    pub reach_ratio: f64,
    /// Decay ratio of the differential weighted-reachability score.
    /// Tuned separately from `reach_ratio`; the differential form interacts
    /// differently with opponent-shaping incentives.
    pub differential_reach_ratio: f64,
    /// Playouts per evaluation of the Monte Carlo rollout score.
    pub rollout_count: u32,
}

impl AIConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(CONFIG_PATH)
            .with_context(|| format!("reading {CONFIG_PATH}"))?;
        let config: AIConfig =
            serde_json::from_str(&config_str).with_context(|| format!("parsing {CONFIG_PATH}"))?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default())
    }

    /// Process-wide cached config.
    pub fn get() -> &'static AIConfig {
        static CONFIG: Lazy<AIConfig> = Lazy::new(AIConfig::load_or_default);
        &CONFIG
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            search: SearchConfig {
                timer_margin_ms: 10,
                fixed_depth: 3,
            },
            heuristics: HeuristicConfig {
                reach_ratio: 1.3,
                differential_reach_ratio: 1.4,
                rollout_count: 64,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AIConfig::default();
        assert!(config.heuristics.reach_ratio > 1.0);
        assert!(config.heuristics.differential_reach_ratio > 1.0);
        assert!(config.heuristics.rollout_count > 0);
        assert!(config.search.fixed_depth >= 1);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = AIConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AIConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.search.timer_margin_ms, config.search.timer_margin_ms);
        assert_eq!(back.heuristics.rollout_count, config.heuristics.rollout_count);
    }
}
