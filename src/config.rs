use crate::error::{SkResult, SkyScoreError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub rules: RuleParams,
    #[command(flatten)]
    pub trace: TraceParams,
}

/// Solve cadence and compute budget. The expansion budget is the only
/// cancellation mechanism: when it runs out the engine returns its best
/// completed legal path so far and resumes on the next cycle.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Hard cap on node expansions per solve call.
    #[arg(long, default_value_t = 50_000)]
    pub max_expansions: usize,

    /// While the trace spans less than this, re-solve on every fix.
    #[arg(long, default_value_t = 600.0)]
    pub eager_window_secs: f64,

    #[arg(long, default_value_t = 60.0)]
    pub resolve_every_secs: f64,

    #[arg(long, default_value_t = 10)]
    pub resolve_every_points: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_expansions: 50_000,
            eager_window_secs: 600.0,
            resolve_every_secs: 60.0,
            resolve_every_points: 10,
        }
    }
}

/// Competition-rule tunables. The FAI ratio thresholds and the closing
/// tolerance are sporting-code details and deliberately configuration,
/// never hard-coded in the rule implementations.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleParams {
    /// Per-aircraft scaling factor applied to raw leg distance.
    #[arg(long, default_value_t = 1.0)]
    pub handicap: f64,

    /// Maximum distance between finish and start for a closed path (km).
    #[arg(long, default_value_t = 1.0)]
    pub closing_tolerance_km: f64,

    /// Minimum leg share of total distance for a standard FAI triangle.
    #[arg(long, default_value_t = 0.28)]
    pub min_leg_ratio: f64,

    /// Total distance above which the relaxed large-triangle ratios apply.
    #[arg(long, default_value_t = 500.0)]
    pub large_triangle_km: f64,

    /// Relaxed ratio all but one leg must meet on a large triangle.
    #[arg(long, default_value_t = 0.25)]
    pub large_min_leg_ratio: f64,

    /// Absolute floor for the single relaxed leg on a large triangle.
    #[arg(long, default_value_t = 0.15)]
    pub large_relaxed_leg_ratio: f64,

    /// Number of scored points (slots) for the free-distance rule.
    #[arg(long, default_value_t = 5)]
    pub free_distance_points: usize,
}

impl Default for RuleParams {
    fn default() -> Self {
        Self {
            handicap: 1.0,
            closing_tolerance_km: 1.0,
            min_leg_ratio: 0.28,
            large_triangle_km: 500.0,
            large_min_leg_ratio: 0.25,
            large_relaxed_leg_ratio: 0.15,
            free_distance_points: 5,
        }
    }
}

/// Trace memory budget. The most recent window stays unthinned so the
/// active part of the flight keeps full resolution.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceParams {
    #[arg(long, default_value_t = 512)]
    pub max_points: usize,

    #[arg(long, default_value_t = 32)]
    pub recent_window: usize,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            max_points: 512,
            recent_window: 32,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SkResult<Self> {
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| {
            SkyScoreError::Config(format!(
                "Failed to parse config '{}': {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    /// Overlay values the user explicitly passed on the command line onto
    /// this config. File values win over clap defaults; CLI wins over both.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident, $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(search, max_expansions, "max_expansions");
        update_if_present!(search, eager_window_secs, "eager_window_secs");
        update_if_present!(search, resolve_every_secs, "resolve_every_secs");
        update_if_present!(search, resolve_every_points, "resolve_every_points");

        update_if_present!(rules, handicap, "handicap");
        update_if_present!(rules, closing_tolerance_km, "closing_tolerance_km");
        update_if_present!(rules, min_leg_ratio, "min_leg_ratio");
        update_if_present!(rules, large_triangle_km, "large_triangle_km");
        update_if_present!(rules, large_min_leg_ratio, "large_min_leg_ratio");
        update_if_present!(rules, large_relaxed_leg_ratio, "large_relaxed_leg_ratio");
        update_if_present!(rules, free_distance_points, "free_distance_points");

        update_if_present!(trace, max_points, "max_points");
        update_if_present!(trace, recent_window, "recent_window");
    }
}
