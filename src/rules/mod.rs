pub mod free_distance;
pub mod out_and_return;
pub mod triangle;

use crate::config::RuleParams;
use crate::geo::BoundingBox;
use crate::trace::TraceStore;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Contest rule selector. Kebab-case names double as the CLI spelling.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    FreeDistance,
    OutAndReturn,
    FaiTriangle,
}

/// Read-only geometric snapshot taken once per solve call, so the search
/// bound never consults mutable global state.
#[derive(Debug, Clone, Copy)]
pub struct BoundContext {
    /// Upper estimate of the longest possible leg over the current trace.
    pub max_leg_km: f64,
}

impl BoundContext {
    pub fn snapshot(trace: &TraceStore) -> Self {
        let bbox = BoundingBox::from_points(trace.iter().map(|p| p.pos));
        Self {
            max_leg_km: bbox.map(|b| b.diameter_km()).unwrap_or(0.0),
        }
    }
}

/// The active rule plus its tunables. All methods are pure functions of
/// the trace contents and the configuration.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub kind: RuleKind,
    pub params: RuleParams,
}

impl RuleSet {
    pub fn new(kind: RuleKind, params: RuleParams) -> Self {
        Self { kind, params }
    }

    /// Number of scored path points (slots) this rule defines.
    pub fn max_slots(&self) -> usize {
        match self.kind {
            // Clamped so a slot number always fits the search node layout.
            RuleKind::FreeDistance => self.params.free_distance_points.clamp(2, 16),
            RuleKind::OutAndReturn => 3,
            RuleKind::FaiTriangle => 4,
        }
    }

    /// Handicapped score contribution of the leg `from -> to`, or `None`
    /// for a non-edge. Out-of-range indices (stale after thinning) are
    /// non-edges rather than faults.
    pub fn edge_score(
        &self,
        trace: &TraceStore,
        from: usize,
        to: usize,
        _slot: usize,
    ) -> Option<f64> {
        let a = trace.get(from)?;
        let b = trace.get(to)?;
        Some(a.pos.distance_km(&b.pos) * self.params.handicap)
    }

    /// Checked once a complete path (all slots filled) is assembled.
    pub fn is_path_legal(&self, trace: &TraceStore, path: &[usize]) -> bool {
        if path.len() != self.max_slots() {
            return false;
        }
        if path.windows(2).any(|w| w[0] >= w[1]) {
            return false;
        }
        if path.iter().any(|&i| i >= trace.len()) {
            return false;
        }

        match self.kind {
            RuleKind::FreeDistance => free_distance::is_legal(trace, path, &self.params),
            RuleKind::OutAndReturn => out_and_return::is_legal(trace, path, &self.params),
            RuleKind::FaiTriangle => triangle::is_legal(trace, path, &self.params),
        }
    }

    /// Admissible upper bound on the score achievable by completing a
    /// partial path with `slots_remaining` more legs. Never underestimates.
    pub fn bound(&self, ctx: &BoundContext, score_so_far: f64, slots_remaining: usize) -> f64 {
        score_so_far + slots_remaining as f64 * ctx.max_leg_km * self.params.handicap
    }

    /// Distance between the path's finish and start points, km.
    pub fn closure_km(&self, trace: &TraceStore, path: &[usize]) -> Option<f64> {
        let first = trace.get(*path.first()?)?;
        let last = trace.get(*path.last()?)?;
        Some(last.pos.distance_km(&first.pos))
    }

    pub fn is_closed(&self, trace: &TraceStore, path: &[usize]) -> bool {
        self.closure_km(trace, path)
            .map(|d| d <= self.params.closing_tolerance_km)
            .unwrap_or(false)
    }
}

/// Raw (unhandicapped) leg distances of a path, km. `None` if any index
/// is out of range.
pub fn leg_distances_km(trace: &TraceStore, path: &[usize]) -> Option<Vec<f64>> {
    path.windows(2)
        .map(|w| {
            let a = trace.get(w[0])?;
            let b = trace.get(w[1])?;
            Some(a.pos.distance_km(&b.pos))
        })
        .collect()
}
