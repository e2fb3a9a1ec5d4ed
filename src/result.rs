use crate::error::{SkResult, SkyScoreError};
use crate::rules::{leg_distances_km, RuleKind, RuleSet};
use crate::trace::TraceStore;
use serde::{Deserialize, Serialize};

/// Whether the engine has produced a legal scored path yet. An empty
/// trace and a degenerate one both report `Unscored`, never a zero score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    Unscored,
    Scored,
}

/// One fix of the winning path, denormalized for display so it survives
/// later trace thinning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultFix {
    pub lat: f64,
    pub lon: f64,
    pub time: f64,
    pub trace_index: usize,
}

/// The current contest standing. Replaced wholesale when a strictly
/// better path is found, never partially mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestResult {
    pub status: ResultStatus,
    pub rule: RuleKind,
    /// Handicapped score, km-points.
    pub score: f64,
    /// Raw path distance, km.
    pub distance_km: f64,
    pub duration_secs: f64,
    /// Finish within closing tolerance of the start.
    pub closed: bool,
    pub path: Vec<ResultFix>,
}

impl ContestResult {
    pub fn unscored(rule: RuleKind) -> Self {
        Self {
            status: ResultStatus::Unscored,
            rule,
            score: 0.0,
            distance_km: 0.0,
            duration_secs: 0.0,
            closed: false,
            path: Vec::new(),
        }
    }

    pub fn is_scored(&self) -> bool {
        self.status == ResultStatus::Scored
    }

    pub fn from_path(
        trace: &TraceStore,
        rules: &RuleSet,
        indices: &[usize],
        score: f64,
    ) -> SkResult<Self> {
        let mut path = Vec::with_capacity(indices.len());
        for &index in indices {
            let point = trace.get(index).ok_or(SkyScoreError::StaleIndex {
                index,
                len: trace.len(),
            })?;
            path.push(ResultFix {
                lat: point.pos.lat,
                lon: point.pos.lon,
                time: point.time,
                trace_index: index,
            });
        }

        let distance_km = leg_distances_km(trace, indices)
            .ok_or(SkyScoreError::StaleIndex {
                index: *indices.last().unwrap_or(&0),
                len: trace.len(),
            })?
            .iter()
            .sum();

        let duration_secs = match (path.first(), path.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        };

        Ok(Self {
            status: ResultStatus::Scored,
            rule: rules.kind,
            score,
            distance_km,
            duration_secs,
            closed: rules.is_closed(trace, indices),
            path,
        })
    }
}
