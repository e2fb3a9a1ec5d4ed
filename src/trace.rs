use crate::config::TraceParams;
use crate::error::{SkResult, SkyScoreError};
use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single recorded fix. Immutable once stored; its identity is its
/// current index in the owning [`TraceStore`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub pos: GeoPoint,
    /// Seconds since flight start. Strictly increasing across the store.
    pub time: f64,
}

/// Bounded, time-ordered store of trace points.
///
/// Appends enforce strictly increasing timestamps. When the point budget
/// is exceeded the store drops the interior point whose omission adds the
/// smallest detour, keeps the most recent window untouched, and bumps the
/// liveness epoch so index-based consumers know their labels are stale.
pub struct TraceStore {
    points: Vec<TracePoint>,
    max_points: usize,
    recent_window: usize,
    epoch: u64,
}

impl TraceStore {
    pub fn new(params: &TraceParams) -> Self {
        Self {
            points: Vec::new(),
            // A budget below 4 cannot hold any scored path.
            max_points: params.max_points.max(4),
            recent_window: params.recent_window.max(1),
            epoch: 0,
        }
    }

    pub fn append(&mut self, pos: GeoPoint, time: f64) -> SkResult<()> {
        if let Some(last) = self.points.last() {
            if time <= last.time {
                return Err(SkyScoreError::NonMonotonicFix {
                    time,
                    last: last.time,
                });
            }
        }

        self.points.push(TracePoint { pos, time });
        if self.points.len() > self.max_points {
            self.thin();
        }
        Ok(())
    }

    /// Drop the interior point contributing least to the path shape.
    /// Index 0 and the newest point are never candidates.
    fn thin(&mut self) {
        let n = self.points.len();

        // Protect the most recent window; if the budget is too tight for
        // that, fall back to the whole interior.
        let mut hi = n.saturating_sub(self.recent_window);
        if hi <= 1 {
            hi = n - 1;
        }

        let mut victim = 1;
        let mut min_detour = f64::INFINITY;
        for i in 1..hi {
            let prev = &self.points[i - 1].pos;
            let here = &self.points[i].pos;
            let next = &self.points[i + 1].pos;
            let detour = prev.distance_km(here) + here.distance_km(next) - prev.distance_km(next);
            if detour < min_detour {
                min_detour = detour;
                victim = i;
            }
        }

        self.points.remove(victim);
        self.epoch += 1;
        debug!(
            "Trace thinned: dropped index {} (detour {:.3} km), epoch now {}",
            victim, min_detour, self.epoch
        );
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TracePoint> {
        self.points.get(index)
    }

    pub fn first(&self) -> Option<&TracePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TracePoint> {
        self.points.last()
    }

    /// Oldest-to-newest time span in seconds.
    pub fn full_span(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }

    /// Bumped on every thinning pass; a mismatch invalidates all captured
    /// indices at once.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn iter(&self) -> impl Iterator<Item = &TracePoint> {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.epoch += 1;
    }
}
