// ===== skyscore/src/session.rs =====
use crate::config::{Config, SearchParams};
use crate::error::SkResult;
use crate::geo::GeoPoint;
use crate::result::ContestResult;
use crate::rules::{RuleKind, RuleSet};
use crate::solver::PathSearchEngine;
use crate::trace::TraceStore;
use tracing::{info, warn};

/// Owns the trace, the engine and the active rule; decides when to
/// re-solve and publishes the current [`ContestResult`]. Orchestration
/// only; all scoring logic lives in the rules and the engine.
pub struct ContestSession {
    trace: TraceStore,
    engine: PathSearchEngine,
    rules: RuleSet,
    search: SearchParams,
    result: ContestResult,
    fixes_since_solve: usize,
    last_solve_time: f64,
    retry_next_fix: bool,
    solve_count: u64,
}

impl ContestSession {
    pub fn new(kind: RuleKind, config: &Config) -> Self {
        Self {
            trace: TraceStore::new(&config.trace),
            engine: PathSearchEngine::new(),
            rules: RuleSet::new(kind, config.rules.clone()),
            search: config.search.clone(),
            result: ContestResult::unscored(kind),
            fixes_since_solve: 0,
            last_solve_time: f64::NEG_INFINITY,
            retry_next_fix: false,
            solve_count: 0,
        }
    }

    /// Feed one telemetry fix. Non-monotonic timestamps are rejected
    /// without mutating any state (a timebase fault upstream).
    pub fn push_fix(&mut self, pos: GeoPoint, time: f64) -> SkResult<&ContestResult> {
        self.trace.append(pos, time)?;
        self.fixes_since_solve += 1;

        if self.should_solve(time) {
            self.solve_now();
        }
        Ok(&self.result)
    }

    /// Eager while the flight is young, throttled afterwards. A solve
    /// that ran out of budget retries on the very next fix.
    fn should_solve(&self, now: f64) -> bool {
        if self.retry_next_fix {
            return true;
        }
        if self.trace.full_span() < self.search.eager_window_secs {
            return true;
        }
        self.fixes_since_solve >= self.search.resolve_every_points
            || now - self.last_solve_time >= self.search.resolve_every_secs
    }

    /// Force a re-solve against the current trace snapshot.
    pub fn solve_now(&mut self) -> &ContestResult {
        let stats = self
            .engine
            .solve(&self.trace, &self.rules, self.search.max_expansions);
        self.solve_count += 1;
        self.retry_next_fix = stats.exhausted;
        self.fixes_since_solve = 0;
        self.last_solve_time = self.trace.last().map(|p| p.time).unwrap_or(0.0);
        self.publish();
        &self.result
    }

    fn publish(&mut self) {
        // One retry: stale indices mean the store thinned underneath the
        // engine's incumbent, which a clean solve resolves. The fault
        // never surfaces to the caller.
        for _attempt in 0..2 {
            let Some(best) = self.engine.best_path() else {
                self.result = ContestResult::unscored(self.rules.kind);
                return;
            };
            match ContestResult::from_path(&self.trace, &self.rules, &best.indices, best.score) {
                Ok(result) => {
                    if result.score > self.result.score {
                        info!(
                            "New best {}: {:.2} pts over {:.2} km",
                            result.rule, result.score, result.distance_km
                        );
                    }
                    self.result = result;
                    return;
                }
                Err(e) => {
                    warn!("Discarding stale result ({}), re-solving", e);
                    self.engine.reset();
                    self.engine
                        .solve(&self.trace, &self.rules, self.search.max_expansions);
                }
            }
        }
        self.result = ContestResult::unscored(self.rules.kind);
    }

    pub fn result(&self) -> &ContestResult {
        &self.result
    }

    pub fn trace(&self) -> &TraceStore {
        &self.trace
    }

    pub fn rule(&self) -> RuleKind {
        self.rules.kind
    }

    /// Number of engine solves performed so far.
    pub fn solve_count(&self) -> u64 {
        self.solve_count
    }

    /// Clear all trace and search state for a new flight.
    pub fn reset(&mut self) {
        self.trace.clear();
        self.engine.reset();
        self.result = ContestResult::unscored(self.rules.kind);
        self.fixes_since_solve = 0;
        self.last_solve_time = f64::NEG_INFINITY;
        self.retry_next_fix = false;
        self.solve_count = 0;
    }
}
