//! FAI triangle: start, two free apexes, and a finish closing back near
//! the start. Legality is closure plus minimum leg-ratio constraints.
//!
//! Standard triangles require every leg to carry at least `min_leg_ratio`
//! of the total distance. Once the total reaches `large_triangle_km` the
//! relaxed form applies: at most one leg may fall below
//! `large_min_leg_ratio`, and no leg below `large_relaxed_leg_ratio`.
//! All four thresholds are configuration, not sporting-code literals.

use crate::config::RuleParams;
use crate::rules::leg_distances_km;
use crate::trace::TraceStore;

pub(crate) fn is_legal(trace: &TraceStore, path: &[usize], params: &RuleParams) -> bool {
    let Some(legs) = leg_distances_km(trace, path) else {
        return false;
    };
    let total: f64 = legs.iter().sum();
    if total <= 0.0 {
        return false;
    }

    let (Some(first), Some(last)) = (trace.get(path[0]), trace.get(path[path.len() - 1])) else {
        return false;
    };
    if last.pos.distance_km(&first.pos) > params.closing_tolerance_km {
        return false;
    }

    let ratios: Vec<f64> = legs.iter().map(|d| d / total).collect();

    if ratios.iter().all(|&r| r >= params.min_leg_ratio) {
        return true;
    }

    if total >= params.large_triangle_km {
        let below_min = ratios
            .iter()
            .filter(|&&r| r < params.large_min_leg_ratio)
            .count();
        let shortest = ratios.iter().cloned().fold(f64::INFINITY, f64::min);
        return below_min <= 1 && shortest >= params.large_relaxed_leg_ratio;
    }

    false
}
