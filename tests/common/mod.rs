// Not every test binary uses every helper.
#![allow(dead_code)]

use skyscore::config::Config;
use skyscore::geo::GeoPoint;
use skyscore::rules::RuleSet;
use skyscore::trace::TraceStore;

/// Build a store from (lat, lon, time) triples using the given config.
pub fn build_trace(config: &Config, fixes: &[(f64, f64, f64)]) -> TraceStore {
    let mut trace = TraceStore::new(&config.trace);
    for &(lat, lon, time) in fixes {
        trace
            .append(GeoPoint::new(lat, lon), time)
            .expect("fixture fixes must be time-ordered");
    }
    trace
}

/// The spec's square scenario: four unit-degree corners at unit times.
pub fn square_fixes() -> Vec<(f64, f64, f64)> {
    vec![
        (0.0, 0.0, 0.0),
        (0.0, 1.0, 1.0),
        (1.0, 1.0, 2.0),
        (1.0, 0.0, 3.0),
    ]
}

/// N points marching east along the equator, one per second.
pub fn collinear_fixes(n: usize) -> Vec<(f64, f64, f64)> {
    (0..n).map(|i| (0.0, 0.1 * i as f64, i as f64)).collect()
}

/// Brute-force reference: enumerate every strictly increasing index
/// tuple of the rule's slot count, keep the legal ones, return the best
/// score. Only usable on small fixtures.
pub fn exhaustive_best(trace: &TraceStore, rules: &RuleSet) -> Option<(Vec<usize>, f64)> {
    let slots = rules.max_slots();
    let n = trace.len();
    if n < slots {
        return None;
    }

    let mut best: Option<(Vec<usize>, f64)> = None;
    let mut path = Vec::with_capacity(slots);
    enumerate(trace, rules, slots, n, 0, 0.0, &mut path, &mut best);
    best
}

fn enumerate(
    trace: &TraceStore,
    rules: &RuleSet,
    slots: usize,
    n: usize,
    next_index: usize,
    score: f64,
    path: &mut Vec<usize>,
    best: &mut Option<(Vec<usize>, f64)>,
) {
    if path.len() == slots {
        if rules.is_path_legal(trace, path) {
            let better = match best {
                Some((_, best_score)) => score > *best_score,
                None => true,
            };
            if better {
                *best = Some((path.clone(), score));
            }
        }
        return;
    }

    for index in next_index..n {
        let edge = if path.is_empty() {
            Some(0.0)
        } else {
            rules.edge_score(trace, *path.last().unwrap(), index, path.len())
        };
        let Some(weight) = edge else { continue };
        path.push(index);
        enumerate(trace, rules, slots, n, index + 1, score + weight, path, best);
        path.pop();
    }
}
