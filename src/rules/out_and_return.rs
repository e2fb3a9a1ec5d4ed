//! Out-and-return: start, a single turnpoint, and a finish that must come
//! back to within the closing tolerance of the start.

use crate::config::RuleParams;
use crate::trace::TraceStore;

pub(crate) fn is_legal(trace: &TraceStore, path: &[usize], params: &RuleParams) -> bool {
    let (Some(first), Some(last)) = (trace.get(path[0]), trace.get(path[path.len() - 1])) else {
        return false;
    };
    last.pos.distance_km(&first.pos) <= params.closing_tolerance_km
}
