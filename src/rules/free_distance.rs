//! Free distance: an open path through the configured number of points.
//! Any structurally complete path is legal; the score is the handicapped
//! sum of the leg distances.

use crate::config::RuleParams;
use crate::trace::TraceStore;

pub(crate) fn is_legal(_trace: &TraceStore, _path: &[usize], _params: &RuleParams) -> bool {
    true
}
