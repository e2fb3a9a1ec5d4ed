pub mod engine;

pub use self::engine::{BestPath, PathSearchEngine, SolveStats};

/// One node of the layered search graph: a trace index occupying a path
/// slot. Edges only advance by one slot and only to higher indices, so
/// the graph is a DAG layered by slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub slot: u8,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeState {
    #[default]
    Unvisited,
    /// Tentative score known; still in the open queue.
    Labeled,
    /// Optimal-for-its-slot score confirmed.
    Settled,
}

/// Predecessor marker for slot-0 nodes.
pub const NO_PREV: u32 = u32::MAX;

/// Best-known accumulated score and predecessor for one node. Labels are
/// invalidated wholesale when the trace epoch changes underneath them.
#[derive(Debug, Clone, Copy)]
pub struct Label {
    pub score: f64,
    /// Trace index of the predecessor in the previous slot layer.
    pub prev: u32,
    pub state: NodeState,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            score: f64::NEG_INFINITY,
            prev: NO_PREV,
            state: NodeState::Unvisited,
        }
    }
}
