use super::{Label, NodeState, SearchNode, NO_PREV};
use crate::rules::{BoundContext, RuleSet};
use crate::trace::TraceStore;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// Open-queue entry ordered by bounded priority (max-heap). Ties pop the
/// lower trace index first so repeated solves stay deterministic.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    priority: f64,
    score: f64,
    node: SearchNode,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| other.node.index.cmp(&self.node.index))
            .then_with(|| other.node.slot.cmp(&self.node.slot))
    }
}

/// The best complete legal path found so far, as trace indices in slot
/// order plus its handicapped score.
#[derive(Debug, Clone)]
pub struct BestPath {
    pub indices: Vec<usize>,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SolveStats {
    /// Nodes settled and expanded this call.
    pub expansions: usize,
    /// Label improvements performed this call.
    pub relaxations: usize,
    pub improved: bool,
    pub exhausted: bool,
}

/// Label-correcting best-first search over the slot-layered DAG of
/// (slot, trace-index) nodes, maximizing the rule's score.
///
/// Labels persist across calls: previously incorporated indices keep
/// their scores (appending points cannot improve an earlier node for a
/// monotone rule), so a re-solve only inserts and relaxes the new tail.
/// A trace epoch change (thinning) drops everything, incumbent included,
/// and the next call re-solves from scratch.
pub struct PathSearchEngine {
    labels: Vec<Vec<Label>>,
    best: Option<BestPath>,
    trace_epoch: u64,
    incorporated: usize,
    exhausted: bool,
    pruning: bool,
}

impl PathSearchEngine {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            best: None,
            trace_epoch: 0,
            incorporated: 0,
            exhausted: false,
            pruning: true,
        }
    }

    pub fn reset(&mut self) {
        self.labels.clear();
        self.best = None;
        self.trace_epoch = 0;
        self.incorporated = 0;
        self.exhausted = false;
    }

    pub fn best_path(&self) -> Option<&BestPath> {
        self.best.as_ref()
    }

    /// True when the last solve call hit its expansion budget.
    pub fn was_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Disable the bound-based pruning (exhaustive settling). Only useful
    /// for validating that pruning never loses a better path.
    pub fn set_pruning(&mut self, enabled: bool) {
        self.pruning = enabled;
    }

    pub fn solve(&mut self, trace: &TraceStore, rules: &RuleSet, max_expansions: usize) -> SolveStats {
        let slots = rules.max_slots();
        let mut stats = SolveStats::default();
        let prev_best = self.best.as_ref().map(|b| b.score);

        // 1. Liveness check: thinning shifted indices, so every captured
        //    label (and the incumbent path) is stale.
        if self.trace_epoch != trace.epoch() || self.labels.len() != slots {
            if self.incorporated > 0 {
                debug!(
                    "Trace epoch {} -> {}: discarding labels, solving from scratch",
                    self.trace_epoch,
                    trace.epoch()
                );
            }
            self.labels = vec![Vec::new(); slots];
            self.best = None;
            self.incorporated = 0;
            self.trace_epoch = trace.epoch();
        }

        let n = trace.len();
        if n == 0 {
            self.exhausted = false;
            return stats;
        }

        // 2. Geometric snapshot for the admissible bound.
        let ctx = BoundContext::snapshot(trace);

        // 3. Insert indices appended since the last call.
        self.incorporate_new_points(trace, rules, slots);

        // 4. Rebuild the open queue from every labeled, unsettled node.
        //    Priorities are re-derived because the bound context moves as
        //    the trace grows.
        let mut queue = BinaryHeap::new();
        for (slot, layer) in self.labels.iter().enumerate() {
            for (index, label) in layer.iter().enumerate() {
                if label.state == NodeState::Labeled {
                    queue.push(QueueEntry {
                        priority: rules.bound(&ctx, label.score, slots - 1 - slot),
                        score: label.score,
                        node: SearchNode {
                            slot: slot as u8,
                            index: index as u32,
                        },
                    });
                }
            }
        }

        // 5. Best-first loop: settle greedily, expand lazily.
        self.exhausted = false;
        while let Some(entry) = queue.pop() {
            let slot = entry.node.slot as usize;
            let index = entry.node.index as usize;
            let label = self.labels[slot][index];

            // Stale or already settled entries are skipped, not re-expanded.
            if label.state != NodeState::Labeled || entry.score != label.score {
                continue;
            }

            // Nothing left in a max-heap can strictly beat the incumbent
            // once the top entry's bound fails to. Unsettled nodes keep
            // their labels and re-enter the queue next call.
            if self.pruning {
                if let Some(best) = &self.best {
                    if entry.priority <= best.score {
                        break;
                    }
                }
            }

            if stats.expansions >= max_expansions {
                self.exhausted = true;
                stats.exhausted = true;
                break;
            }
            stats.expansions += 1;

            self.labels[slot][index].state = NodeState::Settled;

            if slot == slots - 1 {
                self.try_complete(trace, rules, index, entry.score, slots);
            } else {
                // Lazy edge generation: candidate targets are queried per
                // expansion instead of materializing O(n^2) edges.
                for to in index + 1..n {
                    let Some(weight) = rules.edge_score(trace, index, to, slot + 1) else {
                        continue;
                    };
                    let candidate = entry.score + weight;
                    let target = &mut self.labels[slot + 1][to];
                    if target.state != NodeState::Settled && candidate > target.score {
                        target.score = candidate;
                        target.prev = index as u32;
                        target.state = NodeState::Labeled;
                        stats.relaxations += 1;
                        queue.push(QueueEntry {
                            priority: rules.bound(&ctx, candidate, slots - 2 - slot),
                            score: candidate,
                            node: SearchNode {
                                slot: (slot + 1) as u8,
                                index: to as u32,
                            },
                        });
                    }
                }
            }
        }

        let best_now = self.best.as_ref().map(|b| b.score);
        stats.improved = match (prev_best, best_now) {
            (None, Some(_)) => true,
            (Some(prev), Some(now)) => now > prev,
            _ => false,
        };
        debug!(
            "Solve: {} expansions, {} relaxations, best {:?}, exhausted {}",
            stats.expansions, stats.relaxations, best_now, stats.exhausted
        );
        stats
    }

    /// Add every index appended since the last call. New points become
    /// slot-0 starts and are relaxed from already-settled predecessor
    /// layers; labeled predecessors reach them when they settle.
    fn incorporate_new_points(&mut self, trace: &TraceStore, rules: &RuleSet, slots: usize) {
        let n = trace.len();
        if self.incorporated >= n {
            return;
        }

        for layer in &mut self.labels {
            layer.resize(n, Label::default());
        }

        for to in self.incorporated..n {
            let start = &mut self.labels[0][to];
            start.score = 0.0;
            start.prev = NO_PREV;
            start.state = NodeState::Labeled;

            for slot in 0..slots - 1 {
                let mut best_score = f64::NEG_INFINITY;
                let mut best_prev = NO_PREV;
                for from in 0..to {
                    let pred = self.labels[slot][from];
                    if pred.state != NodeState::Settled {
                        continue;
                    }
                    let Some(weight) = rules.edge_score(trace, from, to, slot + 1) else {
                        continue;
                    };
                    if pred.score + weight > best_score {
                        best_score = pred.score + weight;
                        best_prev = from as u32;
                    }
                }

                if best_prev != NO_PREV {
                    let target = &mut self.labels[slot + 1][to];
                    if best_score > target.score {
                        target.score = best_score;
                        target.prev = best_prev;
                        target.state = NodeState::Labeled;
                    }
                }
            }
        }

        self.incorporated = n;
    }

    /// A finish-slot node settled: walk the predecessor chain, check rule
    /// legality, and take the path only when strictly better. Equal-score
    /// alternatives never displace the earlier, already-reported result.
    fn try_complete(
        &mut self,
        trace: &TraceStore,
        rules: &RuleSet,
        finish: usize,
        score: f64,
        slots: usize,
    ) {
        let mut indices = vec![0usize; slots];
        indices[slots - 1] = finish;
        let mut cursor = finish;
        for slot in (0..slots - 1).rev() {
            let prev = self.labels[slot + 1][cursor].prev;
            if prev == NO_PREV {
                return;
            }
            cursor = prev as usize;
            indices[slot] = cursor;
        }

        if !rules.is_path_legal(trace, &indices) {
            return;
        }

        let better = match &self.best {
            Some(best) => score > best.score,
            None => true,
        };
        if better {
            debug!("New best path: score {:.3} via {:?}", score, indices);
            self.best = Some(BestPath { indices, score });
        }
    }
}

impl Default for PathSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}
