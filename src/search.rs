//! A variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! over an arena of search nodes. Every node reached during one search lives in an insertion
//! ordered map; parents are stored as indices into that map instead of references, which keeps
//! reconstruction a plain walk over indices.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::ops::Add;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Lifecycle of a node within a single search. A node enters the arena as [Open] and may have
/// its cost lowered any number of times; once [Closed] it is final.
///
/// [Open]: NodeState::Open
/// [Closed]: NodeState::Closed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    Open,
    Closed,
}

/// Bookkeeping for one node of the arena.
#[derive(Clone, Copy, Debug)]
pub struct SearchNode<C> {
    /// Arena index of the predecessor; [None] only for the start node.
    pub parent: Option<usize>,
    pub g: C,
    pub h: C,
    pub state: NodeState,
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    heuristic: K,
    sequence: usize,
    index: usize,
}

impl<K: PartialOrd> Eq for SmallestCostHolder<K> {}

impl<K: PartialOrd> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so every comparison is reversed: smallest estimated cost
        // first, then smallest heuristic (deepest node), then earliest insertion.
        let by_cost = |a: &K, b: &K| b.partial_cmp(a).unwrap_or(Ordering::Equal);
        by_cost(&self.estimated_cost, &other.estimated_cost)
            .then_with(|| by_cost(&self.heuristic, &other.heuristic))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Outcome of a successful search.
#[derive(Clone, Debug)]
pub struct SearchResult<N, C> {
    pub path: Vec<N>,
    pub cost: C,
    pub expanded: usize,
}

/// Owns the node arena and open set of one search invocation.
pub struct SearchContext<N, C> {
    pub nodes: FxIndexMap<N, SearchNode<C>>,
    to_see: BinaryHeap<SmallestCostHolder<C>>,
    sequence: usize,
}

impl<N, C: PartialOrd> Default for SearchContext<N, C> {
    fn default() -> Self {
        SearchContext {
            nodes: FxIndexMap::default(),
            to_see: BinaryHeap::new(),
            sequence: 0,
        }
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Add<Output = C> + Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, index: usize, g: C, h: C) {
        self.to_see.push(SmallestCostHolder {
            estimated_cost: g + h,
            heuristic: h,
            sequence: self.sequence,
            index,
        });
        self.sequence += 1;
    }

    /// Follows parent indices from `index` back to the start and returns the nodes in
    /// start-to-`index` order.
    fn reverse_path(&self, index: usize) -> Vec<N> {
        let mut path: Vec<N> = std::iter::successors(Some(index), |&i| self.nodes[i].parent)
            .map(|i| self.nodes.get_index(i).map(|(node, _)| node.clone()))
            .collect::<Option<Vec<N>>>()
            .unwrap_or_default();
        path.reverse();
        path
    }

    /// Runs A* from `start` until `success` holds for a popped node or the open set runs dry.
    /// Successors that are already closed are ignored; an open successor is only updated when
    /// the new cost is strictly lower. Outdated heap entries are skipped when popped.
    pub fn astar<FN, IN, FH, FS>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
    ) -> Option<SearchResult<N, C>>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
    {
        self.nodes.clear();
        self.to_see.clear();
        self.sequence = 0;

        let h = heuristic(start);
        self.nodes.insert(
            start.clone(),
            SearchNode {
                parent: None,
                g: Zero::zero(),
                h,
                state: NodeState::Open,
            },
        );
        self.push(0, Zero::zero(), h);

        let mut expanded = 0;
        while let Some(SmallestCostHolder { index, .. }) = self.to_see.pop() {
            let (g, successors) = {
                let Some((node, entry)) = self.nodes.get_index_mut(index) else {
                    continue;
                };
                // A node may sit in the heap several times if a cheaper way to it was found;
                // only the first pop counts.
                if entry.state == NodeState::Closed {
                    continue;
                }
                if success(node) {
                    let cost = entry.g;
                    debug!("Search finished after expanding {} nodes", expanded);
                    return Some(SearchResult {
                        path: self.reverse_path(index),
                        cost,
                        expanded,
                    });
                }
                entry.state = NodeState::Closed;
                expanded += 1;
                let g = entry.g;
                (g, successors(node))
            };
            for (successor, move_cost) in successors {
                let new_cost = g + move_cost;
                let h; // heuristic(&successor)
                let n; // index for successor
                match self.nodes.entry(successor) {
                    Vacant(e) => {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert(SearchNode {
                            parent: Some(index),
                            g: new_cost,
                            h,
                            state: NodeState::Open,
                        });
                    }
                    Occupied(mut e) => {
                        let existing = e.get_mut();
                        if existing.state == NodeState::Open && existing.g > new_cost {
                            existing.g = new_cost;
                            existing.parent = Some(index);
                            h = existing.h;
                            n = e.index();
                        } else {
                            continue;
                        }
                    }
                }
                self.push(n, new_cost, h);
            }
        }
        debug!("Open set exhausted after expanding {} nodes", expanded);
        None
    }
}

/// Convenience wrapper running a single search with a fresh [SearchContext].
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    successors: FN,
    heuristic: FH,
    success: FS,
) -> Option<SearchResult<N, C>>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Add<Output = C> + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    SearchContext::new().astar(start, successors, heuristic, success)
}
