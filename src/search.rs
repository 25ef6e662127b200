use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::puzzle::{Move, State, StateKey, GOAL};

/// One node of the search tree. Nodes live in an arena and refer to their
/// parent by index, so reconstruction is a plain walk with no shared
/// ownership. `g` increases by exactly 1 along every parent edge.
struct SearchNode {
    state: State,
    g: u32,
    parent: Option<usize>,
    mv: Option<Move>,
}

/// Open-list entry: `f = g + h`, ties broken by smaller `h` (greedier
/// toward the goal when total estimates tie).
struct OpenEntry {
    f: u32,
    h: u32,
    g: u32,
    node: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reversed so the smallest (f, h) surfaces.
        (other.f, other.h).cmp(&(self.f, self.h))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// Min-priority frontier over open-list entries. There is no decrease-key:
/// a state may carry several entries and stale ones are filtered at
/// extraction time by the driver.
struct Frontier {
    heap: BinaryHeap<OpenEntry>,
}

impl Frontier {
    fn new() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
        }
    }

    fn push(&mut self, entry: OpenEntry) {
        self.heap.push(entry);
    }

    fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop()
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Result of one `solve` call. `path` runs from the start state to the
/// goal inclusive; `actions[i]` turns `path[i]` into `path[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub path: Vec<State>,
    pub actions: Vec<Move>,
    pub expanded: usize,
    pub found: bool,
}

impl Solution {
    pub fn cost(&self) -> usize {
        self.actions.len()
    }
}

/// A* over the 8-puzzle state graph with the Manhattan-distance heuristic.
///
/// Each call is independent: the frontier, best-cost map and closed set are
/// local and dropped on return. A start unreachable from the goal exhausts
/// the reachable half of the permutation space and reports `found = false`.
pub fn solve(start: State) -> Solution {
    let h0 = start.manhattan();
    let mut arena = vec![SearchNode {
        state: start,
        g: 0,
        parent: None,
        mv: None,
    }];

    let mut open = Frontier::new();
    open.push(OpenEntry {
        f: h0,
        h: h0,
        g: 0,
        node: 0,
    });

    let mut g_score: HashMap<StateKey, u32> = HashMap::new();
    g_score.insert(start.key(), 0);
    let mut closed: HashSet<StateKey> = HashSet::new();

    let mut expanded = 0usize;

    while !open.is_empty() {
        let Some(entry) = open.pop() else { break };
        let current = entry.node;
        let state = arena[current].state;
        let key = state.key();

        // A cheaper entry for this state was already expanded, or was
        // pushed after this one. Without decrease-key this filter is
        // load-bearing, not cleanup.
        if closed.contains(&key) || g_score.get(&key).is_some_and(|&best| entry.g > best) {
            continue;
        }

        expanded += 1;

        if state == GOAL {
            return reconstruct(&arena, current, expanded);
        }

        closed.insert(key);

        let tentative_g = arena[current].g + 1;
        for (next, mv) in state.neighbors() {
            let next_key = next.key();
            if closed.contains(&next_key) {
                continue;
            }
            if g_score
                .get(&next_key)
                .is_some_and(|&best| tentative_g >= best)
            {
                continue;
            }
            g_score.insert(next_key, tentative_g);
            let h = next.manhattan();
            arena.push(SearchNode {
                state: next,
                g: tentative_g,
                parent: Some(current),
                mv: Some(mv),
            });
            open.push(OpenEntry {
                f: tentative_g + h,
                h,
                g: tentative_g,
                node: arena.len() - 1,
            });
        }
    }

    Solution {
        path: Vec::new(),
        actions: Vec::new(),
        expanded,
        found: false,
    }
}

fn reconstruct(arena: &[SearchNode], goal_index: usize, expanded: usize) -> Solution {
    let mut path = Vec::new();
    let mut actions = Vec::new();
    let mut cursor = Some(goal_index);
    while let Some(i) = cursor {
        let node = &arena[i];
        path.push(node.state);
        if let Some(mv) = node.mv {
            actions.push(mv);
        }
        cursor = node.parent;
    }
    path.reverse();
    actions.reverse();
    Solution {
        path,
        actions,
        expanded,
        found: true,
    }
}
