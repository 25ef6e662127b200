use std::collections::{HashMap, VecDeque};
use std::sync::OnceLock;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use eight_puzzle::puzzle::{State, StateKey, GOAL};
use eight_puzzle::scramble::scramble_with;
use eight_puzzle::search::solve;

/// Exhaustive BFS from the goal over the reachable half of the permutation
/// space. Moves are symmetric, so the distance from the goal to a state is
/// the true optimal solve cost of that state.
fn goal_distances() -> &'static HashMap<StateKey, usize> {
    static DISTANCES: OnceLock<HashMap<StateKey, usize>> = OnceLock::new();
    DISTANCES.get_or_init(|| {
        let mut dist = HashMap::new();
        let mut queue = VecDeque::new();
        dist.insert(GOAL.key(), 0usize);
        queue.push_back(GOAL);
        while let Some(state) = queue.pop_front() {
            let d = dist[&state.key()];
            for (next, _) in state.neighbors() {
                if !dist.contains_key(&next.key()) {
                    dist.insert(next.key(), d + 1);
                    queue.push_back(next);
                }
            }
        }
        dist
    })
}

#[test]
fn reachable_space_is_half_of_all_permutations() {
    // 9! / 2
    assert_eq!(goal_distances().len(), 181_440);
}

#[test]
fn solve_cost_matches_brute_force_bfs() {
    for seed in 0..30u64 {
        let steps = 5 + (seed as usize % 20);
        let start = scramble_with(&mut ChaCha8Rng::seed_from_u64(seed), steps);
        let solution = solve(start);
        assert!(solution.found, "seed {seed}");
        let optimal = goal_distances()[&start.key()];
        assert_eq!(solution.cost(), optimal, "seed {seed}, start {:?}", start);
    }
}

#[test]
fn heuristic_never_overestimates_true_distance() {
    for (i, (key, &dist)) in goal_distances().iter().enumerate() {
        if i % 97 != 0 {
            continue;
        }
        let state = State::new(*key);
        assert!(
            state.manhattan() as usize <= dist,
            "manhattan {} exceeds true distance {} for {:?}",
            state.manhattan(),
            dist,
            state
        );
    }
}

#[test]
fn solved_path_replays_move_by_move() {
    let start = scramble_with(&mut ChaCha8Rng::seed_from_u64(1234), 25);
    let solution = solve(start);
    assert!(solution.found);
    assert_eq!(solution.path.len(), solution.actions.len() + 1);
    assert_eq!(*solution.path.first().unwrap(), start);
    assert_eq!(*solution.path.last().unwrap(), GOAL);
    for (i, &mv) in solution.actions.iter().enumerate() {
        let stepped = solution.path[i]
            .neighbors()
            .into_iter()
            .find(|&(_, m)| m == mv)
            .map(|(s, _)| s);
        assert_eq!(stepped, Some(solution.path[i + 1]), "action {i} ({mv})");
    }
}

#[test]
fn unsolvable_start_exhausts_the_reachable_space() {
    // One adjacent-value swap from the goal flips permutation parity, so
    // the goal's component is unreachable.
    let start = State::new([2, 1, 3, 4, 5, 6, 7, 8, 0]);
    let solution = solve(start);
    assert!(!solution.found);
    assert!(solution.path.is_empty());
    assert!(solution.actions.is_empty());
    assert_eq!(solution.expanded, 181_440);
}
