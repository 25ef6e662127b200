use rand::seq::SliceRandom;
use rand::Rng;

use crate::puzzle::{Move, State, GOAL};

/// Random legal-move walk from the goal, returning the scramble state and
/// the moves taken. The reversal of the previous move is filtered out so
/// the walk does not immediately undo itself; if filtering ever emptied the
/// candidates the full neighbor list is used instead. Every blank position
/// on a 3x3 board has at least two neighbors, so the fallback cannot fire,
/// but it keeps the choice total.
fn walk<R: Rng + ?Sized>(rng: &mut R, steps: usize) -> (State, Vec<Move>) {
    let mut state = GOAL;
    let mut moves = Vec::with_capacity(steps);
    let mut last_move: Option<Move> = None;

    for _ in 0..steps {
        let all = state.neighbors();
        let filtered: Vec<(State, Move)> = all
            .iter()
            .copied()
            .filter(|&(_, mv)| last_move.map_or(true, |last| mv != last.opposite()))
            .collect();
        let pool = if filtered.is_empty() { &all } else { &filtered };
        if let Some(&(next, mv)) = pool.choose(rng) {
            state = next;
            moves.push(mv);
            last_move = Some(mv);
        }
    }

    (state, moves)
}

/// Scramble with an explicit random source, so callers can seed for
/// reproducibility. The result is reachable from the goal in at most
/// `steps` legal moves, hence always solvable.
pub fn scramble_with<R: Rng + ?Sized>(rng: &mut R, steps: usize) -> State {
    walk(rng, steps).0
}

/// Scramble using the thread-local random source.
pub fn scramble(steps: usize) -> State {
    scramble_with(&mut rand::thread_rng(), steps)
}
