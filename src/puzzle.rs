use std::fmt;

use serde::Serialize;

use crate::error::PuzzleError;

/// Canonical byte encoding of a state, used as the hash-map key for
/// best-cost and closed-set tracking during search. The tile array itself
/// is total and injective over valid states.
pub type StateKey = [u8; 9];

/// The solved configuration: tiles in order, blank last.
pub const GOAL: State = State([1, 2, 3, 4, 5, 6, 7, 8, 0]);

/// Direction the blank moves in a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "UP",
            Move::Down => "DOWN",
            Move::Left => "LEFT",
            Move::Right => "RIGHT",
        };
        write!(f, "{}", s)
    }
}

/// A 3x3 board as a flat row-major array; 0 is the blank.
///
/// States are immutable values: every transform returns a fresh state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct State([u8; 9]);

impl State {
    /// Wrap a tile array. The caller guarantees a valid permutation of
    /// 0..=8; untrusted input goes through `TryFrom<&[i64]>` instead.
    pub fn new(tiles: [u8; 9]) -> Self {
        State(tiles)
    }

    pub fn tiles(&self) -> [u8; 9] {
        self.0
    }

    pub fn key(&self) -> StateKey {
        self.0
    }

    pub fn is_goal(&self) -> bool {
        *self == GOAL
    }

    /// New state with positions `i` and `j` exchanged; `self` is untouched.
    pub fn swap(&self, i: usize, j: usize) -> State {
        let mut tiles = self.0;
        tiles.swap(i, j);
        State(tiles)
    }

    fn blank_index(&self) -> usize {
        self.0.iter().position(|&v| v == 0).unwrap_or(0)
    }

    /// Legal single-step transitions, emitted in the fixed order
    /// UP, DOWN, LEFT, RIGHT. Corners yield 2, edges 3, the center 4.
    pub fn neighbors(&self) -> Vec<(State, Move)> {
        let blank = self.blank_index();
        let (row, col) = (blank / 3, blank % 3);
        let mut out = Vec::with_capacity(4);
        if row > 0 {
            out.push((self.swap(blank, blank - 3), Move::Up));
        }
        if row < 2 {
            out.push((self.swap(blank, blank + 3), Move::Down));
        }
        if col > 0 {
            out.push((self.swap(blank, blank - 1), Move::Left));
        }
        if col < 2 {
            out.push((self.swap(blank, blank + 1), Move::Right));
        }
        out
    }

    /// Sum of grid distances from each non-blank tile to its goal cell.
    /// Admissible and consistent for unit-cost sliding moves.
    pub fn manhattan(&self) -> u32 {
        let mut sum = 0u32;
        for (i, &v) in self.0.iter().enumerate() {
            if v == 0 {
                continue;
            }
            let goal = (v - 1) as usize;
            let dr = (i / 3).abs_diff(goal / 3);
            let dc = (i % 3).abs_diff(goal % 3);
            sum += (dr + dc) as u32;
        }
        sum
    }

    /// Inversion-parity solvability check (odd-width rule: solvable iff the
    /// inversion count is even). Advisory only; the search itself treats an
    /// unsolvable start as a normal found-nothing outcome.
    pub fn is_solvable(&self) -> bool {
        self.inversions() % 2 == 0
    }

    fn inversions(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != 0)
            .map(|(i, &val)| {
                self.0[i + 1..]
                    .iter()
                    .filter(|&&next| next != 0 && next < val)
                    .count()
            })
            .sum()
    }
}

impl TryFrom<&[i64]> for State {
    type Error = PuzzleError;

    fn try_from(values: &[i64]) -> Result<Self, Self::Error> {
        if values.len() != 9 {
            return Err(PuzzleError::WrongLength(values.len()));
        }
        let mut tiles = [0u8; 9];
        let mut seen = [false; 9];
        for (i, &v) in values.iter().enumerate() {
            if !(0..=8).contains(&v) || seen[v as usize] {
                return Err(PuzzleError::NotAPermutation);
            }
            seen[v as usize] = true;
            tiles[i] = v as u8;
        }
        Ok(State(tiles))
    }
}

impl std::str::FromStr for State {
    type Err = PuzzleError;

    /// Parses the comma-separated form, e.g. `1,2,3,4,5,6,7,0,8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|tok| {
                let tok = tok.trim();
                tok.parse::<i64>()
                    .map_err(|_| PuzzleError::BadToken(tok.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        State::try_from(values.as_slice())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.chunks(3) {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_is_a_valid_state() {
        assert!(GOAL.is_goal());
        assert!(GOAL.is_solvable());
        assert_eq!(GOAL.manhattan(), 0);
    }

    #[test]
    fn swap_returns_a_new_state() {
        let swapped = GOAL.swap(7, 8);
        assert_eq!(GOAL.tiles(), [1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(swapped.tiles(), [1, 2, 3, 4, 5, 6, 7, 0, 8]);
    }

    #[test]
    fn neighbor_counts_follow_blank_position() {
        let corners = [0, 2, 6, 8];
        let edges = [1, 3, 5, 7];
        for pos in corners {
            let state = GOAL.swap(8, pos);
            assert_eq!(state.neighbors().len(), 2, "corner blank at {pos}");
        }
        for pos in edges {
            let state = GOAL.swap(8, pos);
            assert_eq!(state.neighbors().len(), 3, "edge blank at {pos}");
        }
        let center = GOAL.swap(8, 4);
        assert_eq!(center.neighbors().len(), 4);
    }

    #[test]
    fn neighbors_differ_in_exactly_two_adjacent_cells() {
        let state = State::new([4, 1, 3, 0, 2, 5, 7, 8, 6]);
        for (next, _) in state.neighbors() {
            let diffs: Vec<usize> = (0..9)
                .filter(|&i| state.tiles()[i] != next.tiles()[i])
                .collect();
            assert_eq!(diffs.len(), 2);
            let (a, b) = (diffs[0], diffs[1]);
            let adjacent = (b - a == 3) || (b - a == 1 && a / 3 == b / 3);
            assert!(adjacent, "cells {a} and {b} are not grid-adjacent");
            assert!(state.tiles()[a] == 0 || state.tiles()[b] == 0);
        }
    }

    #[test]
    fn neighbor_emission_order_is_fixed() {
        let center = GOAL.swap(8, 4);
        let moves: Vec<Move> = center.neighbors().into_iter().map(|(_, m)| m).collect();
        assert_eq!(moves, vec![Move::Up, Move::Down, Move::Left, Move::Right]);
    }

    #[test]
    fn manhattan_counts_every_misplaced_tile() {
        // One move from goal: only tile 8 is displaced.
        assert_eq!(State::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).manhattan(), 1);
        // Tiles 2 and 6 each one cell away, blank excluded.
        assert_eq!(State::new([1, 2, 3, 4, 0, 5, 7, 8, 6]).manhattan(), 2);
    }

    #[test]
    fn adjacent_value_swap_breaks_parity() {
        let state = State::new([2, 1, 3, 4, 5, 6, 7, 8, 0]);
        assert!(!state.is_solvable());
    }

    #[test]
    fn try_from_rejects_bad_input() {
        assert_eq!(
            State::try_from([1i64, 2, 3].as_slice()),
            Err(PuzzleError::WrongLength(3))
        );
        assert_eq!(
            State::try_from([1i64, 1, 3, 4, 5, 6, 7, 8, 0].as_slice()),
            Err(PuzzleError::NotAPermutation)
        );
        assert_eq!(
            State::try_from([1i64, 2, 3, 4, 5, 6, 7, 8, 9].as_slice()),
            Err(PuzzleError::NotAPermutation)
        );
        assert_eq!(
            State::try_from([-1i64, 2, 3, 4, 5, 6, 7, 8, 0].as_slice()),
            Err(PuzzleError::NotAPermutation)
        );
    }

    #[test]
    fn parses_comma_separated_states() {
        let state: State = "1, 2, 3, 4, 5, 6, 7, 0, 8".parse().unwrap();
        assert_eq!(state.tiles(), [1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert!(matches!(
            "1,2,x".parse::<State>(),
            Err(PuzzleError::BadToken(_))
        ));
    }

    #[test]
    fn move_labels_serialize_uppercase() {
        assert_eq!(serde_json::to_string(&Move::Up).unwrap(), "\"UP\"");
        assert_eq!(Move::Left.to_string(), "LEFT");
        assert_eq!(Move::Left.opposite(), Move::Right);
        assert_eq!(Move::Down.opposite(), Move::Up);
    }
}
