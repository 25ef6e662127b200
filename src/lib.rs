//! 8-puzzle solving engine with an HTTP API.
//!
//! The core is an A* search over the 3x3 sliding-tile state graph with the
//! Manhattan-distance heuristic. [`scramble`] produces solvable start states
//! by random legal walks from the goal, and [`server`] exposes both over
//! HTTP for the web frontend.

pub mod error;
pub mod puzzle;
pub mod scramble;
pub mod search;
pub mod server;

pub use error::{PuzzleError, ServeError};
pub use puzzle::{Move, State, StateKey, GOAL};
pub use scramble::{scramble, scramble_with};
pub use search::{solve, Solution};
