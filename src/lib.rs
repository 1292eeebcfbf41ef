//! # Hack Match Solver Library
//!
//! This library models the board of the stack-matching minigame and searches for
//! the shortest sequence of carrier moves that produces a match.
//!
//! It is used by three binaries:
//! - `ai_solver`: Reads a board file and prints the moves the solver would make.
//! - `human_player`: Lets you play moves on a board interactively and ask for hints.
//! - `solver_evaluator`: Runs the solver over seeded random boards and reports statistics.
//!
//! ## Modules
//! - `engine`: Items, the `Board` (columns plus the held slot), moves and match detection.
//! - `solver`: Iterative-deepening search with a per-depth visited-state cache.
//! - `heuristics`: Column ordering and the board-balancing fallback.
//! - `driver`: Traits for the live game's board source and input device, and one solve cycle.
//! - `utils`: Text formats for boards and move lists.
//! - `error`: The library's error type.

pub mod driver;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use error::{Result, SolverError};
