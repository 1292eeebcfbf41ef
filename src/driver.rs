//! Glue between the solver and the live game.
//!
//! The game is read and controlled through two traits: a `BoardSource` that
//! yields decoded snapshots and an `InputSink` that presses keys. Screen capture,
//! window handling and frame pacing live in the implementations of these traits,
//! not here.
use crate::engine::{Board, Move, MoveKind};
use crate::error::Result;
use crate::solver::{solve, Solution, SolverConfig};
use crate::utils::format_moves;

/// A decoded frame: the board plus the column the carrier is under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub carrier_column: usize,
    pub board: Board,
}

/// A single key press understood by the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Left,
    Right,
    /// Grab or release: draws when empty-handed, places when holding.
    Grab,
    Swap,
}

/// Produces board snapshots.
pub trait BoardSource {
    /// Returns the current board, or `None` if this frame could not be decoded.
    fn snapshot(&mut self) -> Option<Snapshot>;
}

/// Sends inputs to the game.
pub trait InputSink {
    fn send(&mut self, input: Input) -> Result<()>;
}

/// Translates moves into key presses, starting with the carrier at `start_column`.
///
/// Before each move the carrier is stepped left or right to the move's column.
/// Draws and places are both a `Grab`; swaps are a `Swap`.
///
/// # Examples
/// ```
/// use hackmatch_solver::driver::{plan_inputs, Input};
/// use hackmatch_solver::engine::Move;
///
/// let inputs = plan_inputs(2, &[Move::draw(0), Move::swap(1)]);
/// assert_eq!(
///     inputs,
///     vec![Input::Left, Input::Left, Input::Grab, Input::Right, Input::Swap]
/// );
/// ```
pub fn plan_inputs(start_column: usize, moves: &[Move]) -> Vec<Input> {
    let mut inputs = Vec::new();
    let mut column = start_column;
    for mv in moves {
        while column < mv.column {
            inputs.push(Input::Right);
            column += 1;
        }
        while column > mv.column {
            inputs.push(Input::Left);
            column -= 1;
        }
        inputs.push(match mv.kind {
            MoveKind::Draw | MoveKind::Place => Input::Grab,
            MoveKind::Swap => Input::Swap,
        });
    }
    inputs
}

/// Runs one read-solve-act cycle.
///
/// # Returns
/// * `Ok(None)` if the source had no usable snapshot; nothing is sent.
/// * `Ok(Some(solution))` once every input for the solution has been sent.
/// * `Err` as soon as the sink rejects an input.
pub fn run_cycle<S, K>(source: &mut S, sink: &mut K, config: &SolverConfig) -> Result<Option<Solution>>
where
    S: BoardSource + ?Sized,
    K: InputSink + ?Sized,
{
    let Some(snapshot) = source.snapshot() else {
        tracing::warn!("no board snapshot this cycle");
        return Ok(None);
    };
    let solution = solve(&snapshot.board, config);
    tracing::info!(
        outcome = ?solution.outcome,
        moves = %format_moves(&solution.moves),
        "planned moves"
    );
    for input in plan_inputs(snapshot.carrier_column, &solution.moves) {
        sink.send(input)?;
    }
    Ok(Some(solution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Item;
    use crate::error::SolverError;
    use crate::solver::Outcome;
    use crate::utils::board_from_str_array;

    struct FixedSource(Option<Snapshot>);

    impl BoardSource for FixedSource {
        fn snapshot(&mut self) -> Option<Snapshot> {
            self.0.take()
        }
    }

    #[derive(Default)]
    struct Recorder {
        inputs: Vec<Input>,
        fail_after: Option<usize>,
    }

    impl InputSink for Recorder {
        fn send(&mut self, input: Input) -> Result<()> {
            if self.fail_after == Some(self.inputs.len()) {
                return Err(SolverError::Input("device unplugged".to_string()));
            }
            self.inputs.push(input);
            Ok(())
        }
    }

    #[test]
    fn test_plan_inputs_empty() {
        assert!(plan_inputs(3, &[]).is_empty());
    }

    #[test]
    fn test_plan_inputs_tracks_carrier() {
        let moves = [Move::draw(4), Move::place(4), Move::swap(6), Move::place(0)];
        assert_eq!(
            plan_inputs(3, &moves),
            vec![
                Input::Right,
                Input::Grab,
                Input::Grab,
                Input::Right,
                Input::Right,
                Input::Swap,
                Input::Left,
                Input::Left,
                Input::Left,
                Input::Left,
                Input::Left,
                Input::Left,
                Input::Grab,
            ]
        );
    }

    #[test]
    fn test_run_cycle_sends_planned_inputs() {
        let board = Board::from_columns(&[vec![Item::Yellow; 3]], Item::Yellow).unwrap();
        let mut source = FixedSource(Some(Snapshot {
            carrier_column: 3,
            board,
        }));
        let mut sink = Recorder::default();
        let solution = run_cycle(&mut source, &mut sink, &SolverConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(solution.outcome, Outcome::Match);
        assert_eq!(solution.moves, vec![Move::place(1)]);
        assert_eq!(sink.inputs, vec![Input::Left, Input::Left, Input::Grab]);
    }

    #[test]
    fn test_run_cycle_without_snapshot() {
        let mut source = FixedSource(None);
        let mut sink = Recorder::default();
        let result = run_cycle(&mut source, &mut sink, &SolverConfig::default()).unwrap();
        assert!(result.is_none());
        assert!(sink.inputs.is_empty());
    }

    #[test]
    fn test_run_cycle_idle_board_sends_nothing() {
        let mut source = FixedSource(Some(Snapshot {
            carrier_column: 0,
            board: Board::new_empty(),
        }));
        let mut sink = Recorder::default();
        let solution = run_cycle(&mut source, &mut sink, &SolverConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(solution.outcome, Outcome::Idle);
        assert!(sink.inputs.is_empty());
    }

    #[test]
    fn test_run_cycle_propagates_sink_error() {
        let board = board_from_str_array(&["r.r.... .", "r......", "r......", "g......"]).unwrap();
        let mut source = FixedSource(Some(Snapshot {
            carrier_column: 2,
            board,
        }));
        let mut sink = Recorder {
            fail_after: Some(1),
            ..Default::default()
        };
        let result = run_cycle(&mut source, &mut sink, &SolverConfig::default());
        assert!(matches!(result, Err(SolverError::Input(_))));
        assert_eq!(sink.inputs, vec![Input::Grab]);
    }
}
