use rand::Rng;

use crate::board::{Board, Direction};
use crate::cellset::CellSet;
use crate::common::BoardError;
use crate::config::INITIAL_TILES;

/// Serializable overall game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub board: Board,
    pub score: u64,
    pub best: u64,
}

/// Outcome of one call to [`Game::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Whether the move changed the board and was committed.
    pub moved: bool,
    /// Points gained by this move's merges.
    pub score_delta: u32,
    /// Position of the tile spawned after the move, if any.
    pub spawned: Option<(usize, usize)>,
    /// Whether the game is over after this step.
    pub game_over: bool,
}

/// A running game: board, scores and the transient per-move state a
/// renderer needs to highlight merges and spawns.
///
/// Moves are applied atomically and in order. The tile spawn happens
/// after the move it follows is committed and before the next move is
/// accepted; an illegal move commits nothing and touches nothing.
#[derive(Debug)]
pub struct Game {
    board: Board,
    score: u64,
    best: u64,
    merged: CellSet,
    last_spawn: Option<(usize, usize)>,
    over: bool,
}

impl Game {
    /// Create a game on an empty `size`×`size` board seeded with two
    /// random tiles.
    pub fn new<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, BoardError> {
        let mut game = Game {
            board: Board::empty(size)?,
            score: 0,
            best: 0,
            merged: CellSet::new(size),
            last_spawn: None,
            over: false,
        };
        game.seed(rng);
        Ok(game)
    }

    fn seed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for _ in 0..INITIAL_TILES {
            if let Some(spawn) = self.board.with_random_tile(rng) {
                self.board = spawn.board;
            }
        }
        self.over = self.board.is_game_over();
    }

    /// Apply one move. Commits the slide, accumulates the score, spawns
    /// a tile on the new board and re-evaluates the terminal state.
    pub fn step<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> Step {
        if self.over {
            return Step {
                moved: false,
                score_delta: 0,
                spawned: None,
                game_over: true,
            };
        }
        let result = self.board.shift(direction);
        if result.board == self.board {
            // illegal move: nothing committed, transient state untouched
            return Step {
                moved: false,
                score_delta: 0,
                spawned: None,
                game_over: false,
            };
        }
        self.board = result.board;
        self.merged = result.merged;
        self.score += u64::from(result.score_delta);
        if self.score > self.best {
            self.best = self.score;
        }
        // spawn strictly after the move is committed
        let spawned = match self.board.with_random_tile(rng) {
            Some(spawn) => {
                let pos = spawn.position;
                self.board = spawn.board;
                Some(pos)
            }
            None => None,
        };
        self.last_spawn = spawned;
        self.over = self.board.is_game_over();
        Step {
            moved: true,
            score_delta: result.score_delta,
            spawned,
            game_over: self.over,
        }
    }

    /// Start over on a fresh board of the same size. The best score
    /// survives the reset; everything else is cleared and reseeded.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board = self.board.cleared();
        self.score = 0;
        self.merged.clear_all();
        self.last_spawn = None;
        self.over = false;
        self.seed(rng);
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Running score: the sum of every committed move's merge values.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Highest score reached across resets.
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Cells merged by the latest committed move.
    pub fn merged(&self) -> &CellSet {
        &self.merged
    }

    /// Tile position spawned by the latest committed move.
    pub fn last_spawn(&self) -> Option<(usize, usize)> {
        self.last_spawn
    }

    /// Whether no legal move remains.
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Generate a serializable snapshot of the current state.
    pub fn state(&self) -> GameState {
        GameState {
            board: self.board.clone(),
            score: self.score,
            best: self.best,
        }
    }

    /// Restore a game from a previously saved state.
    ///
    /// The board shape is validated and the terminal flag recomputed.
    /// Tile values are not checked; strict callers can run
    /// [`Board::check_tiles`] on the snapshot first.
    pub fn from_state(state: GameState) -> Result<Self, BoardError> {
        state.board.check_shape()?;
        let size = state.board.size();
        let over = state.board.is_game_over();
        Ok(Game {
            best: state.best.max(state.score),
            score: state.score,
            merged: CellSet::new(size),
            last_spawn: None,
            over,
            board: state.board,
        })
    }
}
