use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Playing
/// - Ready -> Won
/// - Ready -> Lost
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Board created, mines not placed yet
    Ready,
    /// Mines placed and at least one cell opened
    Playing,
    /// Every safe cell opened
    Won,
    /// A mine was opened
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// No further moves are accepted.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Rule switches for behavior where conventions differ.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Whether revealing an already opened cell still counts as a move.
    pub count_noop_reveals: bool,
    pub flag_rule: FlagRule,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            count_noop_reveals: true,
            flag_rule: FlagRule::Ignore,
        }
    }
}

/// Notification for the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    CellOpened { pos: Position, count: u8 },
    CellExploded { pos: Position },
    GameWon { moves: u32 },
    GameLost { moves: u32 },
}

/// Result of a reveal request: what happened to the cell, where the game went, and what to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub outcome: RevealOutcome,
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

/// Represents a game from start to finish.
#[derive(Clone, Debug)]
pub struct Game<G = RandomMinefieldGenerator> {
    board: Board,
    generator: G,
    options: GameOptions,
    state: GameState,
    move_count: u32,
    exploded_at: Option<Position>,
}

impl Game<RandomMinefieldGenerator> {
    /// Validates raw new-game parameters and sets up a game with randomly placed mines.
    pub fn start_game(nrows: i32, ncols: i32, nmines: i32, seed: u64) -> Result<Self> {
        let config = GameConfig::new(nrows, ncols, nmines)?;
        Self::new(
            config,
            RandomMinefieldGenerator::new(seed),
            GameOptions::default(),
        )
    }
}

impl<G: MinefieldGenerator> Game<G> {
    pub fn new(config: GameConfig, generator: G, options: GameOptions) -> Result<Self> {
        let board = Board::new(config)?;
        log::debug!(
            "New game on {:?} with {} mines, {:?}",
            config.size,
            config.mines,
            options
        );
        Ok(Self {
            board,
            generator,
            options,
            state: GameState::Ready,
            move_count: 0,
            exploded_at: None,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn config(&self) -> GameConfig {
        self.board.config()
    }

    pub fn options(&self) -> GameOptions {
        self.options
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.board.mine_count()) - i64::from(self.board.flagged_count())
    }

    /// The mine that ended the game, if it was lost.
    pub fn exploded_at(&self) -> Option<Position> {
        self.exploded_at
    }

    pub fn view(&self) -> BoardView {
        BoardView::from_game(self)
    }

    /// Reveals a cell. The first accepted reveal places the mines, keeping that cell safe.
    pub fn reveal(&mut self, coords: Position) -> Result<Reveal> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() {
            log::debug!("Ignoring reveal at {:?}, game already ended", coords);
            return Ok(self.report(RevealOutcome::Ignored, Vec::new()));
        }
        if self.options.flag_rule.blocks_reveal() && self.board.cell(coords).is_flagged {
            log::debug!("Ignoring reveal at {:?}, cell is flagged", coords);
            return Ok(self.report(RevealOutcome::Ignored, Vec::new()));
        }

        if self.state.is_ready() {
            let layout = self.generator.generate(self.board.config(), coords)?;
            self.board.lay_mines(&layout)?;
        }

        let outcome = reveal(&mut self.board, coords, self.options.flag_rule)?;
        if outcome != RevealOutcome::AlreadyOpen || self.options.count_noop_reveals {
            self.move_count += 1;
        }

        let mut events = self.opened_events(coords, &outcome);
        if outcome == RevealOutcome::Exploded {
            self.exploded_at = Some(coords);
            self.transition(GameState::Lost);
            events.push(GameEvent::GameLost {
                moves: self.move_count,
            });
        } else if self.board.is_cleared() {
            self.transition(GameState::Won);
            events.push(GameEvent::GameWon {
                moves: self.move_count,
            });
        } else if outcome.has_update() {
            self.transition(GameState::Playing);
        }

        Ok(self.report(outcome, events))
    }

    /// Flips the flag on an unopened cell. No-op once the cell is opened or the game ended.
    pub fn toggle_flag(&mut self, coords: Position) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let outcome = self.board.toggle_flag(coords);
        log::debug!("Flag toggle at {:?}: {:?}", coords, outcome);
        Ok(outcome)
    }

    fn opened_events(&self, coords: Position, outcome: &RevealOutcome) -> Vec<GameEvent> {
        match outcome {
            RevealOutcome::Exploded => Vec::from([GameEvent::CellExploded { pos: coords }]),
            RevealOutcome::Opened(count) => Vec::from([GameEvent::CellOpened {
                pos: coords,
                count: *count,
            }]),
            RevealOutcome::OpenedCascade(opened) => opened
                .iter()
                .map(|&pos| GameEvent::CellOpened {
                    pos,
                    count: self.board.adjacent_mines(pos),
                })
                .collect(),
            RevealOutcome::AlreadyOpen | RevealOutcome::Ignored => Vec::new(),
        }
    }

    fn transition(&mut self, next: GameState) {
        if self.state != next {
            log::debug!("Game state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn report(&self, outcome: RevealOutcome, events: Vec<GameEvent>) -> Reveal {
        Reveal {
            outcome,
            state: self.state,
            events,
        }
    }
}
