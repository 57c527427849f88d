use std::io::{self, BufRead, Write};

use serde::Serialize;
use serde_json::json;
use uncover_core::*;

use crate::command::{Command, USAGE};
use crate::render::render;
use crate::settings::Settings;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Terminal front-end: forwards player commands to the engine and prints what changed.
pub struct Session<W> {
    settings: Settings,
    format: OutputFormat,
    out: W,
    game: Option<Game>,
    base_seed: u64,
    games_started: u64,
}

impl<W: Write> Session<W> {
    pub fn new(settings: Settings, format: OutputFormat, out: W) -> Self {
        let base_seed = settings.game.seed.unwrap_or_else(rand::random);
        log::debug!("seed: {}", base_seed);
        Self {
            settings,
            format,
            out,
            game: None,
            base_seed,
            games_started: 0,
        }
    }

    /// Starts the configured game, then handles commands until `q` or end of input.
    pub fn run(&mut self, input: impl BufRead) -> io::Result<()> {
        let game = &self.settings.game;
        let (rows, cols, mines) = (game.rows, game.cols, game.mines);
        self.new_game(rows, cols, mines)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(err) => self.message(&format!("{err}. {USAGE}"))?,
            }
        }

        self.out.flush()
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        log::trace!("command: {:?}", command);
        match command {
            Command::Reveal(pos) => self.reveal(pos),
            Command::Flag(pos) => self.flag(pos),
            Command::NewGame(Some((rows, cols, mines))) => self.new_game(rows, cols, mines),
            Command::NewGame(None) => {
                let (rows, cols, mines) = match &self.game {
                    Some(game) => {
                        let config = game.config();
                        (
                            i32::from(config.nrows()),
                            i32::from(config.ncols()),
                            config.mines as i32,
                        )
                    }
                    None => {
                        let game = &self.settings.game;
                        (game.rows, game.cols, game.mines)
                    }
                };
                self.new_game(rows, cols, mines)
            }
            Command::Print => self.print_board(),
            Command::Help => self.message(USAGE),
            Command::Quit => Ok(()),
        }
    }

    fn new_game(&mut self, rows: i32, cols: i32, mines: i32) -> io::Result<()> {
        let config = match GameConfig::new(rows, cols, mines) {
            Ok(config) => config,
            Err(err) => {
                log::debug!("Rejected new game {}x{} with {} mines: {:?}", rows, cols, mines, err);
                return self.validation_error(err);
            }
        };

        let seed = self.base_seed.wrapping_add(self.games_started);
        self.games_started += 1;
        let game = Game::new(
            config,
            RandomMinefieldGenerator::new(seed),
            self.settings.rules,
        );
        match game {
            Ok(game) => self.game = Some(game),
            Err(err) => return self.validation_error(err),
        }

        match self.format {
            OutputFormat::Text => {
                self.message(&format!(
                    "New game: {rows}x{cols} with {mines} mines. {USAGE}"
                ))?;
                self.print_board()
            }
            OutputFormat::Json => self.emit(&json!({
                "event": "game_started",
                "rows": rows,
                "cols": cols,
                "mines": mines,
            })),
        }
    }

    fn reveal(&mut self, pos: Position) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return self.no_game();
        };
        if !game.config().contains(pos) {
            return self.out_of_bounds(pos);
        }

        let reveal = match game.reveal(pos) {
            Ok(reveal) => reveal,
            Err(err) => {
                log::error!("Reveal at {:?} failed: {}", pos, err);
                return self.message(&err.to_string());
            }
        };
        let finished = game.is_finished();

        match self.format {
            OutputFormat::Json => {
                if reveal.outcome == RevealOutcome::Ignored {
                    self.emit(&json!({ "event": "ignored", "pos": pos }))?;
                }
                for event in &reveal.events {
                    self.emit(event)?;
                }
                Ok(())
            }
            OutputFormat::Text => {
                if reveal.outcome == RevealOutcome::Ignored {
                    return if finished {
                        self.message("The game is over. Start a new one with `n`.")
                    } else {
                        self.message(&format!("Cell ({}, {}) is flagged.", pos.0, pos.1))
                    };
                }
                self.print_board()?;
                for event in &reveal.events {
                    match event {
                        GameEvent::GameWon { moves } => {
                            self.message(&format!("Victory! Total moves: {moves}"))?
                        }
                        GameEvent::GameLost { moves } => {
                            self.message(&format!("Game Over! Total Moves: {moves}"))?
                        }
                        _ => {}
                    }
                }
                Ok(())
            }
        }
    }

    fn flag(&mut self, pos: Position) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return self.no_game();
        };
        if !game.config().contains(pos) {
            return self.out_of_bounds(pos);
        }

        let outcome = match game.toggle_flag(pos) {
            Ok(outcome) => outcome,
            Err(err) => return self.message(&err.to_string()),
        };

        match (self.format, outcome.flag_value()) {
            (OutputFormat::Json, Some(flagged)) => self.emit(&json!({
                "event": "flag_toggled",
                "pos": pos,
                "flagged": flagged,
            })),
            (OutputFormat::Json, None) => self.emit(&json!({ "event": "ignored", "pos": pos })),
            (OutputFormat::Text, Some(_)) => self.print_board(),
            (OutputFormat::Text, None) => {
                self.message(&format!("Cell ({}, {}) cannot be flagged.", pos.0, pos.1))
            }
        }
    }

    fn print_board(&mut self) -> io::Result<()> {
        let Some(game) = &self.game else {
            return self.no_game();
        };
        let view = game.view();
        let mines_left = game.mines_left();

        match self.format {
            OutputFormat::Text => {
                write!(self.out, "{}", render(&view))?;
                writeln!(
                    self.out,
                    "Mines left: {mines_left}  Moves: {}",
                    view.move_count
                )
            }
            OutputFormat::Json => self.emit(&view),
        }
    }

    fn validation_error(&mut self, err: GameError) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => self.message(&err.to_string()),
            OutputFormat::Json => self.emit(&json!({
                "event": "validation_error",
                "message": err.to_string(),
            })),
        }
    }

    fn out_of_bounds(&mut self, pos: Position) -> io::Result<()> {
        self.message(&format!(
            "Position ({}, {}) is outside the board.",
            pos.0, pos.1
        ))
    }

    fn no_game(&mut self) -> io::Result<()> {
        self.message("No game in progress. Start one with `n <rows> <cols> <mines>`.")
    }

    fn message(&mut self, text: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{text}"),
            OutputFormat::Json => self.emit(&json!({ "event": "message", "text": text })),
        }
    }

    fn emit(&mut self, value: &impl Serialize) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        writeln!(self.out)
    }
}
