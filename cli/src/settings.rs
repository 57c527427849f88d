use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use uncover_core::GameOptions;

use crate::Args;

/// Parameters for the game started when the session opens.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub rows: i32,
    pub cols: i32,
    pub mines: i32,
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            rows: 9,
            cols: 9,
            mines: 10,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameSettings,
    pub rules: GameOptions,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Command-line values win over the file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(rows) = args.rows {
            self.game.rows = rows;
        }
        if let Some(cols) = args.cols {
            self.game.cols = cols;
        }
        if let Some(mines) = args.mines {
            self.game.mines = mines;
        }
        if args.seed.is_some() {
            self.game.seed = args.seed;
        }
    }
}
