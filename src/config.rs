//! Game configuration. Defaults reproduce the shipped game: three questions on
//! a 10x10 grid with a 100 ms timer.

use crate::error::GameError;

pub const QUESTIONS: usize = 3;
pub const ROWS: usize = 10;
pub const COLUMNS: usize = 10;
pub const TICK_MS: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Rounds per session.
    pub questions: usize,
    pub rows: usize,
    pub columns: usize,
    /// Timer cadence; also the amount added to elapsed time per tick.
    pub tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            questions: QUESTIONS,
            rows: ROWS,
            columns: COLUMNS,
            tick_ms: TICK_MS,
        }
    }
}

impl GameConfig {
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.questions == 0 {
            return Err(GameError::Configuration("questions must be > 0".into()));
        }
        if self.rows == 0 || self.columns == 0 {
            return Err(GameError::Configuration(format!(
                "grid must be non-empty, got {}x{}",
                self.rows, self.columns
            )));
        }
        if self.tick_ms == 0 {
            return Err(GameError::Configuration("tick_ms must be > 0".into()));
        }
        Ok(())
    }
}
