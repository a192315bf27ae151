//! Round engine: session setup, per-round grid generation, answer checking and
//! the elapsed-time counter.
//!
//! The engine performs no rendering and no audio; the presentation layer calls
//! its operations in response to clicks and reads the accessors to draw. Time
//! advances only through `tick()`, which the owner's scheduler invokes while
//! the engine's `Ticker` is running.
//!
//! Phases per session:
//! `NotStarted -> InRound -> Answered -> (InRound | Complete)`, and
//! `Complete -> NotStarted` only via `reset()`.

pub mod picker;
pub mod rank;
pub mod ticker;

use log::{debug, info};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::questions::{Level, QuestionContent, QuestionPool};
use picker::RandomSource;
use ticker::Ticker;

// --- Session ----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPos {
    pub row: usize,
    pub column: usize,
}

/// One play-through. Mutated only by `RoundEngine`.
#[derive(Clone, Debug)]
pub struct Session {
    level: Level,
    elapsed_ms: u64,
    question_number: usize, // 0 before the first round, then 1-based
    contents: Vec<QuestionContent>,
    answer: Option<CellPos>,
}

impl Session {
    /// Draw `total` distinct groups from the level's pool, then a distinct
    /// major/minor pair from each. Either entry of a group may land in either
    /// role.
    pub fn start(
        level: Level,
        pool: &QuestionPool,
        total: usize,
        rng: &mut impl RandomSource,
    ) -> Result<Self, GameError> {
        let groups = pool.groups(level);
        if total > groups.len() {
            return Err(GameError::Configuration(format!(
                "{total} questions requested but level '{}' has {} groups",
                level.as_str(),
                groups.len()
            )));
        }
        let mut contents = Vec::with_capacity(total);
        for group_idx in rng.unique_random_ints(groups.len(), total)? {
            let group = &groups[group_idx];
            let pair = rng.unique_random_ints(group.len(), 2)?;
            contents.push(QuestionContent {
                major: group[pair[0]].clone(),
                minor: group[pair[1]].clone(),
            });
        }
        Ok(Self {
            level,
            elapsed_ms: 0,
            question_number: 0,
            contents,
            answer: None,
        })
    }

    pub fn level(&self) -> Level {
        self.level
    }
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
    pub fn question_number(&self) -> usize {
        self.question_number
    }
    pub fn total_questions(&self) -> usize {
        self.contents.len()
    }
    pub fn contents(&self) -> &[QuestionContent] {
        &self.contents
    }
    pub fn answer(&self) -> Option<CellPos> {
        self.answer
    }

    /// Content of the round in progress (or just answered).
    pub fn current_content(&self) -> Option<&QuestionContent> {
        self.question_number
            .checked_sub(1)
            .and_then(|idx| self.contents.get(idx))
    }
}

// --- Grid -------------------------------------------------------------------

/// Characters to display, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<String>,
}

impl GridLayout {
    fn build(rows: usize, columns: usize, content: &QuestionContent, answer: CellPos) -> Self {
        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                let detail = if row == answer.row && column == answer.column {
                    &content.minor
                } else {
                    &content.major
                };
                cells.push(detail.character.clone());
            }
        }
        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column).map(String::as_str)
    }
}

// --- Outcomes ---------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InRound,
    /// Correct cell clicked; detail screen is up until `advance_or_finish`.
    Answered,
    Complete,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    Correct(QuestionContent),
    Incorrect,
    /// No round in progress; the click is ignored.
    Inactive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    NextRound(GridLayout),
    Complete { level: Level, elapsed_ms: u64 },
}

// --- Engine -----------------------------------------------------------------

pub struct RoundEngine<T: Ticker> {
    config: GameConfig,
    ticker: T,
    ticking: bool,
    phase: Phase,
    session: Option<Session>,
    grid: Option<GridLayout>,
}

impl<T: Ticker> RoundEngine<T> {
    pub fn new(config: GameConfig, ticker: T) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            ticker,
            ticking: false,
            phase: Phase::NotStarted,
            session: None,
            grid: None,
        })
    }

    pub fn start_session(
        &mut self,
        level: Level,
        pool: &QuestionPool,
        rng: &mut impl RandomSource,
    ) -> Result<(), GameError> {
        let session = Session::start(level, pool, self.config.questions, rng)?;
        self.stop_timer();
        info!(
            "session started: level={} questions={}",
            level.as_str(),
            session.total_questions()
        );
        self.session = Some(session);
        self.grid = None;
        self.phase = Phase::NotStarted;
        Ok(())
    }

    /// Advance to the next question, roll a fresh answer cell and restart the
    /// timer.
    pub fn begin_round(&mut self, rng: &mut impl RandomSource) -> Result<GridLayout, GameError> {
        let (rows, columns) = (self.config.rows, self.config.columns);
        let session = self
            .session
            .as_mut()
            .ok_or(GameError::InvalidState("no session started"))?;
        if session.question_number >= session.contents.len() {
            return Err(GameError::InvalidState("all rounds already played"));
        }
        session.question_number += 1;
        let answer = CellPos {
            row: rng.random_int(rows),
            column: rng.random_int(columns),
        };
        session.answer = Some(answer);
        let layout = GridLayout::build(
            rows,
            columns,
            &session.contents[session.question_number - 1],
            answer,
        );
        debug!(
            "round {}/{} answer at ({}, {})",
            session.question_number,
            session.contents.len(),
            answer.row,
            answer.column
        );
        self.grid = Some(layout.clone());
        self.phase = Phase::InRound;
        self.start_timer()?;
        Ok(layout)
    }

    pub fn select_cell(&mut self, row: usize, column: usize) -> SelectionOutcome {
        if self.phase != Phase::InRound {
            return SelectionOutcome::Inactive;
        }
        let Some(session) = self.session.as_ref() else {
            return SelectionOutcome::Inactive;
        };
        if session.answer != Some(CellPos { row, column }) {
            return SelectionOutcome::Incorrect;
        }
        let Some(content) = session.current_content().cloned() else {
            return SelectionOutcome::Inactive;
        };
        self.stop_timer();
        self.phase = Phase::Answered;
        SelectionOutcome::Correct(content)
    }

    /// Called once the detail screen of a correct answer is dismissed.
    pub fn advance_or_finish(&mut self, rng: &mut impl RandomSource) -> Result<Advance, GameError> {
        if self.phase != Phase::Answered {
            return Err(GameError::InvalidState("no answered round to advance from"));
        }
        let session = self
            .session
            .as_ref()
            .ok_or(GameError::InvalidState("no session started"))?;
        if session.question_number == session.contents.len() {
            let (level, elapsed_ms) = (session.level, session.elapsed_ms);
            self.phase = Phase::Complete;
            info!(
                "session complete: level={} time={}s",
                level.as_str(),
                crate::format::format_time_ms(elapsed_ms)
            );
            return Ok(Advance::Complete { level, elapsed_ms });
        }
        self.begin_round(rng).map(Advance::NextRound)
    }

    /// Periodic callback from the ticker's scheduler. Returns whether time
    /// advanced.
    pub fn tick(&mut self) -> bool {
        if !self.ticking {
            return false;
        }
        match self.session.as_mut() {
            Some(session) => {
                session.elapsed_ms += self.config.tick_ms;
                true
            }
            None => false,
        }
    }

    /// "Play again": drop the session and go back to level selection.
    pub fn reset(&mut self) {
        self.stop_timer();
        self.session = None;
        self.grid = None;
        self.phase = Phase::NotStarted;
    }

    fn start_timer(&mut self) -> Result<(), GameError> {
        self.stop_timer();
        self.ticker.start(self.config.tick_ms)?;
        self.ticking = true;
        Ok(())
    }

    fn stop_timer(&mut self) {
        if self.ticking {
            self.ticker.stop();
            self.ticking = false;
        }
    }

    // --- Accessors ---

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
    pub fn level(&self) -> Option<Level> {
        self.session.as_ref().map(Session::level)
    }
    pub fn elapsed_ms(&self) -> u64 {
        self.session.as_ref().map_or(0, Session::elapsed_ms)
    }
    pub fn question_number(&self) -> usize {
        self.session.as_ref().map_or(0, Session::question_number)
    }
    pub fn total_questions(&self) -> usize {
        self.config.questions
    }
    pub fn grid(&self) -> Option<&GridLayout> {
        self.grid.as_ref()
    }
    pub fn current_content(&self) -> Option<&QuestionContent> {
        self.session.as_ref().and_then(Session::current_content)
    }
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }
    pub fn ticker(&self) -> &T {
        &self.ticker
    }
}
