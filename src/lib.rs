//! Kanji Spot core crate.
//!
//! A grid of one repeated kanji hides a single look-alike; the player clicks
//! it, reads both characters' details, and moves on. Three rounds are timed
//! and the total time maps to a rank.
//!
//! `engine` holds the round/timing state machine and is plain Rust (tested
//! natively); `ui` wires it to the DOM via web-sys and is only exercised in the
//! browser.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod questions;
mod ui;

pub use config::GameConfig;
pub use engine::picker::{RandomSource, RngSource};
pub use engine::rank::{RANKS, Rank, rank_for};
pub use engine::ticker::{ManualTicker, Ticker};
pub use engine::{Advance, CellPos, GridLayout, Phase, RoundEngine, SelectionOutcome, Session};
pub use error::GameError;
pub use questions::{Level, QuestionContent, QuestionDetail, QuestionPool};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

thread_local! {
    // Dataset supplied by the page before `start_game()`.
    static PENDING_POOL: RefCell<Option<QuestionPool>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Mount the game into `#game` using the dataset from `load_questions()` or
/// the embedded default. Mounting again returns to level selection and keeps
/// the current dataset.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    let pending = PENDING_POOL.with(|p| p.borrow_mut().take());
    ui::mount(pending, GameConfig::default())?;
    Ok(())
}

/// Supply a dataset as JSON (`{"easy": [[...]], "normal": ..., "hard": ...}`).
/// Applies to the next session if a game is already mounted.
#[wasm_bindgen]
pub fn load_questions(json: &str) -> Result<(), JsValue> {
    let pool = QuestionPool::from_json(json).inspect_err(|err| log::error!("{err}"))?;
    if let Some(pool) = ui::replace_pool(pool) {
        PENDING_POOL.with(|p| p.replace(Some(pool)));
    }
    Ok(())
}

/// Flip mute on every sound cue; returns the new state.
#[wasm_bindgen]
pub fn toggle_mute() -> bool {
    ui::toggle_mute()
}
