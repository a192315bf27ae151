//! Browser presentation layer.
//!
//! Owns the DOM for the four screens (level select, question grid, character
//! detail, result), the sound cues and the mute toggle, and forwards clicks to
//! the `RoundEngine`. All state lives in one `GameUi` held in a thread-local;
//! clicks inside `#game` are routed by a single delegated listener reading the
//! `data-action` attribute of the clicked button.

mod audio;
mod dom;
mod interval;

use std::cell::RefCell;

use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, window};

use crate::config::GameConfig;
use crate::engine::picker::RngSource;
use crate::engine::rank::{RANKS, rank_for};
use crate::engine::{Advance, GridLayout, RoundEngine, SelectionOutcome};
use crate::error::GameError;
use crate::format::format_time_ms;
use crate::questions::{Level, QuestionContent, QuestionPool};
use audio::{AudioSet, Cue};
use dom::{action_button, definition_list, el, replace_children, text_el};
pub use interval::IntervalTicker;

const GAME_ID: &str = "game";
const SETTINGS_ID: &str = "settings";
const ASSET_BASE: &str = "./assets";

thread_local! {
    static GAME: RefCell<Option<GameUi>> = const { RefCell::new(None) };
}

/// Widgets that exist only while a session is on screen.
struct SessionView {
    time: Element,
    number: Element,
    content: Element,
}

struct GameUi {
    doc: Document,
    container: Element,
    engine: RoundEngine<IntervalTicker>,
    rng: RngSource<StdRng>,
    pool: QuestionPool,
    audio: AudioSet,
    muted: bool,
    mute_button: Option<Element>,
    view: Option<SessionView>,
}

/// Mount the game into `#game` (and the mute toggle into `#settings` if
/// present) and show level selection. `pool` overrides the dataset; without
/// it a fresh mount uses the embedded one and a remount keeps its current one.
pub fn mount(pool: Option<QuestionPool>, config: GameConfig) -> Result<(), GameError> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or_else(|| GameError::Dom("no document".into()))?;
    let container = doc
        .get_element_by_id(GAME_ID)
        .ok_or_else(|| GameError::Dom(format!("missing #{GAME_ID}")))?;

    // Listeners are already attached on a second mount.
    if GAME.with(|cell| cell.borrow().is_some()) {
        with_game(|ui| {
            if let Some(pool) = pool {
                ui.pool = pool;
            }
            ui.show_start()
        });
        return Ok(());
    }
    let pool = match pool {
        Some(pool) => pool,
        None => QuestionPool::builtin()?,
    };

    let ticker = IntervalTicker::new(|| with_game(GameUi::on_tick));
    let mut ui = GameUi {
        engine: RoundEngine::new(config, ticker)?,
        rng: RngSource::from_entropy(),
        pool,
        audio: AudioSet::load(ASSET_BASE)?,
        muted: false,
        mute_button: None,
        view: None,
        container: container.clone(),
        doc: doc.clone(),
    };

    if let Some(settings) = doc.get_element_by_id(SETTINGS_ID) {
        let button = action_button(&doc, "mute-button", "mute", "")?;
        replace_children(&settings, &[&button])?;
        listen_clicks(&settings)?;
        ui.mute_button = Some(button);
    }
    ui.apply_mute()?;
    ui.show_start()?;
    listen_clicks(&container)?;

    GAME.with(|cell| cell.replace(Some(ui)));
    log::info!("game mounted");
    Ok(())
}

pub fn toggle_mute() -> bool {
    let mut muted = false;
    with_game(|ui| {
        ui.muted = !ui.muted;
        muted = ui.muted;
        ui.apply_mute()
    });
    muted
}

/// Replace the dataset used for subsequent sessions of a mounted game.
/// Hands the pool back if no game is mounted.
pub fn replace_pool(pool: QuestionPool) -> Option<QuestionPool> {
    GAME.with(|cell| match cell.borrow_mut().as_mut() {
        Some(ui) => {
            ui.pool = pool;
            None
        }
        None => Some(pool),
    })
}

/// Run `f` against the mounted game. Errors are logged and shown in place of
/// the game; re-entrant calls are dropped.
fn with_game(f: impl FnOnce(&mut GameUi) -> Result<(), GameError>) {
    GAME.with(|cell| {
        let Ok(mut guard) = cell.try_borrow_mut() else {
            log::warn!("game state busy; event dropped");
            return;
        };
        if let Some(ui) = guard.as_mut() {
            if let Err(err) = f(ui) {
                log::error!("{err}");
                ui.show_failure();
            }
        }
    });
}

fn listen_clicks(target: &Element) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
        let Some(button) = evt
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|t| t.closest("[data-action]").ok().flatten())
        else {
            return;
        };
        with_game(|ui| ui.on_action(&button));
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn data_index(button: &Element, name: &str) -> Option<usize> {
    button.get_attribute(name)?.parse().ok()
}

impl GameUi {
    fn on_action(&mut self, button: &Element) -> Result<(), GameError> {
        match button.get_attribute("data-action").as_deref() {
            Some("start") => {
                let level = match button.get_attribute("data-level").as_deref() {
                    Some("easy") => Level::Easy,
                    Some("normal") => Level::Normal,
                    Some("hard") => Level::Hard,
                    _ => return Ok(()),
                };
                self.start(level)
            }
            Some("cell") => match (data_index(button, "data-row"), data_index(button, "data-column")) {
                (Some(row), Some(column)) => self.select(row, column),
                _ => Ok(()),
            },
            Some("next") => self.next(),
            Some("again") => self.show_start(),
            Some("mute") => {
                self.muted = !self.muted;
                self.apply_mute()
            }
            _ => Ok(()),
        }
    }

    fn on_tick(&mut self) -> Result<(), GameError> {
        if self.engine.tick() {
            self.refresh_header();
        }
        Ok(())
    }

    // --- Screens ---

    fn show_start(&mut self) -> Result<(), GameError> {
        self.engine.reset();
        self.view = None;
        let list = el(&self.doc, "div", "start-button-list")?;
        for level in Level::ALL {
            let button = action_button(
                &self.doc,
                &format!("start-button start-button-{}", level.as_str()),
                "start",
                &level.label(),
            )?;
            button.set_attribute("data-level", level.as_str())?;
            list.append_child(&button)?;
        }
        replace_children(&self.container, &[&list])?;
        Ok(())
    }

    fn start(&mut self, level: Level) -> Result<(), GameError> {
        self.engine.start_session(level, &self.pool, &mut self.rng)?;

        let time = text_el(&self.doc, "span", "", "")?;
        let number = text_el(&self.doc, "span", "", "")?;
        let header = definition_list(&self.doc, "game-header", &[("タイム", &time), ("問題", &number)])?;
        let content = el(&self.doc, "div", "")?;
        replace_children(&self.container, &[&header, &content])?;
        self.view = Some(SessionView {
            time,
            number,
            content,
        });

        self.audio.replay(Cue::Bgm);
        let layout = self.engine.begin_round(&mut self.rng)?;
        self.show_grid(&layout)
    }

    fn refresh_header(&self) {
        if let Some(view) = &self.view {
            view.time
                .set_text_content(Some(&format_time_ms(self.engine.elapsed_ms())));
            view.number.set_text_content(Some(&format!(
                "{} / {}",
                self.engine.question_number(),
                self.engine.total_questions()
            )));
        }
    }

    fn show_grid(&self, layout: &GridLayout) -> Result<(), GameError> {
        let view = self
            .view
            .as_ref()
            .ok_or(GameError::InvalidState("no session view"))?;
        self.refresh_header();
        let grid = el(&self.doc, "pre", "question")?;
        for row in 0..layout.rows {
            for column in 0..layout.columns {
                let character = layout.cell(row, column).unwrap_or_default();
                let button = action_button(&self.doc, "question-button", "cell", character)?;
                button.set_attribute("data-row", &row.to_string())?;
                button.set_attribute("data-column", &column.to_string())?;
                grid.append_child(&button)?;
            }
            grid.append_with_str_1("\n")?;
        }
        replace_children(&view.content, &[&grid])?;
        Ok(())
    }

    fn select(&mut self, row: usize, column: usize) -> Result<(), GameError> {
        match self.engine.select_cell(row, column) {
            SelectionOutcome::Correct(content) => {
                self.audio.replay(Cue::Success);
                self.refresh_header();
                self.show_detail(&content)
            }
            SelectionOutcome::Incorrect => {
                self.audio.replay(Cue::Failure);
                Ok(())
            }
            SelectionOutcome::Inactive => Ok(()),
        }
    }

    fn show_detail(&self, content: &QuestionContent) -> Result<(), GameError> {
        let view = self
            .view
            .as_ref()
            .ok_or(GameError::InvalidState("no session view"))?;
        let doc = &self.doc;
        let list = el(doc, "ul", "character-detail")?;
        for detail in [&content.major, &content.minor] {
            let item = el(doc, "li", "")?;
            let outline = el(doc, "div", "character-outline")?;
            outline.append_child(text_el(doc, "div", "character", &detail.character)?.as_ref())?;
            outline.append_child(text_el(doc, "div", "category", &detail.category)?.as_ref())?;
            item.append_child(&outline)?;
            let on = text_el(doc, "span", "", &detail.on)?;
            let kun = text_el(doc, "span", "", &detail.kun)?;
            let meaning = text_el(doc, "span", "", &detail.meaning)?;
            item.append_child(definition_list(
                doc,
                "data-list",
                &[("音:", &on), ("訓:", &kun), ("意味:", &meaning)],
            )?.as_ref())?;
            list.append_child(&item)?;
        }
        let container = el(doc, "div", "character-detail-container")?;
        container.append_child(&list)?;
        container.append_child(action_button(doc, "go-next-button", "next", "次に進む")?.as_ref())?;
        replace_children(&view.content, &[&container])?;
        Ok(())
    }

    fn next(&mut self) -> Result<(), GameError> {
        match self.engine.advance_or_finish(&mut self.rng)? {
            Advance::NextRound(layout) => self.show_grid(&layout),
            Advance::Complete { level, elapsed_ms } => {
                self.audio.pause(Cue::Bgm);
                self.show_result(level, elapsed_ms)
            }
        }
    }

    fn show_result(&mut self, level: Level, elapsed_ms: u64) -> Result<(), GameError> {
        let rank = rank_for(elapsed_ms, &RANKS)?;
        let doc = &self.doc;
        self.audio.replay(Cue::Boom);

        let level_label = text_el(doc, "span", "", &level.label())?;
        let time = text_el(doc, "span", "", &format_time_ms(elapsed_ms))?;
        let rank_name = text_el(doc, "span", "", rank.name)?;
        let box_el = el(doc, "div", &format!("result-box result-box-{}", level.as_str()))?;
        box_el.append_child(definition_list(
            doc,
            "result-list",
            &[("難易度", &level_label), ("タイム", &time), ("階級", &rank_name)],
        )?.as_ref())?;
        box_el.append_child(text_el(doc, "div", "rank-description", rank.description)?.as_ref())?;

        let result = el(doc, "div", "result-container")?;
        result.append_child(text_el(doc, "div", "result-title", "結果")?.as_ref())?;
        result.append_child(&box_el)?;
        result.append_child(action_button(doc, "start-again-button", "again", "もう一度")?.as_ref())?;
        replace_children(&self.container, &[&result])?;
        self.view = None;
        Ok(())
    }

    fn show_failure(&mut self) {
        self.engine.reset();
        self.view = None;
        self.audio.pause(Cue::Bgm);
        let shown = text_el(&self.doc, "div", "game-error", "エラーが発生しました。")
            .and_then(|msg| {
                msg.append_child(action_button(&self.doc, "start-again-button", "again", "もう一度")?.as_ref())?;
                replace_children(&self.container, &[&msg])
            });
        if shown.is_err() {
            log::error!("failed to render error screen");
        }
    }

    // --- Mute ---

    fn apply_mute(&self) -> Result<(), GameError> {
        self.audio.set_muted(self.muted);
        if let Some(button) = &self.mute_button {
            let (src, alt) = if self.muted {
                (format!("{ASSET_BASE}/volume-muted.svg"), "ミュート解除")
            } else {
                (format!("{ASSET_BASE}/volume-unmuted.svg"), "ミュート")
            };
            let img = el(&self.doc, "img", "")?;
            img.set_attribute("src", &src)?;
            img.set_attribute("alt", alt)?;
            replace_children(button, &[&img])?;
        }
        Ok(())
    }
}
