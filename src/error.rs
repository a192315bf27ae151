//! Crate-wide error type.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum GameError {
    /// Requested sample does not fit the available pool (too many questions,
    /// a group with fewer than two entries, zero-sized grid).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No rank covers the elapsed time; the rank table is malformed.
    #[error("no rank matches elapsed time {0} ms")]
    Lookup(u64),

    /// Operation called in the wrong phase of a session.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("dataset parse error: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// Browser API unavailable or DOM call failed.
    #[error("dom error: {0}")]
    Dom(String),
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
