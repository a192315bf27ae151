//! `Ticker` backed by `window.setInterval`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::engine::ticker::Ticker;
use crate::error::GameError;

pub struct IntervalTicker {
    handle: Option<i32>,
    callback: Closure<dyn FnMut()>,
}

impl IntervalTicker {
    pub fn new(on_tick: impl FnMut() + 'static) -> Self {
        Self {
            handle: None,
            callback: Closure::wrap(Box::new(on_tick) as Box<dyn FnMut()>),
        }
    }
}

impl Ticker for IntervalTicker {
    fn start(&mut self, interval_ms: u64) -> Result<(), GameError> {
        let timeout = i32::try_from(interval_ms).map_err(|_| {
            GameError::Configuration(format!("timer interval {interval_ms} ms out of range"))
        })?;
        let win = window().ok_or_else(|| GameError::Dom("no window; timer not started".into()))?;
        let handle = win.set_interval_with_callback_and_timeout_and_arguments_0(
            self.callback.as_ref().unchecked_ref(),
            timeout,
        )?;
        self.handle = Some(handle);
        Ok(())
    }

    fn stop(&mut self) {
        if let (Some(handle), Some(win)) = (self.handle.take(), window()) {
            win.clear_interval_with_handle(handle);
        }
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
