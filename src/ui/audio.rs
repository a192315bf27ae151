//! Sound cues. Playback failures (autoplay policy, missing file) are ignored;
//! audio is decoration only.

use wasm_bindgen::JsValue;
use web_sys::HtmlAudioElement;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Bgm,
    Success,
    Failure,
    Boom,
}

pub struct AudioSet {
    bgm: HtmlAudioElement, // looped for the whole session
    success: HtmlAudioElement,
    failure: HtmlAudioElement,
    boom: HtmlAudioElement,
}

impl AudioSet {
    pub fn load(base: &str) -> Result<Self, JsValue> {
        let load = |name: &str| HtmlAudioElement::new_with_src(&format!("{base}/{name}.mp3"));
        let bgm = load("bgm")?;
        bgm.set_loop(true);
        Ok(Self {
            bgm,
            success: load("success")?,
            failure: load("failure")?,
            boom: load("boom")?,
        })
    }

    fn get(&self, cue: Cue) -> &HtmlAudioElement {
        match cue {
            Cue::Bgm => &self.bgm,
            Cue::Success => &self.success,
            Cue::Failure => &self.failure,
            Cue::Boom => &self.boom,
        }
    }

    /// Rewind and play, so rapid repeats restart the cue.
    pub fn replay(&self, cue: Cue) {
        let audio = self.get(cue);
        audio.set_current_time(0.0);
        if audio.play().is_err() {
            log::debug!("audio cue {cue:?} failed to play");
        }
    }

    pub fn pause(&self, cue: Cue) {
        if self.get(cue).pause().is_err() {
            log::debug!("audio cue {cue:?} failed to pause");
        }
    }

    pub fn set_muted(&self, muted: bool) {
        for cue in [Cue::Bgm, Cue::Success, Cue::Failure, Cue::Boom] {
            self.get(cue).set_muted(muted);
        }
    }
}
