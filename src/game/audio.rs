//! Audio feedback: synthesized tone cues plus text-to-speech.
//!
//! The [`Narrator`] trait describes the cues in terms of two primitives
//! (`play_tones`, `speak`) so the controller can be driven by a recording
//! narrator in tests. [`AudioNarrator`] is the browser implementation built on
//! Web Audio oscillators and `speechSynthesis`. Every browser failure is logged
//! and swallowed; gameplay simply continues without sound.
use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AudioContext, AudioContextState, OscillatorType, SpeechSynthesisUtterance, SpeechSynthesisVoice,
    window,
};

pub const TRY_AGAIN: &str = "Try again";

/// Speech tuning for young listeners: a bit slower, a bit higher.
pub const SPEECH_RATE: f32 = 0.9;
pub const SPEECH_PITCH: f32 = 1.1;

const TONE_PEAK_GAIN: f32 = 0.1;
const TONE_FLOOR_GAIN: f32 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
    Sawtooth,
}

impl From<Wave> for OscillatorType {
    fn from(w: Wave) -> Self {
        match w {
            Wave::Sine => OscillatorType::Sine,
            Wave::Triangle => OscillatorType::Triangle,
            Wave::Sawtooth => OscillatorType::Sawtooth,
        }
    }
}

/// One scheduled note. Times are seconds relative to the cue start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub freq: f64,
    pub wave: Wave,
    pub offset: f64,
    pub duration: f64,
}

const fn tone(freq: f64, wave: Wave, offset: f64, duration: f64) -> Tone {
    Tone {
        freq,
        wave,
        offset,
        duration,
    }
}

/// C-major arpeggio, C5 E5 G5 C6.
pub const SUCCESS_CHIME: [Tone; 4] = [
    tone(523.25, Wave::Sine, 0.0, 0.2),
    tone(659.25, Wave::Sine, 0.1, 0.2),
    tone(783.99, Wave::Sine, 0.2, 0.4),
    tone(1046.50, Wave::Triangle, 0.3, 0.6),
];

/// Two descending buzzes.
pub const ERROR_BUZZ: [Tone; 2] = [
    tone(300.0, Wave::Sawtooth, 0.0, 0.3),
    tone(200.0, Wave::Sawtooth, 0.2, 0.4),
];

/// Fire-and-forget audio output.
pub trait Narrator {
    fn play_tones(&mut self, tones: &[Tone]);

    /// Replace whatever is being said with `text`.
    fn speak(&mut self, text: &str);

    fn play_success_cue(&mut self) {
        self.play_tones(&SUCCESS_CHIME);
    }

    fn play_error_cue(&mut self) {
        self.play_tones(&ERROR_BUZZ);
        self.speak(TRY_AGAIN);
    }
}

/// Index of the preferred voice among `(lang, name)` pairs: an English voice
/// whose name suggests a female speaker, else the platform's first voice.
pub fn preferred_voice<'a, I>(voices: I) -> Option<usize>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut any = false;
    for (i, (lang, name)) in voices.into_iter().enumerate() {
        any = true;
        if lang.starts_with("en") && name.contains("Female") {
            return Some(i);
        }
    }
    any.then_some(0)
}

// --- Browser implementation -------------------------------------------------

thread_local! {
    // Shared for the whole page; created on first use, never torn down.
    static AUDIO_CONTEXT: RefCell<Option<AudioContext>> = const { RefCell::new(None) };
}

/// Run `f` with the shared audio context, creating it lazily and resuming it
/// if the browser's autoplay policy left it suspended.
fn with_context<T>(f: impl FnOnce(&AudioContext) -> Result<T, JsValue>) -> Result<T, JsValue> {
    AUDIO_CONTEXT.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(AudioContext::new()?);
        }
        let ctx = slot
            .as_ref()
            .ok_or_else(|| JsValue::from_str("audio context unavailable"))?;
        if ctx.state() == AudioContextState::Suspended {
            // Resolution of the promise is not awaited; scheduling works either way.
            let _ = ctx.resume()?;
        }
        f(ctx)
    })
}

fn schedule_tone(ctx: &AudioContext, t: &Tone, now: f64) -> Result<(), JsValue> {
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    let start = now + t.offset;
    let end = start + t.duration;

    osc.set_type(t.wave.into());
    osc.frequency().set_value_at_time(t.freq as f32, start)?;
    gain.gain().set_value_at_time(TONE_PEAK_GAIN, start)?;
    gain.gain().exponential_ramp_to_value_at_time(TONE_FLOOR_GAIN, end)?;

    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;
    osc.start_with_when(start)?;
    osc.stop_with_when(end)?;
    Ok(())
}

fn speak_now(text: &str) -> Result<(), JsValue> {
    let synth = window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .speech_synthesis()?;
    let utterance = SpeechSynthesisUtterance::new_with_text(text)?;
    utterance.set_rate(SPEECH_RATE);
    utterance.set_pitch(SPEECH_PITCH);

    let voices: Vec<SpeechSynthesisVoice> = synth
        .get_voices()
        .iter()
        .filter_map(|v| v.dyn_into().ok())
        .collect();
    let described: Vec<(String, String)> = voices.iter().map(|v| (v.lang(), v.name())).collect();
    if let Some(i) = preferred_voice(described.iter().map(|(l, n)| (l.as_str(), n.as_str()))) {
        utterance.set_voice(voices.get(i));
    }

    synth.cancel();
    synth.speak(&utterance);
    Ok(())
}

/// Web Audio + speech synthesis narrator.
#[derive(Default)]
pub struct AudioNarrator;

impl AudioNarrator {
    /// Create/resume the audio context. Call from inside a user gesture.
    pub fn unlock(&self) {
        if let Err(e) = with_context(|_| Ok(())) {
            log::debug!("audio unlock failed: {e:?}");
        }
    }
}

impl Narrator for AudioNarrator {
    fn play_tones(&mut self, tones: &[Tone]) {
        let result = with_context(|ctx| {
            let now = ctx.current_time();
            tones.iter().try_for_each(|t| schedule_tone(ctx, t, now))
        });
        if let Err(e) = result {
            log::debug!("tone playback skipped: {e:?}");
        }
    }

    fn speak(&mut self, text: &str) {
        if let Err(e) = speak_now(text) {
            log::debug!("speech skipped: {e:?}");
        }
    }
}
