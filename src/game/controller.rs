//! Game state machine.
//!
//! `Intro -> Loading -> Playing -> Success -> Loading -> ...`
//!
//! The controller performs no I/O itself. Fetching, timers and audio go
//! through a [`Host`], which the browser glue implements with `spawn_local`,
//! `gloo_timers` and the [`AudioNarrator`](super::audio::AudioNarrator), and
//! which tests implement with a recorder.
//!
//! Delayed callbacks carry the serial of the round they were armed for; a
//! timer that fires after the session has moved on is ignored.
use super::audio::Narrator;
use super::config::Timing;
use super::round::{Letter, OPTION_COUNT, Round};

/// Option highlighted when a new round appears.
pub const DEFAULT_SELECTION: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Intro,
    Loading,
    Playing,
    Success,
}

/// Delayed work requested from the host and handed back to [`GameController::on_timer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    /// Say the chosen word once the success chime has played.
    EchoWord { round: u64 },
    /// Move on to the next round.
    Advance { round: u64 },
    /// End the wrong-answer flash on `index`.
    ClearError { round: u64, index: usize },
}

/// Keyboard intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Accept,
    Skip,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "Enter" => Some(Key::Accept),
            " " | "Spacebar" => Some(Key::Skip),
            _ => None,
        }
    }
}

/// Side effects the controller asks for.
pub trait Host: Narrator {
    /// Begin one asynchronous round fetch; the result must come back through
    /// [`GameController::round_ready`].
    fn request_round(&mut self, exclude: Option<Letter>);

    /// Deliver `timer` to [`GameController::on_timer`] after `delay_ms`.
    fn schedule(&mut self, delay_ms: u32, timer: Timer);
}

/// Everything the view needs to draw a frame.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub phase: GamePhase,
    pub round: Option<Round>,
    pub selected: usize,
    pub errored: Option<usize>,
    /// Locked correct pick while in Success.
    pub chosen: Option<usize>,
    pub first_round_served: bool,
    pub keyboard_mode: bool,
    pub celebrating: bool,
    pub fetching: bool,
    pub serial: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            phase: GamePhase::Intro,
            round: None,
            selected: DEFAULT_SELECTION,
            errored: None,
            chosen: None,
            first_round_served: false,
            keyboard_mode: false,
            celebrating: false,
            fetching: false,
            serial: 0,
        }
    }
}

pub struct GameController {
    session: GameSession,
    timing: Timing,
}

impl GameController {
    pub fn new(timing: Timing) -> Self {
        Self {
            session: GameSession::default(),
            timing,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    /// Leave the intro screen. Only the first call has any effect.
    pub fn start<H: Host>(&mut self, host: &mut H) {
        if self.session.phase != GamePhase::Intro {
            return;
        }
        log::info!("game started");
        self.begin_fetch(None, host);
    }

    /// A requested round has arrived (from the generator or the fallback table).
    pub fn round_ready<H: Host>(&mut self, round: Round, host: &mut H) {
        let s = &mut self.session;
        if !s.fetching {
            log::debug!("dropping round {} that nobody asked for", round.letter);
            return;
        }
        s.fetching = false;
        s.serial += 1;
        s.selected = DEFAULT_SELECTION;
        s.errored = None;
        s.chosen = None;
        s.phase = GamePhase::Playing;

        let prompt = if s.first_round_served {
            format!("{}!", round.letter)
        } else {
            s.first_round_served = true;
            format!("Find the word that starts with {}!", round.letter)
        };
        log::debug!("round {} ready: letter {}", s.serial, round.letter);
        s.round = Some(round);
        host.speak(&prompt);
    }

    /// Shared pick logic for pointer and keyboard input.
    pub fn pick<H: Host>(&mut self, index: usize, host: &mut H) {
        let s = &mut self.session;
        if s.phase != GamePhase::Playing || s.errored.is_some() || index >= OPTION_COUNT {
            return;
        }
        let Some(round) = s.round.as_ref() else {
            return;
        };
        let round_id = s.serial;

        if round.options[index].is_correct {
            host.play_success_cue();
            s.phase = GamePhase::Success;
            s.chosen = Some(index);
            s.celebrating = true;
            host.schedule(self.timing.word_echo_ms, Timer::EchoWord { round: round_id });
            host.schedule(self.timing.success_advance_ms, Timer::Advance { round: round_id });
        } else {
            host.play_error_cue();
            s.errored = Some(index);
            host.schedule(
                self.timing.error_clear_ms,
                Timer::ClearError {
                    round: round_id,
                    index,
                },
            );
        }
    }

    /// Click/tap on a card: leaves keyboard highlight mode.
    pub fn pointer_pick<H: Host>(&mut self, index: usize, host: &mut H) {
        self.session.keyboard_mode = false;
        if index < OPTION_COUNT {
            self.session.selected = index;
        }
        self.pick(index, host);
    }

    /// Handle a keydown. Returns `true` when the browser default (page scroll
    /// on Space) should be suppressed.
    pub fn on_key<H: Host>(&mut self, key: Option<Key>, host: &mut H) -> bool {
        if self.session.phase == GamePhase::Intro {
            return false;
        }
        self.session.keyboard_mode = true;
        match key {
            Some(Key::Left) => {
                self.session.selected = (self.session.selected + OPTION_COUNT - 1) % OPTION_COUNT;
            }
            Some(Key::Right) => {
                self.session.selected = (self.session.selected + 1) % OPTION_COUNT;
            }
            Some(Key::Accept) => self.pick(self.session.selected, host),
            Some(Key::Skip) => {
                self.skip(host);
                return true;
            }
            None => {}
        }
        false
    }

    /// Abandon the current round for a new one.
    pub fn skip<H: Host>(&mut self, host: &mut H) {
        if self.session.phase != GamePhase::Playing || self.session.fetching {
            return;
        }
        if let Some(letter) = self.current_letter() {
            self.begin_fetch(Some(letter), host);
        }
    }

    pub fn on_timer<H: Host>(&mut self, timer: Timer, host: &mut H) {
        let s = &mut self.session;
        match timer {
            Timer::EchoWord { round } if round == s.serial && s.phase == GamePhase::Success => {
                let word = s
                    .chosen
                    .zip(s.round.as_ref())
                    .map(|(i, r)| r.options[i].word.clone());
                if let Some(word) = word {
                    host.speak(&format!("{word}!"));
                }
            }
            Timer::Advance { round } if round == s.serial && s.phase == GamePhase::Success => {
                let letter = self.current_letter();
                self.begin_fetch(letter, host);
            }
            Timer::ClearError { round, index }
                if round == s.serial && s.errored == Some(index) =>
            {
                s.errored = None;
            }
            stale => log::debug!("ignoring stale timer {stale:?}"),
        }
    }

    fn current_letter(&self) -> Option<Letter> {
        self.session.round.as_ref().map(|r| r.letter)
    }

    fn begin_fetch<H: Host>(&mut self, exclude: Option<Letter>, host: &mut H) {
        let s = &mut self.session;
        if s.fetching {
            return;
        }
        s.fetching = true;
        s.phase = GamePhase::Loading;
        s.errored = None;
        s.chosen = None;
        s.celebrating = false;
        host.request_round(exclude);
    }
}
