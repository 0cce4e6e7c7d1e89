// Integration tests (native) for the `letter-pop` crate.
// A recording host stands in for the browser: fetch requests are answered from
// the fallback table through `RoundSource`, and scheduled timers are fired by
// hand in delay order.

use letter_pop::SourceError;
use letter_pop::game::audio::{ERROR_BUZZ, Narrator, SUCCESS_CHIME, Tone};
use letter_pop::game::config::Timing;
use letter_pop::game::controller::{GameController, GamePhase, Host, Timer};
use letter_pop::game::round::Letter;
use letter_pop::game::source::RoundSource;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Default)]
struct Recorder {
    pending_fetch: Vec<Option<Letter>>,
    timers: Vec<(u32, Timer)>,
    tones: Vec<Vec<Tone>>,
    spoken: Vec<String>,
}

impl Narrator for Recorder {
    fn play_tones(&mut self, tones: &[Tone]) {
        self.tones.push(tones.to_vec());
    }
    fn speak(&mut self, text: &str) {
        self.spoken.push(text.to_string());
    }
}

impl Host for Recorder {
    fn request_round(&mut self, exclude: Option<Letter>) {
        self.pending_fetch.push(exclude);
    }
    fn schedule(&mut self, delay_ms: u32, timer: Timer) {
        self.timers.push((delay_ms, timer));
    }
}

struct Harness {
    controller: GameController,
    source: RoundSource<StdRng>,
    host: Recorder,
}

impl Harness {
    fn new(seed: u64) -> Self {
        Self {
            controller: GameController::new(Timing::default()),
            source: RoundSource::new(StdRng::seed_from_u64(seed)),
            host: Recorder::default(),
        }
    }

    /// Complete every outstanding fetch as if the generator had no API key.
    fn complete_fetches(&mut self) {
        for exclude in std::mem::take(&mut self.host.pending_fetch) {
            let round = self.source.resolve(Err(SourceError::MissingApiKey), exclude);
            self.controller.round_ready(round, &mut self.host);
        }
    }

    /// Fire all scheduled timers, shortest delay first.
    fn fire_timers(&mut self) {
        let mut timers = std::mem::take(&mut self.host.timers);
        timers.sort_by_key(|(delay, _)| *delay);
        for (_, timer) in timers {
            self.controller.on_timer(timer, &mut self.host);
        }
    }

    fn letter(&self) -> Letter {
        self.controller.session().round.as_ref().unwrap().letter
    }

    fn index_where(&self, correct: bool) -> usize {
        let round = self.controller.session().round.as_ref().unwrap();
        round.options.iter().position(|o| o.is_correct == correct).unwrap()
    }
}

#[test]
fn start_reaches_playing_with_middle_selection() {
    let mut h = Harness::new(1);
    assert_eq!(h.controller.phase(), GamePhase::Intro);
    h.controller.start(&mut h.host);
    assert_eq!(h.controller.phase(), GamePhase::Loading);
    h.complete_fetches();
    assert_eq!(h.controller.phase(), GamePhase::Playing);
    assert!(h.controller.session().round.is_some());
    assert_eq!(h.controller.session().selected, 1);
    assert!(h.host.spoken[0].starts_with("Find the word that starts with"));
}

#[test]
fn correct_pick_cycles_through_success_and_loading_to_a_new_letter() {
    let mut h = Harness::new(2);
    h.controller.start(&mut h.host);
    h.complete_fetches();

    for _ in 0..20 {
        let previous = h.letter();
        let correct = h.index_where(true);
        h.controller.pick(correct, &mut h.host);
        assert_eq!(h.controller.phase(), GamePhase::Success);
        assert_eq!(h.host.tones.last(), Some(&SUCCESS_CHIME.to_vec()));

        // Success never returns to Playing without going through Loading.
        h.fire_timers();
        assert_eq!(h.controller.phase(), GamePhase::Loading);
        h.complete_fetches();
        assert_eq!(h.controller.phase(), GamePhase::Playing);
        assert_ne!(h.letter(), previous);
    }
}

#[test]
fn wrong_pick_flashes_error_and_recovers() {
    let mut h = Harness::new(3);
    h.controller.start(&mut h.host);
    h.complete_fetches();

    let wrong = h.index_where(false);
    h.controller.pick(wrong, &mut h.host);
    assert_eq!(h.controller.phase(), GamePhase::Playing);
    assert_eq!(h.controller.session().errored, Some(wrong));
    assert_eq!(h.host.tones.last(), Some(&ERROR_BUZZ.to_vec()));
    assert_eq!(h.host.spoken.last().map(String::as_str), Some("Try again"));

    // Picks during the flash change nothing.
    let correct = h.index_where(true);
    h.controller.pick(correct, &mut h.host);
    assert_eq!(h.controller.phase(), GamePhase::Playing);
    assert_eq!(h.controller.session().errored, Some(wrong));

    h.fire_timers();
    assert_eq!(h.controller.session().errored, None);
    assert_eq!(h.controller.phase(), GamePhase::Playing);

    h.controller.pick(correct, &mut h.host);
    assert_eq!(h.controller.phase(), GamePhase::Success);
}

#[test]
fn rapid_skips_issue_a_single_fetch() {
    let mut h = Harness::new(4);
    h.controller.start(&mut h.host);
    h.complete_fetches();
    let letter = h.letter();

    for _ in 0..5 {
        h.controller.skip(&mut h.host);
    }
    assert_eq!(h.host.pending_fetch, vec![Some(letter)]);
    h.complete_fetches();
    assert_eq!(h.controller.phase(), GamePhase::Playing);
    assert_ne!(h.letter(), letter);
}

#[test]
fn flash_timer_from_a_skipped_round_is_ignored() {
    let mut h = Harness::new(5);
    h.controller.start(&mut h.host);
    h.complete_fetches();

    let wrong = h.index_where(false);
    h.controller.pick(wrong, &mut h.host);
    // The error flash is still showing, but skip is allowed.
    h.controller.skip(&mut h.host);
    h.complete_fetches();
    assert_eq!(h.controller.session().errored, None);

    let wrong = h.index_where(false);
    h.controller.pick(wrong, &mut h.host);
    // Fire only the stale timer armed in the previous round.
    let stale = h.host.timers.remove(0).1;
    h.controller.on_timer(stale, &mut h.host);
    assert_eq!(h.controller.session().errored, Some(wrong));
}
