//! Browser runtime for Letter Pop.
//!
//! The game logic lives in [`controller`] and [`source`] and never touches the
//! browser. This module wires them up: app state sits in a thread-local,
//! DOM listeners and timer/fetch completions re-enter through [`with_app`],
//! and every mutation is followed by a re-render of the [`view`].
//!
//! Host calls only enqueue work (`spawn_local`, `Timeout`), so the state cell
//! is never borrowed re-entrantly.
use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

pub mod audio;
pub mod config;
pub mod controller;
pub mod gemini;
pub mod round;
pub mod source;
mod view;

use audio::{AudioNarrator, Narrator, Tone};
use config::GameConfig;
use controller::{GameController, Host, Key, Timer};
use round::Letter;
use source::RoundSource;
use view::View;

// --- Host -------------------------------------------------------------------

struct WebHost {
    narrator: AudioNarrator,
    config: Rc<GameConfig>,
}

impl Narrator for WebHost {
    fn play_tones(&mut self, tones: &[Tone]) {
        self.narrator.play_tones(tones);
    }

    fn speak(&mut self, text: &str) {
        self.narrator.speak(text);
    }
}

impl Host for WebHost {
    fn request_round(&mut self, exclude: Option<Letter>) {
        let config = Rc::clone(&self.config);
        wasm_bindgen_futures::spawn_local(async move {
            let generated = gemini::generate_round(&config, exclude).await;
            with_app(|app| {
                let round = app.source.resolve(generated, exclude);
                app.controller.round_ready(round, &mut app.host);
            });
        });
    }

    fn schedule(&mut self, delay_ms: u32, timer: Timer) {
        Timeout::new(delay_ms, move || {
            with_app(|app| app.controller.on_timer(timer, &mut app.host));
        })
        .forget();
    }
}

// --- App state --------------------------------------------------------------

struct App {
    controller: GameController,
    source: RoundSource<StdRng>,
    host: WebHost,
    view: View,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Mutate the app (if started) and re-render.
fn with_app(f: impl FnOnce(&mut App)) {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            f(app);
            app.view.render(app.controller.session());
        }
    });
}

fn seeded_rng() -> StdRng {
    let mut seed = [0u8; 32];
    match getrandom::getrandom(&mut seed) {
        Ok(()) => StdRng::from_seed(seed),
        Err(e) => {
            log::warn!("no browser entropy ({e}); seeding from clock");
            StdRng::seed_from_u64(js_sys::Date::now() as u64)
        }
    }
}

// --- Entry ------------------------------------------------------------------

pub(crate) fn start_game_mode(config: GameConfig) -> Result<(), JsValue> {
    if APP.with(|cell| cell.borrow().is_some()) {
        log::warn!("start_game called twice; keeping the running session");
        return Ok(());
    }
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let view = View::mount(&doc)?;

    // Play button: the click is the user gesture that unlocks audio.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_app(|app| {
                app.host.narrator.unlock();
                app.controller.start(&mut app.host);
            });
        }) as Box<dyn FnMut(_)>);
        view.start_button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Card clicks / taps
    for (index, card) in view.cards.iter().enumerate() {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_app(|app| app.controller.pointer_pick(index, &mut app.host));
        }) as Box<dyn FnMut(_)>);
        card.button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keyboard: arrows select, Enter picks, Space skips
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let key = Key::from_dom(&evt.key());
            with_app(|app| {
                if app.controller.on_key(key, &mut app.host) {
                    evt.prevent_default();
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    if config.api_key().is_none() {
        log::info!("no API key configured; rounds come from the built-in table");
    }
    let app = App {
        controller: GameController::new(config.timing),
        source: RoundSource::new(seeded_rng()),
        host: WebHost {
            narrator: AudioNarrator,
            config: Rc::new(config),
        },
        view,
    };
    app.view.render(app.controller.session());
    APP.with(|cell| cell.replace(Some(app)));
    Ok(())
}
