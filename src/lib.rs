//! Letter Pop core crate.
//!
//! A single-screen picture game for young children: a letter is shown with
//! three pictured words and the child taps the one that starts with it.
//! Rounds come from a Gemini generator when an API key is configured and from
//! the built-in [`FALLBACK_ROUNDS`] table otherwise. Entry point for JS is
//! [`start_game`].

use wasm_bindgen::prelude::*;

mod error;
pub mod game;

pub use error::SourceError;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Fallback rounds, used whenever the generator cannot be reached.
// Each entry: letter, then [correct, distractor, distractor] as (word, emoji).
// -----------------------------------------------------------------------------

pub type FallbackEntry = (char, [(&'static str, &'static str); 3]);

pub const FALLBACK_ROUNDS: &[FallbackEntry] = &[
    ('A', [("Apple", "🍎"), ("Dog", "🐶"), ("Car", "🚗")]),
    ('B', [("Ball", "⚽"), ("Cat", "🐱"), ("Sun", "☀️")]),
    ('C', [("Cat", "🐱"), ("Pig", "🐷"), ("Bus", "🚌")]),
    ('D', [("Duck", "🦆"), ("Fish", "🐟"), ("Moon", "🌙")]),
    ('F', [("Frog", "🐸"), ("Bee", "🐝"), ("Tree", "🌳")]),
    ('M', [("Monkey", "🐒"), ("Egg", "🥚"), ("Star", "⭐")]),
    ('S', [("Sun", "☀️"), ("Apple", "🍎"), ("Hat", "🎩")]),
    ('T', [("Tiger", "🐯"), ("Banana", "🍌"), ("Car", "🚗")]),
];

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Start the game. `options` is an optional object such as
/// `{ apiKey, model, endpoint, logLevel, timing: { wordEchoMs, successAdvanceMs, errorClearMs } }`.
#[wasm_bindgen]
pub fn start_game(options: JsValue) -> Result<(), JsValue> {
    let config = game::config::GameConfig::from_js(options)?;
    // A second init (page re-run) keeps the first logger.
    let _ = console_log::init_with_level(config.log_level);
    game::start_game_mode(config)
}
