// Runtime configuration passed from JS to `start_game(options)`.
use serde::Deserialize;
use wasm_bindgen::JsValue;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Delays (milliseconds) for the timed transitions.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Timing {
    /// Success cue -> spoken echo of the chosen word.
    pub word_echo_ms: u32,
    /// Success -> next round fetch.
    pub success_advance_ms: u32,
    /// Wrong pick flash duration.
    pub error_clear_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            word_echo_ms: 800,
            success_advance_ms: 3000,
            error_clear_ms: 1000,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Gemini API key; absent or blank means fallback content only.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub log_level: log::Level,
    pub timing: Timing,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            log_level: log::Level::Info,
            timing: Timing::default(),
        }
    }
}

impl GameConfig {
    /// Read the options object handed to `start_game`; `undefined`/`null` means defaults.
    pub fn from_js(options: JsValue) -> Result<Self, serde_wasm_bindgen::Error> {
        if options.is_undefined() || options.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(options)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = GameConfig::default();
        assert_eq!(c.model, DEFAULT_MODEL);
        assert_eq!(c.timing.success_advance_ms, 3000);
        assert!(c.api_key().is_none());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let c = GameConfig {
            api_key: Some("   ".into()),
            ..GameConfig::default()
        };
        assert!(c.api_key().is_none());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c: GameConfig = serde_json::from_str(
            r#"{"apiKey":"k","logLevel":"debug","timing":{"errorClearMs":500}}"#,
        )
        .unwrap();
        assert_eq!(c.api_key(), Some("k"));
        assert_eq!(c.log_level, log::Level::Debug);
        assert_eq!(c.timing.error_clear_ms, 500);
        assert_eq!(c.timing.word_echo_ms, 800);
        assert_eq!(c.endpoint, DEFAULT_ENDPOINT);
    }
}
