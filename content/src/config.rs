use serde::Deserialize;

pub const FRIENDS_KEY: &str = "omc_friends";
pub const SETTINGS_KEY: &str = "omc_settings";

pub const STANDINGS_ROOT_SELECTOR: &str = "#standings";
pub const TBODY_SELECTOR: &str = "#standings table tbody";
pub const ROW_SELECTOR: &str = "#standings table tbody tr";
pub const USER_LINK_SELECTOR: &str = r#"a[href*="/users/"]"#;
pub const STANDINGS_LINK_SELECTOR: &str = r#"#standings a[href*="/users/"]"#;

pub const INJECTED_CLASS: &str = "omc-injected";
pub const STAR_CLASS: &str = "omc-s-btn";
pub const STAR_NAME_ATTR: &str = "data-omc-name";
pub const TOGGLE_ID: &str = "omc-friends-toggle";
pub const INDICATOR_ID: &str = "omc-loading-indicator";

pub const HIGHLIGHT_BACKGROUND: &str = "rgba(241,196,15,0.1)";
pub const HIGHLIGHT_BORDER: &str = "5px solid #ffc107";
pub const INJECTED_ROW_STYLE: &str = "background:rgba(241,196,15,0.1);border-left:5px solid #ffc107;";

pub const DEFAULT_DEBOUNCE_MS: u32 = 100;
pub const DEFAULT_INDICATOR_DISMISS_MS: u32 = 3000;
pub const DEFAULT_FETCH_TIMEOUT_MS: u32 = 20_000;

/// Timing knobs, optionally overridden by an `omc_settings` object in
/// extension storage. Missing or zero values fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub debounce_ms: u32,
    pub indicator_dismiss_ms: u32,
    pub fetch_timeout_ms: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            indicator_dismiss_ms: DEFAULT_INDICATOR_DISMISS_MS,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
        }
    }
}

impl ContentConfig {
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let or_default = |value: u32, default: u32| if value > 0 { value } else { default };
        Self {
            debounce_ms: or_default(self.debounce_ms, defaults.debounce_ms),
            indicator_dismiss_ms: or_default(
                self.indicator_dismiss_ms,
                defaults.indicator_dismiss_ms,
            ),
            fetch_timeout_ms: or_default(self.fetch_timeout_ms, defaults.fetch_timeout_ms),
        }
    }
}
