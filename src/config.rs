//! Configuration system with embedded defaults and XDG-compliant paths.
//!
//! Boot sequence:
//! 1. Parse the embedded `default_config.toml` (compile-time guarantee it exists).
//! 2. Resolve `~/.config/marquee/config.toml` via the `directories` crate.
//! 3. If the user file doesn't exist, create the directory tree and write the default.
//! 4. Parse the user file (falling back to embedded defaults on any error).
//! 5. Store the resolved `Config` in a `OnceLock` for zero-cost global access.
//!
//! Every other module calls `config::get()` to obtain a `&'static Config`.

use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use crossterm::event::KeyCode;
use ratatui::style::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{info, warn};

/// Embedded default configuration — baked into the binary at compile time.
const DEFAULT_CONFIG_STR: &str = include_str!("../default_config.toml");

/// Application-wide config singleton.
static CONFIG: OnceLock<Config> = OnceLock::new();

// ─── Public API ─────────────────────────────────────────────────────────────

/// Initialise the configuration system.  Must be called exactly once at
/// startup, **after** tracing and before any other module calls `get()`.
pub fn init() -> Result<()> {
    let config = load()?;
    CONFIG
        .set(config)
        .map_err(|_| eyre!("Config already initialised"))?;
    Ok(())
}

/// Return a static reference to the loaded configuration.
/// # Panics
/// Panics if `init()` has not been called yet.
pub fn get() -> &'static Config {
    CONFIG.get().expect("config::init() was not called")
}

/// Install the embedded defaults so unit tests can exercise code that calls
/// `get()` without touching the filesystem. Idempotent.
#[cfg(test)]
pub fn ensure_test_defaults() {
    let raw: RawConfig =
        toml::from_str(DEFAULT_CONFIG_STR).expect("embedded default config must parse");
    let _ = CONFIG.set(Config::from(raw));
}

// ─── Loading logic ──────────────────────────────────────────────────────────

fn load() -> Result<Config> {
    // 1. Parse compiled-in defaults — the infallible baseline.
    let defaults: RawConfig = toml::from_str(DEFAULT_CONFIG_STR)
        .wrap_err("BUG: failed to parse embedded default_config.toml")?;

    // 2. Resolve user config path.
    let user_path = config_path();
    info!("Config path: {}", user_path.display());

    // 3. Bootstrap on first run.
    ensure_config_file(&user_path)?;

    // 4. Parse user file; fall back to embedded defaults on *any* error.
    let raw = match fs::read_to_string(&user_path) {
        Ok(contents) => match toml::from_str::<RawConfig>(&contents) {
            Ok(parsed) => {
                info!("Loaded user config from {}", user_path.display());
                parsed
            }
            Err(e) => {
                warn!(
                    "Parse error in {}: {e} — falling back to defaults",
                    user_path.display()
                );
                defaults
            }
        },
        Err(e) => {
            warn!(
                "Cannot read {}: {e} — falling back to defaults",
                user_path.display()
            );
            defaults
        }
    };

    Ok(Config::from(raw))
}

/// Resolve the XDG-compliant config file path.
fn config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "marquee")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            // Fallback when $HOME is somehow unset (extremely rare).
            PathBuf::from(".config/marquee/config.toml")
        })
}

/// Create the config directory tree and write the default file if absent.
fn ensure_config_file(path: &PathBuf) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create config dir: {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG_STR)
        .wrap_err_with(|| format!("Failed to write default config to {}", path.display()))?;
    info!("Created default config at {}", path.display());
    Ok(())
}

// ─── Hex colour helper ─────────────────────────────────────────────────────

/// Parse a `#RRGGBB` hex string into an RGB `Color`.
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Newtype that serialises as `"#RRGGBB"` and deserialises from the same.
#[derive(Debug, Clone, Copy)]
pub struct HexColor(pub Color);

impl Default for HexColor {
    fn default() -> Self {
        HexColor(Color::Reset)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            Color::Rgb(r, g, b) => s.serialize_str(&format!("#{r:02X}{g:02X}{b:02X}")),
            _ => s.serialize_str("#FFFFFF"),
        }
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Ok(HexColor(parse_hex_color(&s).unwrap_or(Color::Reset)))
    }
}

// ─── Raw TOML structures (serde targets) ────────────────────────────────────
//
// Each struct carries `#[serde(default)]` so that missing keys or entire
// sections gracefully fill in from the compiled defaults.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawConfig {
    general: RawGeneral,
    api: RawApi,
    notifications: RawNotifications,
    theme: RawTheme,
    keybindings: RawKeybindings,
}

// ── General ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RawGeneral {
    tick_rate_ms: u64,
}

impl Default for RawGeneral {
    fn default() -> Self {
        Self { tick_rate_ms: 16 }
    }
}

// ── API ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RawApi {
    base_url: String,
}

impl Default for RawApi {
    fn default() -> Self {
        Self {
            // The backend's default bind address.
            base_url: "http://127.0.0.1:5000".into(),
        }
    }
}

// ── Notifications ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RawNotifications {
    info_duration_ms: u64,
    error_duration_ms: u64,
    slide_speed: f32,
}

impl Default for RawNotifications {
    fn default() -> Self {
        Self {
            info_duration_ms: 3000,
            error_duration_ms: 7000,
            slide_speed: 0.08,
        }
    }
}

// ── Theme ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawTheme {
    palette: RawPalette,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RawPalette {
    accent_primary: HexColor,
    accent_secondary: HexColor,
    accent_error: HexColor,
    text_primary: HexColor,
    text_dim: HexColor,
    rating_high: HexColor,
    rating_mid: HexColor,
    rating_low: HexColor,
    border_inactive: HexColor,
}

impl Default for RawPalette {
    fn default() -> Self {
        Self {
            accent_primary: HexColor(Color::Rgb(120, 220, 255)),
            accent_secondary: HexColor(Color::Rgb(180, 160, 255)),
            accent_error: HexColor(Color::Rgb(255, 140, 160)),
            text_primary: HexColor(Color::Rgb(225, 223, 240)),
            text_dim: HexColor(Color::Rgb(120, 124, 150)),
            rating_high: HexColor(Color::Rgb(130, 235, 175)),
            rating_mid: HexColor(Color::Rgb(255, 200, 120)),
            rating_low: HexColor(Color::Rgb(255, 140, 160)),
            border_inactive: HexColor(Color::Rgb(140, 143, 165)),
        }
    }
}

// ── Keybindings ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RawKeybindings {
    quit: String,
    nav_down: String,
    nav_up: String,
    jump_top: String,
    jump_bottom: String,
    next_tab: String,
    prev_tab: String,
    open_detail: String,
    genres: String,
    refresh: String,
    help: String,
}

impl Default for RawKeybindings {
    fn default() -> Self {
        Self {
            quit: "q".into(),
            nav_down: "j".into(),
            nav_up: "k".into(),
            jump_top: "g".into(),
            jump_bottom: "G".into(),
            next_tab: "Tab".into(),
            prev_tab: "BackTab".into(),
            open_detail: "Enter".into(),
            genres: "p".into(),
            refresh: "r".into(),
            help: "?".into(),
        }
    }
}

// ─── Resolved runtime config ────────────────────────────────────────────────
//
// These are the structs the rest of the app interacts with.  All values are
// validated, clamped, and ready to use — no further parsing at render time.

/// Fully resolved, runtime-ready configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub general: GeneralConfig,
    pub api: ApiConfig,
    pub notifications: NotificationsConfig,
    pub theme: ThemeConfig,
    pub keys: KeybindingsConfig,
}

#[derive(Debug, Clone)]
pub struct GeneralConfig {
    pub tick_rate_ms: u64,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct NotificationsConfig {
    pub info_duration_ms: u64,
    pub error_duration_ms: u64,
    pub slide_speed: f32,
}

#[derive(Debug, Clone)]
pub struct ThemeConfig {
    pub palette: Palette,
}

/// Resolved colour palette — every field is a ready-to-use `Color`.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub accent_primary: Color,
    pub accent_secondary: Color,
    pub accent_error: Color,
    pub text_primary: Color,
    pub text_dim: Color,
    pub rating_high: Color,
    pub rating_mid: Color,
    pub rating_low: Color,
    pub border_inactive: Color,
}

/// Pre-parsed keybindings — each field is a `KeyCode` ready for matching.
#[derive(Debug, Clone)]
pub struct KeybindingsConfig {
    pub quit: KeyCode,
    pub nav_down: KeyCode,
    pub nav_up: KeyCode,
    pub jump_top: KeyCode,
    pub jump_bottom: KeyCode,
    pub next_tab: KeyCode,
    pub prev_tab: KeyCode,
    pub open_detail: KeyCode,
    pub genres: KeyCode,
    pub refresh: KeyCode,
    pub help: KeyCode,
}

// ─── Raw → Resolved conversion ─────────────────────────────────────────────

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: GeneralConfig {
                tick_rate_ms: raw.general.tick_rate_ms.clamp(4, 200),
            },
            api: ApiConfig {
                base_url: raw.api.base_url,
            },
            notifications: NotificationsConfig {
                info_duration_ms: raw.notifications.info_duration_ms.clamp(500, 30_000),
                error_duration_ms: raw.notifications.error_duration_ms.clamp(500, 60_000),
                slide_speed: raw.notifications.slide_speed.clamp(0.01, 1.0),
            },
            theme: ThemeConfig {
                palette: Palette {
                    accent_primary: raw.theme.palette.accent_primary.0,
                    accent_secondary: raw.theme.palette.accent_secondary.0,
                    accent_error: raw.theme.palette.accent_error.0,
                    text_primary: raw.theme.palette.text_primary.0,
                    text_dim: raw.theme.palette.text_dim.0,
                    rating_high: raw.theme.palette.rating_high.0,
                    rating_mid: raw.theme.palette.rating_mid.0,
                    rating_low: raw.theme.palette.rating_low.0,
                    border_inactive: raw.theme.palette.border_inactive.0,
                },
            },
            keys: KeybindingsConfig {
                quit: parse_key(&raw.keybindings.quit),
                nav_down: parse_key(&raw.keybindings.nav_down),
                nav_up: parse_key(&raw.keybindings.nav_up),
                jump_top: parse_key(&raw.keybindings.jump_top),
                jump_bottom: parse_key(&raw.keybindings.jump_bottom),
                next_tab: parse_key(&raw.keybindings.next_tab),
                prev_tab: parse_key(&raw.keybindings.prev_tab),
                open_detail: parse_key(&raw.keybindings.open_detail),
                genres: parse_key(&raw.keybindings.genres),
                refresh: parse_key(&raw.keybindings.refresh),
                help: parse_key(&raw.keybindings.help),
            },
        }
    }
}

/// Parse a human-readable key name into a crossterm `KeyCode`.
fn parse_key(s: &str) -> KeyCode {
    match s {
        "Enter" => KeyCode::Enter,
        "Esc" => KeyCode::Esc,
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "Backspace" => KeyCode::Backspace,
        "Space" => KeyCode::Char(' '),
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "Delete" => KeyCode::Delete,
        "Insert" => KeyCode::Insert,
        s if s.len() == 1 => KeyCode::Char(s.chars().next().unwrap()),
        other => {
            warn!("Unknown keybinding \"{other}\" in config — ignoring");
            KeyCode::Null
        }
    }
}
