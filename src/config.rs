//! Configuration loader/writer for widget styles and demo settings.
//!
//! `config.toml` lives in `~/.input-widgets/` (overridable with the
//! `INPUT_WIDGETS_DIR` environment variable). Every section is optional; a
//! missing file or missing field falls back to the built-in defaults.

use crate::widgets::{
    GamepadLayout, GamepadOptions, GamepadStyle, KeyboardLayout, KeyboardOptions, KeyboardStyle,
    MouseLayout, MouseOptions, MouseStyle,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Embedded defaults, used when no config file exists
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Which widget the demo shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    #[default]
    Keyboard,
    Mouse,
    Gamepad,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 3] = [WidgetKind::Keyboard, WidgetKind::Mouse, WidgetKind::Gamepad];

    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::Keyboard => "Keyboard",
            WidgetKind::Mouse => "Mouse",
            WidgetKind::Gamepad => "Gamepad",
        }
    }

    pub fn next(self) -> Self {
        match self {
            WidgetKind::Keyboard => WidgetKind::Mouse,
            WidgetKind::Mouse => WidgetKind::Gamepad,
            WidgetKind::Gamepad => WidgetKind::Keyboard,
        }
    }
}

/// Settings for the terminal demo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub widget: WidgetKind,
    /// Layout names, parsed leniently (unknown names use the default layout)
    pub keyboard_layout: String,
    pub mouse_layout: String,
    pub gamepad_layout: String,
    /// Virtual pixels per terminal column
    pub cell_width: f32,
    /// Virtual pixels per terminal row
    pub cell_height: f32,
    pub font_size: f32,
    /// How long a key counts as down after its last press or repeat event
    pub press_hold_ms: u64,
    pub keyboard: KeyboardOptions,
    pub mouse: MouseOptions,
    pub gamepad: GamepadOptions,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            widget: WidgetKind::Keyboard,
            keyboard_layout: "qwerty".to_string(),
            mouse_layout: "three-button".to_string(),
            gamepad_layout: "xbox".to_string(),
            cell_width: 8.0,
            cell_height: 16.0,
            font_size: 13.0,
            press_hold_ms: 150,
            keyboard: KeyboardOptions { show_pressed: true },
            mouse: MouseOptions {
                show_pressed: true,
                show_wheel: true,
                recordable: false,
            },
            gamepad: GamepadOptions {
                show_pressed: true,
                show_sticks: true,
                show_triggers: true,
                ..GamepadOptions::default()
            },
        }
    }
}

impl DemoConfig {
    pub fn keyboard_layout(&self) -> KeyboardLayout {
        KeyboardLayout::from_name(&self.keyboard_layout)
    }

    pub fn mouse_layout(&self) -> MouseLayout {
        MouseLayout::from_name(&self.mouse_layout)
    }

    pub fn gamepad_layout(&self) -> GamepadLayout {
        GamepadLayout::from_name(&self.gamepad_layout)
    }

    pub fn press_hold(&self) -> Duration {
        Duration::from_millis(self.press_hold_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub keyboard: KeyboardStyle,
    #[serde(default)]
    pub mouse: MouseStyle,
    #[serde(default)]
    pub gamepad: GamepadStyle,
}

impl Config {
    /// Load `config.toml` from the config directory, or the defaults if it
    /// does not exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            tracing::info!("No config at {:?}, using defaults", config_path);
            Self::from_toml_str(DEFAULT_CONFIG).context("Failed to parse embedded default config")
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml_str(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.warn_on_unknown_layouts();
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Write the configuration to `path`, or to the default location
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml_string()?;
        fs::write(&config_path, contents).context("Failed to write config file")?;
        tracing::info!("Saved config to {:?}", config_path);
        Ok(())
    }

    /// Base directory (~/.input-widgets).
    /// Can be overridden with INPUT_WIDGETS_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var("INPUT_WIDGETS_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".input-widgets"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    fn warn_on_unknown_layouts(&self) {
        let demo = &self.demo;
        let checks = [
            (
                "keyboard",
                &demo.keyboard_layout,
                demo.keyboard_layout() == KeyboardLayout::default(),
                KeyboardLayout::default().name(),
            ),
            (
                "mouse",
                &demo.mouse_layout,
                demo.mouse_layout() == MouseLayout::default(),
                MouseLayout::default().name(),
            ),
            (
                "gamepad",
                &demo.gamepad_layout,
                demo.gamepad_layout() == GamepadLayout::default(),
                GamepadLayout::default().name(),
            ),
        ];
        // Only a name that resolved to the default can be unknown
        for (widget, given, is_default, default_name) in checks {
            if is_default && normalize_name(given) != normalize_name(default_name) {
                tracing::warn!(
                    "Unknown {} layout '{}', using '{}'",
                    widget,
                    given,
                    default_name
                );
            }
        }
    }
}

fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{Rgba, Vec2};

    #[test]
    fn test_embedded_default_matches_default() {
        let config = Config::from_toml_str(DEFAULT_CONFIG).expect("embedded config parses");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = Config::from_toml_str("").expect("empty config parses");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
[demo]
widget = "gamepad"
gamepad_layout = "PlayStation"
press_hold_ms = 300

[demo.mouse]
recordable = true

[keyboard]
scale = 1.5
key_face_offset = [2.0, 1.0]

[mouse]
colors = [
    [0.3, 0.3, 0.3, 1.0],
    [0.1, 0.1, 0.1, 1.0],
    [0.4, 0.4, 0.4, 1.0],
    [0.2, 0.2, 0.2, 1.0],
    [1.0, 0.0, 0.0, 0.5],
    [0.0, 1.0, 0.0, 0.5],
    [1.0, 0.0, 1.0, 1.0],
    [0.2, 0.2, 0.2, 1.0],
    [0.5, 0.5, 0.5, 1.0],
]
"#;
        let config = Config::from_toml_str(toml).expect("partial config parses");

        assert_eq!(config.demo.widget, WidgetKind::Gamepad);
        assert_eq!(config.demo.gamepad_layout(), GamepadLayout::PlayStation);
        assert_eq!(config.demo.press_hold(), Duration::from_millis(300));
        assert_eq!(config.demo.keyboard_layout(), KeyboardLayout::Qwerty);
        assert_eq!(config.demo.cell_width, 8.0);

        // Unset option fields fall back to false, not to the demo defaults
        assert!(config.demo.mouse.recordable);
        assert!(!config.demo.mouse.show_wheel);

        assert_eq!(config.keyboard.scale, 1.5);
        assert_eq!(config.keyboard.key_face_offset, Vec2::new(2.0, 1.0));
        assert_eq!(config.keyboard.key_unit, 34.0);
        assert_eq!(config.mouse.colors[6], Rgba::new(1.0, 0.0, 1.0, 1.0));
        assert_eq!(config.gamepad, GamepadStyle::default());
    }

    #[test]
    fn test_unknown_layout_falls_back() {
        let config = Config::from_toml_str("[demo]\nkeyboard_layout = \"workman\"\n")
            .expect("config parses");
        assert_eq!(config.demo.keyboard_layout(), KeyboardLayout::Qwerty);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::from_toml_str("[demo\nwidget = 1").is_err());
        assert!(Config::from_toml_str("[demo]\nwidget = \"joystick\"").is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = Config::default();
        config.demo.widget = WidgetKind::Mouse;
        config.demo.mouse_layout = "two-button".to_string();
        config.keyboard.scale = 2.0;
        config.gamepad.colors[0] = Rgba::new(0.5, 0.25, 0.125, 1.0);

        let text = config.to_toml_string().expect("serializes");
        let parsed = Config::from_toml_str(&text).expect("parses");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("input-widgets-test-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = Config::default();
        config.demo.font_size = 16.0;
        config.save(Some(&path)).expect("saves");

        let loaded = Config::load_from_file(&path).expect("loads");
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(&dir);
    }
}
