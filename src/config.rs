// src/config.rs
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::editor::list::{DEFAULT_ADD_CONTROL_ID, DEFAULT_CONTAINER_ID};
use crate::editor::PageLayout;
use crate::error::{Error, Result};

const CONFIG_DIR: &str = "hlnote";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub drafts_dir: PathBuf,
    /// Used when `HLNOTE_LOG` is unset.
    pub log_filter: String,
    pub keys: KeyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            layout: LayoutConfig::default(),
            drafts_dir: PathBuf::from("drafts"),
            log_filter: "hlnote=info".to_string(),
            keys: KeyConfig::default(),
        }
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Loads the user config, falling back to defaults when none exists.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&data)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub container_id: String,
    pub add_control_id: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            add_control_id: DEFAULT_ADD_CONTROL_ID.to_string(),
        }
    }
}

impl LayoutConfig {
    /// An empty id means the page has no such element.
    pub fn page_layout(&self, highlight_count: Option<u32>) -> PageLayout {
        let present = |id: &str| Some(id.trim().to_string()).filter(|id| !id.is_empty());
        PageLayout {
            container_id: present(&self.container_id),
            add_control_id: present(&self.add_control_id),
            highlight_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub add: String,
    pub remove: String,
    pub next: String,
    pub prev: String,
    pub export: String,
    pub quit: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        KeyConfig {
            add: "ctrl+n".to_string(),
            remove: "ctrl+d".to_string(),
            next: "tab".to_string(),
            prev: "backtab".to_string(),
            export: "ctrl+s".to_string(),
            quit: "esc".to_string(),
        }
    }
}

impl KeyConfig {
    pub fn bindings(&self) -> Result<KeyBindings> {
        Ok(KeyBindings {
            add: KeyBinding::parse(&self.add)?,
            remove: KeyBinding::parse(&self.remove)?,
            next: KeyBinding::parse(&self.next)?,
            prev: KeyBinding::parse(&self.prev)?,
            export: KeyBinding::parse(&self.export)?,
            quit: KeyBinding::parse(&self.quit)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        KeyBinding { code, modifiers }
    }

    /// Parses strings such as `ctrl+n`, `alt+shift+r` or `f2`.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidKeybinding(value.to_string());
        let mut modifiers = KeyModifiers::NONE;
        let mut key_part: Option<&str> = None;

        for part in value.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "alt" | "option" => modifiers |= KeyModifiers::ALT,
                _ if key_part.is_some() => return Err(invalid()),
                _ => key_part = Some(part),
            }
        }

        let code = match key_part.and_then(parse_key_code).ok_or_else(invalid)? {
            // Shifted letters arrive upper-cased.
            KeyCode::Char(ch) if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::Char(ch.to_ascii_uppercase()),
            code => code,
        };
        Ok(KeyBinding::new(code, modifiers))
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        let same_key = match (event.code, self.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        };
        if !same_key {
            return false;
        }
        // Terminals report BackTab with SHIFT held.
        self.code == KeyCode::BackTab || event.modifiers == self.modifiers
    }
}

fn parse_key_code(value: &str) -> Option<KeyCode> {
    let lower = value.to_ascii_lowercase();
    let code = match lower.as_str() {
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        _ if lower.len() > 1 && lower.starts_with('f') => KeyCode::F(lower[1..].parse().ok()?),
        _ => {
            let mut chars = value.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch.to_ascii_lowercase())
        }
    };
    Some(code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub add: KeyBinding,
    pub remove: KeyBinding,
    pub next: KeyBinding,
    pub prev: KeyBinding,
    pub export: KeyBinding,
    pub quit: KeyBinding,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            add: KeyBinding::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
            remove: KeyBinding::new(KeyCode::Char('d'), KeyModifiers::CONTROL),
            next: KeyBinding::new(KeyCode::Tab, KeyModifiers::NONE),
            prev: KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            export: KeyBinding::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
            quit: KeyBinding::new(KeyCode::Esc, KeyModifiers::NONE),
        }
    }
}
