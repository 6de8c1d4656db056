//! Key binding configuration.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All key bindings, loaded from `keybindings.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybindings {
    pub universal: UniversalKeys,
    pub files: FilesKeys,
    pub stash: StashKeys,
}

/// Keys that work in every panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UniversalKeys {
    pub quit: Vec<String>,
    pub close: Vec<String>,
    pub next_panel: Vec<String>,
    pub prev_panel: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub menu: Vec<String>,
    pub refresh: Vec<String>,
    pub fetch: Vec<String>,
    pub confirm: Vec<String>,
    pub execute: Vec<String>,
    pub scroll_up_main: Vec<String>,
    pub scroll_down_main: Vec<String>,
}

/// Keys of the files panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesKeys {
    pub toggle_staged: Vec<String>,
    pub commit: Vec<String>,
    pub open_staging: Vec<String>,
    pub resolve_conflicts: Vec<String>,
}

/// Keys of the stash panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StashKeys {
    pub drop: Vec<String>,
}

impl Keybindings {
    /// Read from TOML, falling back to defaults when the file is missing.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for UniversalKeys {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            close: keys(&["Esc"]),
            next_panel: keys(&["Tab", "Right", "l"]),
            prev_panel: keys(&["BackTab", "Left", "h"]),
            up: keys(&["Up", "k"]),
            down: keys(&["Down", "j"]),
            menu: keys(&["x"]),
            refresh: keys(&["R"]),
            fetch: keys(&["f"]),
            confirm: keys(&["Enter"]),
            execute: keys(&["Space"]),
            scroll_up_main: keys(&["PgUp"]),
            scroll_down_main: keys(&["PgDn"]),
        }
    }
}

impl Default for FilesKeys {
    fn default() -> Self {
        Self {
            toggle_staged: keys(&["Space"]),
            commit: keys(&["c"]),
            open_staging: keys(&["Enter"]),
            resolve_conflicts: keys(&["m"]),
        }
    }
}

impl Default for StashKeys {
    fn default() -> Self {
        Self { drop: keys(&["d"]) }
    }
}

/// First binding of a list, for hint text.
pub fn primary_key(bindings: &[String]) -> &str {
    bindings.first().map(String::as_str).unwrap_or("")
}

/// True when the event matches any of the binding strings.
pub fn matches_key(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings.iter().any(|s| matches_single_key(key, s))
}

fn matches_single_key(key: &KeyEvent, binding: &str) -> bool {
    // "Ctrl+u", "a", "Enter"
    let parts: Vec<&str> = binding.split('+').collect();
    let (modifiers_str, key_str) = match parts.split_last() {
        Some((last, rest)) if !last.is_empty() => (rest, *last),
        // A literal "+" key.
        _ => (&[][..], "+"),
    };

    let mut expected_modifiers = KeyModifiers::empty();
    for modifier in modifiers_str {
        match modifier.to_ascii_lowercase().as_str() {
            "ctrl" => expected_modifiers |= KeyModifiers::CONTROL,
            "alt" => expected_modifiers |= KeyModifiers::ALT,
            "shift" => expected_modifiers |= KeyModifiers::SHIFT,
            _ => return false,
        }
    }

    // Terminals report SHIFT alongside upper-case letters and BackTab.
    let mut actual_modifiers = key.modifiers;
    if matches!(key.code, KeyCode::BackTab)
        || matches!(key.code, KeyCode::Char(c) if c.is_ascii_uppercase())
    {
        actual_modifiers.remove(KeyModifiers::SHIFT);
        expected_modifiers.remove(KeyModifiers::SHIFT);
    }
    if actual_modifiers != expected_modifiers {
        return false;
    }

    match key_str.to_ascii_lowercase().as_str() {
        "enter" => key.code == KeyCode::Enter,
        "esc" => key.code == KeyCode::Esc,
        "tab" if modifiers_str.iter().any(|m| m.eq_ignore_ascii_case("shift")) => {
            key.code == KeyCode::BackTab
        }
        "tab" => key.code == KeyCode::Tab,
        "backtab" => key.code == KeyCode::BackTab,
        "backspace" => key.code == KeyCode::Backspace,
        "delete" => key.code == KeyCode::Delete,
        "space" => key.code == KeyCode::Char(' '),
        "up" => key.code == KeyCode::Up,
        "down" => key.code == KeyCode::Down,
        "left" => key.code == KeyCode::Left,
        "right" => key.code == KeyCode::Right,
        "home" => key.code == KeyCode::Home,
        "end" => key.code == KeyCode::End,
        "pgup" => key.code == KeyCode::PageUp,
        "pgdn" => key.code == KeyCode::PageDown,
        // Single characters compare case-sensitively.
        _ => {
            let mut chars = key_str.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => key.code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}
