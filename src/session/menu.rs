//! The application menu: actions, chord bindings and localized labels.

use std::env;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const APP_NAME: &str = "Classic Player";
pub const HOMEPAGE: &str = "https://github.com/piro0919/mac-classic-player";

/// Extensions the player opens, lowercase. Video: mp4/mov, audio: mp3/m4a/wav.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["mp4", "mp3", "mov", "m4a", "wav"];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuAction {
    OpenFile,
    ToggleHelp,
    About,
    Homepage,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::OpenFile,
        MenuAction::ToggleHelp,
        MenuAction::About,
        MenuAction::Homepage,
        MenuAction::Quit,
    ];

    /// The `Ctrl+<key>` chord bound to this action.
    pub fn chord(self) -> char {
        match self {
            MenuAction::OpenFile => 'o',
            MenuAction::ToggleHelp => 'h',
            MenuAction::About => 'v',
            MenuAction::Homepage => 'g',
            MenuAction::Quit => 'q',
        }
    }

    /// Map a key event to a menu action. Only `Ctrl+<letter>` chords match.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if !key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        let KeyCode::Char(c) = key.code else {
            return None;
        };
        let c = c.to_ascii_lowercase();
        // Ctrl+C quits too, as any terminal program should.
        if c == 'c' {
            return Some(MenuAction::Quit);
        }
        Self::ALL.into_iter().find(|a| a.chord() == c)
    }
}

/// Menu labels in the user's language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuLabels {
    pub file: &'static str,
    pub open_file: &'static str,
    pub help: &'static str,
    pub show_shortcuts: &'static str,
    pub about: &'static str,
    pub homepage: &'static str,
    pub quit: &'static str,
    pub media_files: &'static str,
}

impl MenuLabels {
    const EN: MenuLabels = MenuLabels {
        file: "File",
        open_file: "Open File…",
        help: "Help",
        show_shortcuts: "Show Shortcuts Help",
        about: "About Version",
        homepage: "GitHub",
        quit: "Quit",
        media_files: "Media Files",
    };

    const JA: MenuLabels = MenuLabels {
        file: "ファイル",
        open_file: "ファイルを開く…",
        help: "ヘルプ",
        show_shortcuts: "ショートカット一覧を表示",
        about: "バージョン情報",
        homepage: "GitHub",
        quit: "終了",
        media_files: "メディアファイル",
    };

    pub fn for_locale(locale: &str) -> Self {
        if is_japanese(locale) { Self::JA } else { Self::EN }
    }

    pub fn label(&self, action: MenuAction) -> &'static str {
        match action {
            MenuAction::OpenFile => self.open_file,
            MenuAction::ToggleHelp => self.show_shortcuts,
            MenuAction::About => self.about,
            MenuAction::Homepage => self.homepage,
            MenuAction::Quit => self.quit,
        }
    }
}

/// The user's locale from `LC_ALL`, `LC_MESSAGES` or `LANG`, lowercased.
pub fn system_locale() -> String {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|k| env::var(k).ok())
        .find(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "en".to_string())
        .to_ascii_lowercase()
}

/// True for `ja`, `ja-JP`, `ja_JP.UTF-8` and friends.
pub fn is_japanese(locale: &str) -> bool {
    let lower = locale.to_ascii_lowercase();
    lower == "ja"
        || lower.starts_with("ja-")
        || lower.starts_with("ja_")
        || lower.starts_with("ja.")
}

pub fn about_text(version: &str) -> String {
    format!("{APP_NAME}\nv{version}")
}

/// Case-insensitive suffix match against `SUPPORTED_EXTENSIONS`.
pub fn has_supported_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}
