//! In-terminal file picker used by the Open File menu item and the `O` key.
//!
//! Lists one directory at a time (subdirectories first, then files with a
//! supported extension) and lets the user mark several files before
//! confirming.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};
use walkdir::WalkDir;

use crate::error::{PlayerError, Result};
use crate::session::menu::has_supported_extension;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    /// Still browsing.
    Pending,
    Cancelled,
    /// Files chosen, in the order they were marked.
    Confirmed(Vec<PathBuf>),
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// List `dir`: visible subdirectories, then supported media files, each
/// group sorted case-insensitively.
pub fn list_dir(dir: &Path) -> Result<Vec<PickerEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            // The directory itself is unreadable.
            Err(e) if e.depth() == 0 => return Err(PlayerError::io(dir, e.into())),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if is_hidden(&name) {
            continue;
        }
        let is_dir = entry.file_type().is_dir();
        if !is_dir && !has_supported_extension(&name) {
            continue;
        }
        entries.push(PickerEntry {
            path: entry.into_path(),
            name,
            is_dir,
        });
    }
    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}

pub struct FilePicker {
    dir: PathBuf,
    entries: Vec<PickerEntry>,
    selected: usize,
    marked: Vec<PathBuf>,
    /// Set when the current directory could not be read.
    pub error: Option<String>,
}

impl FilePicker {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        // Absolute paths keep `go_up` working from relative start dirs.
        let dir = dir.canonicalize().unwrap_or(dir);
        let mut picker = Self {
            dir,
            entries: Vec::new(),
            selected: 0,
            marked: Vec::new(),
            error: None,
        };
        picker.refresh();
        picker
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_marked(&self, path: &Path) -> bool {
        self.marked.iter().any(|p| p == path)
    }

    /// Re-read the current directory.
    pub fn refresh(&mut self) {
        match list_dir(&self.dir) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(dir = ?self.dir, error = %e, "cannot list directory");
                self.entries.clear();
                self.error = Some(e.to_string());
            }
        }
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> PickerOutcome {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return PickerOutcome::Cancelled,
            KeyCode::Down | KeyCode::Char('j') => self.move_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-1),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.entries.len().saturating_sub(1)
            }
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => self.go_up(),
            KeyCode::Right | KeyCode::Char('l') => {
                if self.current().is_some_and(|e| e.is_dir) {
                    self.enter_selected_dir();
                }
            }
            KeyCode::Char(' ') => self.toggle_mark(),
            KeyCode::Enter => return self.activate(),
            _ => {}
        }
        PickerOutcome::Pending
    }

    fn current(&self) -> Option<&PickerEntry> {
        self.entries.get(self.selected)
    }

    fn move_by(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len() as isize;
        self.selected = (self.selected as isize + delta).clamp(0, len - 1) as usize;
    }

    fn toggle_mark(&mut self) {
        let Some(entry) = self.current() else {
            return;
        };
        if entry.is_dir {
            return;
        }
        let path = entry.path.clone();
        if let Some(pos) = self.marked.iter().position(|p| *p == path) {
            self.marked.remove(pos);
        } else {
            self.marked.push(path);
        }
        self.move_by(1);
    }

    fn activate(&mut self) -> PickerOutcome {
        let Some(entry) = self.current() else {
            return PickerOutcome::Pending;
        };
        if entry.is_dir {
            self.enter_selected_dir();
            return PickerOutcome::Pending;
        }
        if self.marked.is_empty() {
            PickerOutcome::Confirmed(vec![entry.path.clone()])
        } else {
            PickerOutcome::Confirmed(self.marked.clone())
        }
    }

    fn enter_selected_dir(&mut self) {
        if let Some(entry) = self.current() {
            self.dir = entry.path.clone();
            self.selected = 0;
            self.refresh();
        }
    }

    fn go_up(&mut self) {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return;
        };
        let previous = std::mem::replace(&mut self.dir, parent);
        self.selected = 0;
        self.refresh();
        if let Some(pos) = self.entries.iter().position(|e| e.path == previous) {
            self.selected = pos;
        }
    }
}
