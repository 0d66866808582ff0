//! Application model: `App` and the overlay/picker flags rendered by the UI.
//!
//! `App` wraps the reducer-owned `QueueState` together with UI-only state
//! (overlays, fullscreen, window title, status line) and the actions that
//! were deferred to the next turn of the event loop.

use crate::picker::FilePicker;
use crate::queue::{QueueAction, QueueItem, QueueState, reduce};
use crate::session::menu::MenuLabels;

/// Where an open file picker was requested from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickerOrigin {
    /// The File menu (`Ctrl+O`). The selection goes through the shell.
    Menu,
    /// The `O` shortcut. The selection is ingested directly.
    Shortcut,
}

/// The main application model.
pub struct App {
    pub state: QueueState,
    /// Output volume in `[0, 1]`.
    pub volume: f64,

    pub show_help: bool,
    pub show_info: bool,
    pub show_about: bool,
    pub fullscreen: bool,
    pub picker: Option<(FilePicker, PickerOrigin)>,

    pub labels: MenuLabels,
    pub title: String,
    pub status: Option<String>,
    pub should_quit: bool,

    deferred: Vec<QueueAction>,
    generation: u64,
}

impl App {
    pub fn new(volume: f64, labels: MenuLabels) -> Self {
        Self {
            state: QueueState::new(),
            volume: volume.clamp(0.0, 1.0),
            show_help: false,
            show_info: false,
            show_about: false,
            fullscreen: false,
            picker: None,
            labels,
            title: crate::session::menu::APP_NAME.to_string(),
            status: None,
            should_quit: false,
            deferred: Vec::new(),
            generation: 0,
        }
    }

    /// Run `action` through the reducer.
    pub fn dispatch(&mut self, action: QueueAction) {
        tracing::trace!(action = action.name(), "dispatch");
        if matches!(&action, QueueAction::LoadFiles(items) if !items.is_empty()) {
            self.generation += 1;
        }
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Queue `action` for the next turn of the event loop.
    pub fn defer(&mut self, action: QueueAction) {
        self.deferred.push(action);
    }

    pub fn take_deferred(&mut self) -> Vec<QueueAction> {
        std::mem::take(&mut self.deferred)
    }

    /// Bumped every time LOAD_FILES replaces the queue.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current(&self) -> Option<&QueueItem> {
        self.state.current()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn open_picker(&mut self, picker: FilePicker, origin: PickerOrigin) {
        self.picker = Some((picker, origin));
    }

    pub fn close_picker(&mut self) {
        self.picker = None;
    }
}
