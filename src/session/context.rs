use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use crate::queue::{ItemId, SourceRegistry};

use super::menu::has_supported_extension;
use super::messages::{RequestTokens, ShellMsg};
use super::window::{PLAYER_PREFS_FILE, PlayerPrefs, WINDOW_SETTINGS_FILE, WindowSettings};

/// Everything the window shell owns for one run of the player.
///
/// Created once at startup and torn down on exit; components that need
/// session state receive it explicitly instead of reaching for globals.
pub struct Session {
    state_dir: Option<PathBuf>,
    window: WindowSettings,
    restored_window: bool,
    prefs: PlayerPrefs,
    pending_open: Vec<PathBuf>,
    pub sources: SourceRegistry,
    tokens: RequestTokens,
    next_item_id: u64,
    shell_tx: Sender<ShellMsg>,
}

impl Session {
    /// Load persisted state from `state_dir` and pick the pending open file
    /// from the command line `args` (program name excluded).
    pub fn start<I, S>(state_dir: Option<PathBuf>, args: I, shell_tx: Sender<ShellMsg>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (window, restored_window) = match state_dir.as_deref() {
            Some(dir) => match WindowSettings::load(&dir.join(WINDOW_SETTINGS_FILE)) {
                Some(w) => (w, true),
                None => (WindowSettings::default(), false),
            },
            None => (WindowSettings::default(), false),
        };
        let prefs = state_dir
            .as_deref()
            .map(|dir| PlayerPrefs::load_or_default(&dir.join(PLAYER_PREFS_FILE)))
            .unwrap_or_default();

        let pending_open: Vec<PathBuf> = pending_open_from_args(args).into_iter().collect();
        if let Some(p) = pending_open.first() {
            tracing::info!(path = ?p, "file requested on the command line");
        }

        Self {
            state_dir,
            window,
            restored_window,
            prefs,
            pending_open,
            sources: SourceRegistry::new(),
            tokens: RequestTokens::new(),
            next_item_id: 0,
            shell_tx,
        }
    }

    pub fn window(&self) -> WindowSettings {
        self.window
    }

    /// True when the window size came from a previous session.
    pub fn restored_window(&self) -> bool {
        self.restored_window
    }

    pub fn volume(&self) -> f64 {
        self.prefs.volume
    }

    pub fn tokens(&self) -> &RequestTokens {
        &self.tokens
    }

    /// Record a new window size and persist it. Failures are logged only.
    pub fn on_resize(&mut self, width: u16, height: u16) {
        let next = WindowSettings {
            window_width: width,
            window_height: height,
        };
        if next == self.window {
            return;
        }
        self.window = next;
        if let Some(path) = self.state_file(WINDOW_SETTINGS_FILE) {
            if let Err(e) = self.window.save(&path) {
                tracing::warn!(error = %e, "failed to save window settings");
            }
        }
    }

    /// Record a new volume and persist it. Failures are logged only.
    pub fn set_volume(&mut self, volume: f64) {
        let next = PlayerPrefs { volume }.clamped();
        if next == self.prefs {
            return;
        }
        self.prefs = next;
        if let Some(path) = self.state_file(PLAYER_PREFS_FILE) {
            if let Err(e) = self.prefs.save(&path) {
                tracing::warn!(error = %e, "failed to save player preferences");
            }
        }
    }

    /// Send the pending startup file to the UI, once. Returns true if sent.
    pub fn deliver_pending_open(&mut self) -> bool {
        if self.pending_open.is_empty() {
            return false;
        }
        let paths = std::mem::take(&mut self.pending_open);
        self.request_open(paths);
        true
    }

    /// Ask the UI to open `paths` (file dialog, OS open events).
    pub fn request_open(&self, paths: Vec<PathBuf>) {
        let token = self.tokens.issue();
        tracing::debug!(token = token.raw(), count = paths.len(), "open-file request");
        self.send(ShellMsg::OpenFiles { token, paths });
    }

    /// A sender for background tasks that post shell messages.
    pub fn shell_sender(&self) -> Sender<ShellMsg> {
        self.shell_tx.clone()
    }

    pub fn send(&self, msg: ShellMsg) {
        if self.shell_tx.send(msg).is_err() {
            tracing::debug!("UI channel closed, dropping shell message");
        }
    }

    pub fn next_item_id(&mut self) -> ItemId {
        self.next_item_id += 1;
        ItemId(self.next_item_id)
    }

    /// Release every registered media source.
    pub fn teardown(&mut self) {
        let released = self.sources.release_all();
        tracing::info!(released, "session closed");
    }

    fn state_file(&self, name: &str) -> Option<PathBuf> {
        self.state_dir.as_deref().map(|d: &Path| d.join(name))
    }
}

/// The first argument naming a file with a supported extension.
pub fn pending_open_from_args<I, S>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .find(|a| has_supported_extension(a.as_ref()))
        .map(|a| PathBuf::from(a.as_ref()))
}
