//! Typed messages from the window shell to the UI layer.
//!
//! Open requests carry a `RequestToken` drawn from a shared, monotonically
//! increasing counter. The UI remembers the newest token it has consumed and
//! ignores anything older, so a native open event that duplicates a file the
//! UI already loaded itself (drag-and-drop) is dropped instead of loading the
//! file twice.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellMsg {
    /// Open these files, replacing the queue.
    OpenFiles {
        token: RequestToken,
        paths: Vec<PathBuf>,
    },
    /// Toggle the shortcut help overlay.
    ToggleHelp,
    /// A newer release exists.
    UpdateAvailable(String),
}

/// Shared token counter. Cloning shares the counter.
#[derive(Debug, Clone, Default)]
pub struct RequestTokens {
    last: Arc<AtomicU64>,
}

impl RequestTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next token. Tokens are strictly increasing.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.last.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// UI-side record of the newest consumed open request.
#[derive(Debug, Default)]
pub struct OpenGate {
    consumed: u64,
}

impl OpenGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a shell request if it is newer than anything consumed so far.
    pub fn accept(&mut self, token: RequestToken) -> bool {
        if token.0 > self.consumed {
            self.consumed = token.0;
            true
        } else {
            false
        }
    }

    /// Claim a fresh token for a load the UI started itself. Every request
    /// issued before this call becomes stale.
    pub fn claim(&mut self, tokens: &RequestTokens) -> RequestToken {
        let token = tokens.issue();
        self.consumed = self.consumed.max(token.0);
        token
    }
}
