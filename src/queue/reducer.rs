//! The queue state machine: `QueueState`, `QueueAction` and `reduce`.

use super::model::{ItemId, QueueItem, TrackMetadata};

/// Transport state plus the loaded queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueState {
    pub queue: Vec<QueueItem>,
    /// Index into `queue`; meaningless while the queue is empty.
    pub current_index: usize,
    pub is_playing: bool,
    pub muted: bool,
    /// Playback position in seconds.
    pub current_time: f64,
    /// Length of the current item in seconds, `0.0` until known.
    pub duration: f64,
}

impl QueueState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&QueueItem> {
        self.queue.get(self.current_index)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueueAction {
    /// Replace the queue and reset the transport.
    LoadFiles(Vec<QueueItem>),
    Next,
    Previous,
    /// Jump to an index. Not clamped; callers pass valid indices.
    SetIndex(usize),
    SetCurrentTime(f64),
    SetDuration(f64),
    SetIsPlaying(bool),
    TogglePlay,
    SetMuted(bool),
    ToggleMuted,
    /// Pause playback. Seeking back to the start is the caller's job.
    Stop,
    /// Merge enrichment results into the item at `index`, provided it is
    /// still the item identified by `id`.
    UpdateMediaInfo {
        index: usize,
        id: ItemId,
        artwork_url: Option<String>,
        metadata: Option<TrackMetadata>,
    },
}

impl QueueAction {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadFiles(_) => "LOAD_FILES",
            Self::Next => "NEXT",
            Self::Previous => "PREVIOUS",
            Self::SetIndex(_) => "SET_INDEX",
            Self::SetCurrentTime(_) => "SET_CURRENT_TIME",
            Self::SetDuration(_) => "SET_DURATION",
            Self::SetIsPlaying(_) => "SET_IS_PLAYING",
            Self::TogglePlay => "TOGGLE_PLAY",
            Self::SetMuted(_) => "SET_MUTED",
            Self::ToggleMuted => "TOGGLE_MUTED",
            Self::Stop => "STOP",
            Self::UpdateMediaInfo { .. } => "UPDATE_MEDIA_INFO",
        }
    }
}

/// Apply `action` to `state`. Never panics; invalid actions leave the state
/// as it was.
pub fn reduce(mut state: QueueState, action: QueueAction) -> QueueState {
    match action {
        QueueAction::LoadFiles(items) => {
            if items.is_empty() {
                return state;
            }
            QueueState {
                queue: items,
                current_index: 0,
                is_playing: false,
                muted: false,
                current_time: 0.0,
                duration: 0.0,
            }
        }
        QueueAction::Next => {
            if !state.queue.is_empty() {
                state.current_index = (state.current_index + 1) % state.queue.len();
            }
            state
        }
        QueueAction::Previous => {
            let len = state.queue.len();
            if len > 0 {
                // `current_index` may be out of range after SET_INDEX; fold it first.
                state.current_index = (state.current_index % len + len - 1) % len;
            }
            state
        }
        QueueAction::SetIndex(index) => {
            state.current_index = index;
            state
        }
        QueueAction::SetCurrentTime(t) => {
            state.current_time = t;
            state
        }
        QueueAction::SetDuration(d) => {
            state.duration = d;
            state
        }
        QueueAction::SetIsPlaying(v) => {
            state.is_playing = v;
            state
        }
        QueueAction::TogglePlay => {
            state.is_playing = !state.is_playing;
            state
        }
        QueueAction::SetMuted(v) => {
            state.muted = v;
            state
        }
        QueueAction::ToggleMuted => {
            state.muted = !state.muted;
            state
        }
        QueueAction::Stop => {
            state.is_playing = false;
            state
        }
        QueueAction::UpdateMediaInfo {
            index,
            id,
            artwork_url,
            metadata,
        } => {
            if let Some(item) = state.queue.get_mut(index).filter(|item| item.id == id) {
                if artwork_url.is_some() {
                    item.artwork_url = artwork_url;
                }
                if metadata.is_some() {
                    item.metadata = metadata;
                }
            }
            state
        }
    }
}
