//! Registry of media source handles.
//!
//! Items never carry file paths directly; they carry a `SourceHandle` that
//! the media element and the artwork loop resolve here. Handles are owned by
//! the session and must be released once their item leaves the queue.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceHandle(u64);

#[derive(Debug, Default)]
pub struct SourceRegistry {
    next: u64,
    entries: HashMap<SourceHandle, PathBuf>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` and return a fresh handle for it.
    pub fn register(&mut self, path: impl Into<PathBuf>) -> SourceHandle {
        self.next += 1;
        let handle = SourceHandle(self.next);
        self.entries.insert(handle, path.into());
        handle
    }

    pub fn resolve(&self, handle: SourceHandle) -> Option<&Path> {
        self.entries.get(&handle).map(PathBuf::as_path)
    }

    /// Release a handle. Returns false when it was not registered.
    #[cfg(test)]
    pub fn release(&mut self, handle: SourceHandle) -> bool {
        self.entries.remove(&handle).is_some()
    }

    /// Release every handle that is not in `keep`.
    pub fn release_except(&mut self, keep: &[SourceHandle]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|h, _| keep.contains(h));
        before - self.entries.len()
    }

    pub fn release_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
