use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use cukelog_sink::{OutputStream, SinkError, StreamOpener};

use crate::stream::MemoryStream;

/// What the next `open_append_or_create` call does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenBehavior {
    #[default]
    Writable,
    ReadOnly,
    Fail,
}

#[derive(Debug, Default)]
struct OpenerState {
    behavior: OpenBehavior,
    files: HashMap<PathBuf, MemoryStream>,
    attempts: usize,
    acquisitions: usize,
    last: Option<MemoryStream>,
}

/// In-memory [`StreamOpener`]. Each path maps to one shared buffer that
/// survives reopening, like an append-mode file.
#[derive(Debug, Default)]
pub struct MemoryStreamOpener {
    state: Mutex<OpenerState>,
}

impl MemoryStreamOpener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_behavior(behavior: OpenBehavior) -> Self {
        let opener = Self::default();
        opener.set_behavior(behavior);
        opener
    }

    pub fn set_behavior(&self, behavior: OpenBehavior) {
        self.lock().behavior = behavior;
    }

    /// Calls to `open_append_or_create`, failed ones included.
    pub fn attempt_count(&self) -> usize {
        self.lock().attempts
    }

    /// Streams actually handed out.
    pub fn acquisition_count(&self) -> usize {
        self.lock().acquisitions
    }

    /// Observer clone of the most recently handed-out stream.
    pub fn last_stream(&self) -> Option<MemoryStream> {
        self.lock().last.clone()
    }

    /// Contents of the buffer behind `path`, if it was ever opened.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock().files.get(path.as_ref()).map(MemoryStream::contents)
    }

    fn lock(&self) -> MutexGuard<'_, OpenerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StreamOpener for MemoryStreamOpener {
    fn open_append_or_create(&self, path: &Path) -> Result<Box<dyn OutputStream>, SinkError> {
        let mut state = self.lock();
        state.attempts += 1;

        let stream = match state.behavior {
            OpenBehavior::Fail => {
                return Err(SinkError::Open {
                    path: path.to_path_buf(),
                    source: io::Error::new(
                        io::ErrorKind::PermissionDenied,
                        "memory opener configured to fail",
                    ),
                });
            }
            OpenBehavior::ReadOnly => MemoryStream::read_only(Vec::new()),
            OpenBehavior::Writable => state.files.entry(path.to_path_buf()).or_default().reopen(),
        };

        state.acquisitions += 1;
        state.last = Some(stream.clone());
        tracing::debug!(path = %path.display(), "memory stream opened");
        Ok(Box::new(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_counts_attempt_only() {
        let opener = MemoryStreamOpener::with_behavior(OpenBehavior::Fail);
        assert!(opener.open_append_or_create(Path::new("x")).is_err());
        assert_eq!(opener.attempt_count(), 1);
        assert_eq!(opener.acquisition_count(), 0);
        assert!(opener.last_stream().is_none());
    }

    #[test]
    fn same_path_shares_buffer() {
        let opener = MemoryStreamOpener::new();
        let mut first = opener.open_append_or_create(Path::new("log")).unwrap();
        first.write_all(b"ab").unwrap();
        let mut second = opener.open_append_or_create(Path::new("log")).unwrap();
        second.write_all(b"cd").unwrap();

        assert_eq!(opener.contents("log").unwrap(), b"abcd");
        assert!(opener.contents("other").is_none());
    }

    #[test]
    fn read_only_behavior_hands_out_unwritable_stream() {
        let opener = MemoryStreamOpener::with_behavior(OpenBehavior::ReadOnly);
        let stream = opener.open_append_or_create(Path::new("log")).unwrap();
        assert!(!stream.can_write());
        assert_eq!(opener.acquisition_count(), 1);
    }
}
