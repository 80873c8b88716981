use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cukelog_sink::OutputStream;

#[derive(Debug, Default)]
struct HandleState {
    read_only: bool,
    closed: bool,
    fail_writes: bool,
    writes: usize,
}

/// Shared in-memory byte buffer acting as an [`OutputStream`].
///
/// Clones share both the buffer and the handle state, so a test keeps one
/// clone to observe what the sink did with the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStream {
    data: Arc<Mutex<Vec<u8>>>,
    state: Arc<Mutex<HandleState>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryStream {
    /// Empty, writable stream.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream over `data` that refuses writes.
    #[must_use]
    pub fn read_only(data: Vec<u8>) -> Self {
        let stream = Self {
            data: Arc::new(Mutex::new(data)),
            state: Arc::default(),
        };
        lock(&stream.state).read_only = true;
        stream
    }

    /// New handle on the same buffer, as when a file is reopened for append.
    #[must_use]
    pub(crate) fn reopen(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            state: Arc::default(),
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.data).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        lock(&self.data).clone()
    }

    /// Number of successful `write_all` calls on this handle.
    pub fn write_count(&self) -> usize {
        lock(&self.state).writes
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.state).closed
    }

    /// Make the handle read-only from outside, as if the file were
    /// remounted or closed by another component.
    pub fn revoke_write(&self) {
        lock(&self.state).read_only = true;
    }

    /// Make every following `write_all` fail with an I/O error.
    pub fn fail_writes(&self) {
        lock(&self.state).fail_writes = true;
    }
}

impl OutputStream for MemoryStream {
    fn can_read(&self) -> bool {
        !lock(&self.state).closed
    }

    fn can_write(&self) -> bool {
        let state = lock(&self.state);
        !state.closed && !state.read_only
    }

    fn can_seek(&self) -> bool {
        !lock(&self.state).closed
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let mut state = lock(&self.state);
        if state.closed || state.read_only {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "memory stream is not writable",
            ));
        }
        if state.fail_writes {
            return Err(io::Error::other("injected write failure"));
        }
        lock(&self.data).extend_from_slice(buf);
        state.writes += 1;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        lock(&self.state).closed = true;
        Ok(())
    }
}
