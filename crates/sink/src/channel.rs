use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::SinkError;
use crate::stream::{OutputStream, StreamOpener};

enum ChannelState {
    Uninitialized,
    Open(Box<dyn OutputStream>),
    Closed,
}

/// Observable lifecycle of an [`OutputChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus {
    Uninitialized,
    Open,
    Closed,
}

/// Lazily opened, exclusively owned output stream for one target path.
///
/// Not synchronized: every state change takes `&mut self`, so callers with
/// several producers serialize through a single owner or a mutex.
pub struct OutputChannel {
    opener: Arc<dyn StreamOpener>,
    path: PathBuf,
    state: ChannelState,
}

impl OutputChannel {
    pub fn new(opener: Arc<dyn StreamOpener>, path: impl Into<PathBuf>) -> Self {
        Self {
            opener,
            path: path.into(),
            state: ChannelState::Uninitialized,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn status(&self) -> ChannelStatus {
        match self.state {
            ChannelState::Uninitialized => ChannelStatus::Uninitialized,
            ChannelState::Open(_) => ChannelStatus::Open,
            ChannelState::Closed => ChannelStatus::Closed,
        }
    }

    /// Open the target unless a stream is already held.
    ///
    /// Returns `true` without touching the opener when already open. On
    /// failure the channel keeps its previous state and a later call may
    /// succeed. A closed channel reopens the target.
    pub fn ensure_initialized(&mut self) -> bool {
        if matches!(self.state, ChannelState::Open(_)) {
            return true;
        }

        match self.opener.open_append_or_create(&self.path) {
            Ok(stream) => {
                tracing::debug!(path = %self.path.display(), "output channel opened");
                self.state = ChannelState::Open(stream);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "output channel unavailable");
                false
            }
        }
    }

    /// Open and still writable. Checked against the stream on every call.
    pub fn is_initialized(&self) -> bool {
        matches!(&self.state, ChannelState::Open(stream) if stream.can_write())
    }

    /// The held stream, if open.
    pub fn stream(&self) -> Option<&dyn OutputStream> {
        match &self.state {
            ChannelState::Open(stream) => Some(stream.as_ref()),
            _ => None,
        }
    }

    /// Write `bytes` in one call and flush.
    ///
    /// # Errors
    /// - `SinkError::NotInitialized` when not open or no longer writable;
    ///   nothing is written.
    /// - `SinkError::Io` when the stream rejects the write.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        let ChannelState::Open(stream) = &mut self.state else {
            return Err(SinkError::NotInitialized);
        };
        if !stream.can_write() {
            return Err(SinkError::NotInitialized);
        }

        stream.write_all(bytes)?;
        stream.flush()?;
        Ok(())
    }

    /// Close the held stream. No-op when never opened or already closed.
    pub fn dispose(&mut self) {
        let state = std::mem::replace(&mut self.state, ChannelState::Uninitialized);
        self.state = match state {
            ChannelState::Open(mut stream) => {
                if let Err(e) = stream.close() {
                    tracing::warn!(error = %e, path = %self.path.display(), "error closing output stream");
                }
                tracing::debug!(path = %self.path.display(), "output channel closed");
                ChannelState::Closed
            }
            other => other,
        };
    }
}

impl Drop for OutputChannel {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct Shared {
        written: Mutex<Vec<u8>>,
        closed: AtomicBool,
        read_only: AtomicBool,
        fail_writes: AtomicBool,
    }

    struct MockStream {
        shared: Arc<Shared>,
    }

    impl OutputStream for MockStream {
        fn can_read(&self) -> bool {
            !self.shared.closed.load(Ordering::Relaxed)
        }

        fn can_write(&self) -> bool {
            !self.shared.closed.load(Ordering::Relaxed)
                && !self.shared.read_only.load(Ordering::Relaxed)
        }

        fn can_seek(&self) -> bool {
            !self.shared.closed.load(Ordering::Relaxed)
        }

        fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
            if self.shared.fail_writes.load(Ordering::Relaxed) {
                return Err(io::Error::other("disk full"));
            }
            self.shared.written.lock().unwrap().extend_from_slice(buf);
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn close(&mut self) -> io::Result<()> {
            self.shared.closed.store(true, Ordering::Relaxed);
            Ok(())
        }
    }

    struct MockOpener {
        shared: Arc<Shared>,
        opens: AtomicUsize,
        fail: AtomicBool,
    }

    impl MockOpener {
        fn new() -> Self {
            Self {
                shared: Arc::new(Shared::default()),
                opens: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
            }
        }
    }

    impl StreamOpener for MockOpener {
        fn open_append_or_create(
            &self,
            path: &Path,
        ) -> Result<Box<dyn OutputStream>, SinkError> {
            if self.fail.load(Ordering::Relaxed) {
                return Err(SinkError::Open {
                    path: path.to_path_buf(),
                    source: io::Error::from(io::ErrorKind::PermissionDenied),
                });
            }
            self.opens.fetch_add(1, Ordering::Relaxed);
            self.shared.closed.store(false, Ordering::Relaxed);
            Ok(Box::new(MockStream {
                shared: self.shared.clone(),
            }))
        }
    }

    fn channel(opener: &Arc<MockOpener>) -> OutputChannel {
        OutputChannel::new(opener.clone(), "CucumberMessageQueue")
    }

    #[test]
    fn starts_uninitialized() {
        let opener = Arc::new(MockOpener::new());
        let channel = channel(&opener);
        assert!(!channel.is_initialized());
        assert_eq!(channel.status(), ChannelStatus::Uninitialized);
        assert!(channel.stream().is_none());
        assert_eq!(channel.path(), Path::new("CucumberMessageQueue"));
    }

    #[test]
    fn ensure_initialized_acquires_once() {
        let opener = Arc::new(MockOpener::new());
        let mut channel = channel(&opener);

        assert!(channel.ensure_initialized());
        assert!(channel.ensure_initialized());
        assert!(channel.ensure_initialized());

        assert_eq!(opener.opens.load(Ordering::Relaxed), 1);
        assert!(channel.is_initialized());
        assert!(channel.stream().is_some());
    }

    #[test]
    fn failed_open_is_retryable() {
        let opener = Arc::new(MockOpener::new());
        opener.fail.store(true, Ordering::Relaxed);
        let mut channel = channel(&opener);

        assert!(!channel.ensure_initialized());
        assert_eq!(channel.status(), ChannelStatus::Uninitialized);

        opener.fail.store(false, Ordering::Relaxed);
        assert!(channel.ensure_initialized());
        assert!(channel.is_initialized());
    }

    #[test]
    fn read_only_stream_is_not_initialized() {
        let opener = Arc::new(MockOpener::new());
        opener.shared.read_only.store(true, Ordering::Relaxed);
        let mut channel = channel(&opener);

        assert!(channel.ensure_initialized());
        assert!(!channel.is_initialized());
        assert!(matches!(channel.write(b"x"), Err(SinkError::NotInitialized)));
        assert!(opener.shared.written.lock().unwrap().is_empty());
    }

    #[test]
    fn writability_is_rechecked() {
        let opener = Arc::new(MockOpener::new());
        let mut channel = channel(&opener);
        channel.ensure_initialized();
        assert!(channel.is_initialized());

        opener.shared.read_only.store(true, Ordering::Relaxed);

        assert!(!channel.is_initialized());
        assert!(matches!(channel.write(b"x"), Err(SinkError::NotInitialized)));
    }

    #[test]
    fn write_before_init_has_no_side_effects() {
        let opener = Arc::new(MockOpener::new());
        let mut channel = channel(&opener);

        assert!(matches!(channel.write(b"abc"), Err(SinkError::NotInitialized)));
        assert_eq!(opener.opens.load(Ordering::Relaxed), 0);
        assert!(opener.shared.written.lock().unwrap().is_empty());
    }

    #[test]
    fn write_failure_is_distinct_from_not_initialized() {
        let opener = Arc::new(MockOpener::new());
        opener.shared.fail_writes.store(true, Ordering::Relaxed);
        let mut channel = channel(&opener);
        channel.ensure_initialized();

        assert!(matches!(channel.write(b"abc"), Err(SinkError::Io(_))));
    }

    #[test]
    fn dispose_closes_stream_and_is_idempotent() {
        let opener = Arc::new(MockOpener::new());
        let mut channel = channel(&opener);
        channel.ensure_initialized();
        channel.write(b"abc").unwrap();

        channel.dispose();
        channel.dispose();

        assert!(opener.shared.closed.load(Ordering::Relaxed));
        assert_eq!(channel.status(), ChannelStatus::Closed);
        assert!(!channel.is_initialized());
        assert!(matches!(channel.write(b"x"), Err(SinkError::NotInitialized)));
        assert_eq!(opener.shared.written.lock().unwrap().as_slice(), b"abc");
    }

    #[test]
    fn dispose_without_init_is_noop() {
        let opener = Arc::new(MockOpener::new());
        let mut channel = channel(&opener);

        channel.dispose();

        assert_eq!(channel.status(), ChannelStatus::Uninitialized);
        assert_eq!(opener.opens.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn closed_channel_can_reopen() {
        let opener = Arc::new(MockOpener::new());
        let mut channel = channel(&opener);
        channel.ensure_initialized();
        channel.dispose();

        assert!(channel.ensure_initialized());
        assert!(channel.is_initialized());
        assert_eq!(opener.opens.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn drop_closes_stream() {
        let opener = Arc::new(MockOpener::new());
        {
            let mut channel = channel(&opener);
            channel.ensure_initialized();
        }
        assert!(opener.shared.closed.load(Ordering::Relaxed));
    }
}
