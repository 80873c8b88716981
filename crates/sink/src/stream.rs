use std::io;
use std::path::Path;

use crate::error::SinkError;

/// Writable byte stream held by an [`OutputChannel`](crate::OutputChannel).
///
/// Capabilities are queried on every use; a stream may stop being writable
/// without the channel doing anything (closed from outside, read-only media).
/// After `close` all three capabilities report `false`.
pub trait OutputStream: Send {
    fn can_read(&self) -> bool;
    fn can_write(&self) -> bool;
    fn can_seek(&self) -> bool;

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;

    /// Release the underlying resource. Idempotent.
    fn close(&mut self) -> io::Result<()>;
}

/// Opens the target of a sink for appending.
///
/// Implementations create missing parent directories, never truncate existing
/// content, and report failure as `SinkError::Open` instead of panicking.
pub trait StreamOpener: Send + Sync {
    fn open_append_or_create(&self, path: &Path) -> Result<Box<dyn OutputStream>, SinkError>;
}
