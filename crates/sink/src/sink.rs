use std::sync::Arc;

use cukelog_messages::framing;

use crate::channel::OutputChannel;
use crate::config::FileSinkConfig;
use crate::error::SinkError;
use crate::file::FileStreamOpener;
use crate::stream::StreamOpener;

/// Appends length-delimited protobuf records to the configured file.
///
/// `new → ready` on the first successful [`ensure_is_initialized`], `ready →
/// closed` on [`dispose`] or drop. Writes outside `ready` return `false` and
/// touch nothing.
///
/// [`ensure_is_initialized`]: ProtobufFileSink::ensure_is_initialized
/// [`dispose`]: ProtobufFileSink::dispose
pub struct ProtobufFileSink {
    channel: OutputChannel,
}

impl ProtobufFileSink {
    pub fn new(opener: Arc<dyn StreamOpener>, config: &FileSinkConfig) -> Self {
        Self {
            channel: OutputChannel::new(opener, config.target_file_path.clone()),
        }
    }

    /// Sink writing to the local file system.
    pub fn from_config(config: &FileSinkConfig) -> Self {
        Self::new(Arc::new(FileStreamOpener), config)
    }

    pub fn channel(&self) -> &OutputChannel {
        &self.channel
    }

    pub fn ensure_is_initialized(&mut self) -> bool {
        self.channel.ensure_initialized()
    }

    pub fn is_initialized(&self) -> bool {
        self.channel.is_initialized()
    }

    /// Frame and append `message`. `false` when the sink is not ready or the
    /// write failed; the reason is logged.
    pub fn write_message<M: prost::Message>(&mut self, message: &M) -> bool {
        match self.try_write_message(message) {
            Ok(()) => true,
            Err(SinkError::NotInitialized) => {
                tracing::warn!(
                    path = %self.channel.path().display(),
                    "dropping message, sink is not initialized"
                );
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %self.channel.path().display(), "message write failed");
                false
            }
        }
    }

    /// Frame and append `message`.
    ///
    /// The record is encoded in full before anything is written, so a
    /// failure never leaves a partial record behind the encoder.
    ///
    /// # Errors
    /// - `SinkError::NotInitialized` when the sink is not ready; no I/O.
    /// - `SinkError::Encode` / `SinkError::Io` on encoding or stream failure.
    pub fn try_write_message<M: prost::Message>(&mut self, message: &M) -> Result<(), SinkError> {
        if !self.channel.is_initialized() {
            return Err(SinkError::NotInitialized);
        }

        let record = framing::encode_length_delimited(message)?;
        self.channel.write(&record)?;
        tracing::debug!(bytes = record.len(), "record appended");
        Ok(())
    }

    pub fn dispose(&mut self) {
        self.channel.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelStatus;
    use cukelog_messages::{Envelope, MessageFactory, TestRunStarted};
    use std::time::SystemTime;

    fn config_in(dir: &tempfile::TempDir) -> FileSinkConfig {
        FileSinkConfig::new(dir.path().join("CucumberMessageQueue").join("messages"))
    }

    #[test]
    fn creates_missing_directory_on_init() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let mut sink = ProtobufFileSink::from_config(&config);

        assert!(!sink.is_initialized());
        assert!(sink.ensure_is_initialized());
        assert!(sink.is_initialized());
        assert!(config.target_file_path.parent().unwrap().is_dir());
    }

    #[test]
    fn write_before_init_returns_false() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let mut sink = ProtobufFileSink::from_config(&config);

        assert!(!sink.write_message(&TestRunStarted::default()));
        assert!(!config.target_file_path.exists());
    }

    #[test]
    fn run_started_grows_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let mut sink = ProtobufFileSink::from_config(&config);
        sink.ensure_is_initialized();

        let msg = Envelope::from(MessageFactory::new().test_run_started(SystemTime::now()));
        assert!(sink.write_message(&msg));

        let len = std::fs::metadata(&config.target_file_path).unwrap().len();
        assert!(len > 0);
    }

    #[test]
    fn dispose_twice_is_safe() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ProtobufFileSink::from_config(&config_in(&dir));
        sink.ensure_is_initialized();

        sink.dispose();
        sink.dispose();

        assert_eq!(sink.channel().status(), ChannelStatus::Closed);
        assert!(!sink.write_message(&TestRunStarted::default()));
    }

    #[test]
    fn dispose_without_init_is_safe() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ProtobufFileSink::from_config(&config_in(&dir));
        sink.dispose();
        assert!(!sink.is_initialized());
    }
}
