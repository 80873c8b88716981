mod channel;
pub mod config;
mod error;
mod file;
mod sender;
mod sink;
mod stream;

pub use channel::{ChannelStatus, OutputChannel};
pub use config::{CucumberMessagesConfig, FileSinkConfig, SinkConfig};
pub use error::{ConfigError, SendError, SinkError};
pub use file::{FileStream, FileStreamOpener};
pub use sender::MessageSender;
pub use sink::ProtobufFileSink;
pub use stream::{OutputStream, StreamOpener};
