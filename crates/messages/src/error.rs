use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("encode failed: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("decode failed: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("unknown status value: {0}")]
    UnknownStatus(i32),

    #[error("envelope carries no message")]
    MissingMessage,
}
