//! Length-delimited record framing.
//!
//! Each record is `[varint payload length][payload]`. A log is the plain
//! concatenation of records, so appending never rewrites earlier bytes.

use bytes::{Bytes, BytesMut};
use prost::Message;

use crate::error::MessageError;

/// Encode one record into a single contiguous buffer.
///
/// The whole record is built in memory first so a caller can hand it to the
/// output in one write.
///
/// # Errors
/// Returns `MessageError::Encode` if the message cannot be encoded.
pub fn encode_length_delimited<M: Message>(message: &M) -> Result<Bytes, MessageError> {
    let len = message.encoded_len();
    let mut buf = BytesMut::with_capacity(len + prost::length_delimiter_len(len));
    message.encode_length_delimited(&mut buf)?;
    Ok(buf.freeze())
}

/// Decode every record in `bytes`, in order.
///
/// # Errors
/// Returns `MessageError::Decode` on a truncated or malformed record.
pub fn decode_all<M: Message + Default>(mut bytes: &[u8]) -> Result<Vec<M>, MessageError> {
    let mut records = Vec::new();
    while !bytes.is_empty() {
        records.push(M::decode_length_delimited(&mut bytes)?);
    }
    Ok(records)
}
