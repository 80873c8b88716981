mod opener;
mod stream;

pub use opener::{MemoryStreamOpener, OpenBehavior};
pub use stream::MemoryStream;
