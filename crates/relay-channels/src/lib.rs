pub mod backoff;
pub mod chunk;
pub mod deliver;
pub mod error;
pub mod sink;

pub use backoff::Backoff;
pub use chunk::split_chunks;
pub use deliver::{deliver, EMPTY_RESPONSE};
pub use error::ChannelError;
pub use sink::ChannelSink;
