pub mod adapter;
pub mod client;
pub mod context;
pub mod error;
pub mod handler;
pub mod oauth;
pub mod send;
pub mod types;

pub use adapter::TwitterAdapter;
pub use client::TwitterClient;
pub use context::TwitterAppContext;
pub use error::TwitterError;
pub use send::TWITTER_MESSAGE_LIMIT;
