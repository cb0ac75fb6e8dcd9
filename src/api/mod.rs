//! Game server access

pub mod client;
pub mod transport;

pub use client::HttpTransport;
pub use transport::Transport;
