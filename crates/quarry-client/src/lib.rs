mod client;
mod config;
mod connection;
mod error;

pub use client::Client;
pub use config::ClientConfig;
pub use connection::Connection;
pub use error::ClientError;
