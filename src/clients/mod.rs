//! Type-safe request/response access to the running controller.

pub mod access_client;
pub mod error;
pub mod message;

pub use access_client::*;
pub use error::*;
pub use message::*;
