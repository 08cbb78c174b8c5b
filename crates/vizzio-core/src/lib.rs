//! VIZZIO Core Library
//!
//! Message log, connection registry, auto-responder and build notification
//! intake for the VIZZIO notification relay.

pub mod error;
pub mod hub;
pub mod intake;
pub mod log;
pub mod model;
pub mod notifier;
pub mod protocol;
pub mod registry;
pub mod responder;

pub use error::{RelayError, RelayResult};
pub use hub::Hub;
