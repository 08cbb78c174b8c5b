//! Route handlers.

pub mod chat;
pub mod notify;
pub mod status;
