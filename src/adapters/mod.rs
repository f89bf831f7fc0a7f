//! Adapters: concrete implementations of the app port traits.

pub mod hardware;
pub mod log_sink;
pub mod queue_sink;
