//! Request middleware.

pub mod trace;

pub use trace::{RequestTrace, TraceId};
