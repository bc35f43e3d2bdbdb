//! Event name routing.
//!
//! Resolves a published event name to the listeners that run for it,
//! following group indirection.

pub mod matcher;

pub use matcher::Matcher;
