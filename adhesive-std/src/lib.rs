//! # adhesive-std
//!
//! Standard implementations for the adhesive publish/subscribe dispatcher.
//!
//! This crate provides:
//! - **Storage**: [`Registry`], index-addressed slots with flush tombstones
//! - **Routing**: [`Matcher`], event name → ordered listeners, through groups
//! - **Dispatch**: [`Publish`], the predicate/dependency/logic pipeline
//! - **Configuration**: [`DispatchConfig`]
//! - **Testing**: call recorders and failing logic for tests

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core
pub use adhesive_core;

// Modules
pub mod config;
pub mod context;
pub mod publish;
pub mod registry;
pub mod routing;
pub mod testing;

pub use config::DispatchConfig;
pub use context::Scope;
pub use publish::Publish;
pub use registry::Registry;
pub use routing::Matcher;
