//! Storage layer for UIAIStyle
//!
//! This crate provides the durable key-value store and the persisted theme
//! selection built on top of it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod selection;

pub use kv::{KvConfig, KvError, KvStore};
pub use selection::{SelectionKeys, SelectionStore};
