//! Runtime theme state for UIAIStyle
//!
//! This crate wires style resolution to a running application:
//! - [`context`] - Tree-scoped theme propagation with change notification
//! - [`ambient`] - Thread-local access to the bundle in scope
//! - [`controller`] - The app-root owner of the selection, registry and tree

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ambient;
pub mod context;
pub mod controller;

pub use ambient::ScopeGuard;
pub use context::{ContextError, NodeId, ThemeTree, ThemeWatcher};
pub use controller::{ControllerConfig, ControllerError, ThemeController, WatchHandle};
