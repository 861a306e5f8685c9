//! The document view the preview is rendered into.
//!
//! This module provides:
//! - The [`ViewTree`] capability (query, create, mutate)
//! - An in-memory tree for tests and for the command-line preview
//! - The status line surface

mod memory;
mod status;
mod tree;

pub use memory::{ElementSnapshot, MemoryViewTree};
pub use status::StatusSurface;
pub use tree::{ElementSpec, NodeId, ViewError, ViewTree};
