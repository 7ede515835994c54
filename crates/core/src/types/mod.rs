//! Core types for Stagehand.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod slug;
pub mod status;

pub use id::*;
pub use slug::{MAX_DEPTH, SlugPath, SlugPathError};
pub use status::*;
