//! Storage layer for veil
//!
//! This crate provides:
//! - A session-scoped key/value store abstraction
//! - An in-memory implementation that never touches disk
//! - The per-hostname restore-map store built on top of it

pub mod error;
pub mod restore_map;
pub mod session;

pub use error::{Result, StorageError};
pub use restore_map::{RESTORE_MAP_KEY_PREFIX, RestoreMapStore, restore_map_key};
pub use session::{MemorySessionStore, SessionStore};
