//! Storage layer for pomodoro.
//!
//! This module provides the key-value persistence used for:
//! - Timer settings (work/break durations, cycle length)
//! - The completed work session counter

mod keyvalue;

pub use keyvalue::{FileStore, KeyValueStore, MemoryStore};

#[cfg(test)]
pub use keyvalue::MockKeyValueStore;
