//! blocks-core — Session state machine, partitioner, and score reporting.
//!
//! This crate defines the data model and game logic that the blocks
//! matching game builds on: grouping cards into concepts, tracking one
//! play-through as an explicit state machine, and reporting finished
//! sessions to an external scoring service.

pub mod error;
pub mod model;
pub mod partition;
pub mod reporter;
pub mod session;
pub mod traits;
