//! blocks-client — HTTP integrations for the blocks game.
//!
//! Implements the `SetRepository` and `ScoreService` traits from
//! `blocks-core` against the flashcard REST API, and provides the
//! configuration layer and an in-memory mock service for tests.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{load_config, load_config_from, BlocksConfig};
pub use http::BlocksApi;
