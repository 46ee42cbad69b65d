// Library root: re-exports all modules so the CLI and integration tests can
// access the crate's public API.

pub mod catalog;
pub mod codec;
pub mod config;
pub mod db;
pub mod draft;
pub mod stats;
pub mod store;
