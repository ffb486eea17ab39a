//! CLI command implementations.

pub mod config;
pub mod download;
pub mod init;
pub mod list;
pub mod sync;
