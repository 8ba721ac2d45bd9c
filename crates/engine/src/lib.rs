//! L5R4 Engine library.
//!
//! Runs the wound preparation pass and the legacy migrator over exported
//! JSON documents.
//!
//! ## Structure
//!
//! - `config` - Environment-driven settings
//! - `documents` - Reading, preparing and writing JSON documents
//! - `commands` - Command-line surface

pub mod commands;
pub mod config;
pub mod documents;

pub use commands::Command;
pub use config::EngineConfig;
