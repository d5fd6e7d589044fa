//! Server module for Armory
//!
//! Contains the main server initialization and runtime logic.
//!
//! # Module Structure
//!
//! - `config`: Configuration structures
//! - `loader`: Configuration loading from files and environment
//! - `validation`: Production configuration validation
//! - `init`: Server initialization and run loop

pub mod config;
mod init;
pub mod loader;
mod validation;

// Re-export public API
pub use init::run;
pub use loader::load_config;
