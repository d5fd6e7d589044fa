//! Middleware module for Armory HTTP server
//!
//! Provides:
//! - Session middleware (cookie → request-scoped account context)

pub mod session;
