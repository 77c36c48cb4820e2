//! # Connector Layer
//!
//! External integrations implementing the application interfaces:
//! - Vector store access (ChromaDB via Python helper, in-memory for tests)
//! - State file persistence (JSON side-car files)
//! - Session verification (static token table)
//! - The HTTP API surface

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
