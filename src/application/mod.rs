//! # Application Layer
//!
//! Use cases and orchestration logic coordinating domain and connector layers.

pub mod interfaces;
pub mod reconciler;
pub mod use_cases;

pub use interfaces::*;
pub use reconciler::*;
pub use use_cases::*;
