pub mod auth;
pub mod container;
pub mod error;
pub mod handlers;
pub mod server;

pub use container::{Container, ContainerConfig};
pub use error::ApiError;
pub use server::{build_router, run_server, AppState};
