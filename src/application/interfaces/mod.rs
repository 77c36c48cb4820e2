mod session_verifier;
mod state_store;
mod vector_store_gateway;

pub use session_verifier::*;
pub use state_store::*;
pub use vector_store_gateway::*;
