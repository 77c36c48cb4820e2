mod in_memory_gateway;
mod json_state_store;
mod python_gateway;
mod static_token_verifier;

pub use in_memory_gateway::*;
pub use json_state_store::*;
pub use python_gateway::*;
pub use static_token_verifier::*;
