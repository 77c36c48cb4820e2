mod collection;
mod document;
mod document_id;
mod project_state;
mod session;

pub use collection::*;
pub use document::*;
pub use document_id::*;
pub use project_state::*;
pub use session::*;
