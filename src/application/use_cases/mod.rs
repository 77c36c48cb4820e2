mod clear_collection;
mod delete_document;
mod delete_folder;
mod delete_project;
mod list_documents;

pub use clear_collection::*;
pub use delete_document::*;
pub use delete_folder::*;
pub use delete_project::*;
pub use list_documents::*;
