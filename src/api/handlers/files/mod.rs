pub mod delete;
pub mod download;
pub mod extract;
pub mod list;
pub mod types;
pub mod upload;

// Re-export all types
pub use types::*;

// Re-export all handlers
pub use delete::{delete_all, delete_file};
pub use download::download_file;
pub use list::{delete_list, list_files};
pub use upload::upload_file;
