pub mod filename;
pub mod folder;
pub mod token;
