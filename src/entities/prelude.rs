pub use super::file_records::Entity as FileRecords;
