pub mod file_service;
pub mod locator;
pub mod metadata;
pub mod storage;
