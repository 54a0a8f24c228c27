pub mod download;
pub mod search;
pub mod upload;
