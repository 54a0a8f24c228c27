pub mod asset;
pub mod auth;
pub mod comment;
pub mod site;
pub mod upload;
pub mod video;
