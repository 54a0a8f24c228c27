pub mod admin_user;
pub mod asset;
pub mod comment;
pub mod download_log;
pub mod site_config;
pub mod video;
