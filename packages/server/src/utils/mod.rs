pub mod hash;
pub mod jwt;
pub mod media;
pub mod recovery;
pub mod search;
pub mod slug;
pub mod upload;
