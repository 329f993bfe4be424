pub mod error;
pub mod post_repo;
