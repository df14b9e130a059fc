pub mod repository;
pub mod session_repository;
