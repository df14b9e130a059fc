pub mod connection;
pub mod error;
pub mod migration;
pub mod model;
pub mod repository;
pub mod schema;
pub mod session_repository;
