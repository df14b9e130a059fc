// src/api/mod.rs
//! HTTP surface: the bookmark procedures as JSON RPC endpoints.
pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

use crate::infrastructure::di::ServiceContainer;

pub use server::{router, serve};

#[derive(Clone)]
pub struct AppState {
    pub services: ServiceContainer,
}

impl AppState {
    pub fn new(services: ServiceContainer) -> Self {
        Self { services }
    }
}
