pub mod bookmark_service;
pub mod bookmark_service_impl;
pub mod session_service;
pub mod session_service_impl;
