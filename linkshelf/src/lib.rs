// src/lib.rs
#![crate_type = "lib"]
#![crate_name = "linkshelf"]

// Core modules
pub mod application;
pub mod domain;
pub mod infrastructure;

// Outer surfaces
pub mod api;
pub mod cli;
pub mod config;
pub mod exitcode;
pub mod util;
