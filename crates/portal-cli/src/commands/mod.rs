pub mod auth;
pub mod config;
pub mod programs;
pub mod render;
pub mod shell;
