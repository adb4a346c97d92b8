pub mod config;
pub mod lifecycle;
