pub mod config;
pub mod debug_log;
pub mod error;
pub mod format;
pub mod view;
