pub mod backlog;
pub mod config;
pub mod export;
pub mod fs_utils;
pub mod matcher;
pub mod progress;
pub mod reference;
pub mod scan;
