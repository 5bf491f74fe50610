pub mod file_utils;

pub use file_utils::{atomic_write, remove_if_exists, write_private};

#[cfg(test)]
#[path = "tests/file_utils_tests.rs"]
mod file_utils_tests;
