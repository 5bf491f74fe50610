//! RetroAchievements backlog timer: matches Want to Play entries against
//! HowLongToBeat and RA player statistics, then exports time estimates.
pub mod commands;
pub mod services;
pub mod types;
