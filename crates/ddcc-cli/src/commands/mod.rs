pub mod format;
pub mod online;
