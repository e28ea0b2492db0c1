//! Constants used throughout the application
//!
//! This module centralizes file names, messages, and other constant values.

// File names
pub const LOCAL_CONFIG_FILE_NAME: &str = "bookvault.toml";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "bookvault.log";

// Logging
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
pub const LOG_MEMORY_CAPACITY: usize = 1000;

// Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration";
pub const ERROR_STORAGE_OPEN_FAILED: &str = "❌ Failed to open storage";
pub const REPORT_HEADER: &str = "📚 Series per library";
pub const REPORT_EMPTY: &str = "No series stored yet";
