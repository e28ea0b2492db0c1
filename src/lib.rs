//! bookvault - persistence layer for a comic and book library server
//!
//! This library maps the `series` table and its joined metadata and
//! collection tables onto plain domain values through SeaORM.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`config`] - Application configuration management
//! * [`domain`] - Plain-data series and search types
//! * [`repositories`] - Query layer over the series tables
//! * [`storage`] - Database connection and schema creation
//! * [`utils`] - Utility functions and helpers

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Domain values handed out by the repositories
pub mod domain;

/// SeaORM entity models for database tables
pub mod entities;

/// Error types for repository operations
pub mod error;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Repository layer for database operations
pub mod repositories;

/// Local storage layer holding the database connection
pub mod storage;

/// Utility functions for date/time handling and other helpers
pub mod utils;

// Re-export entity models for convenient access
pub use entities::{collection_series, series, series_metadata};
