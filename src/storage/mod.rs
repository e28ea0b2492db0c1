//! Local storage module for library persistence
//!
//! This module opens the SQLite database through SeaORM and creates the
//! tables for:
//! - Series
//! - Series metadata
//! - Collection membership

pub mod db;

pub use db::LocalStorage;
