//! # tunevault Common Library
//!
//! Shared code for the tunevault music-library service:
//! - Database initialization and schema
//! - Data models (User, Album, Song, Session)
//! - Configuration and root folder resolution
//! - Error types
//! - Display helpers

pub mod config;
pub mod db;
pub mod error;
pub mod labels;

pub use error::{Error, Result};
