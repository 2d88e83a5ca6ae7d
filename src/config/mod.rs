//! Configuration module
//!
//! TOML settings for table defaults and display.

pub mod config;
