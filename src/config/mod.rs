//! Configuration module for famfin
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence (profile, current view, categorizer)

pub mod paths;
pub mod settings;

pub use paths::FamfinPaths;
pub use settings::{CategorizerSettings, CurrentView, Profile, Settings};
