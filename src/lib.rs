//! famfin - Terminal-based personal and family finance tracker
//!
//! This library provides the core functionality behind the `famfin` binary:
//! accounts and transactions, savings goals, monthly budget plans, debts and
//! credits, shopping lists and family spaces shared between members.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings (profile, current view)
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, goals, etc.)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `reports`: Monthly summary, category breakdown, onboarding checklist
//! - `export`: CSV and JSON export
//! - `display`: Terminal formatting
//! - `cli`: clap command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use famfin::config::{FamfinPaths, Settings};
//! use famfin::storage::Storage;
//!
//! let paths = FamfinPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! storage.set_view(settings.current_view);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FamfinError, FamfinResult};
