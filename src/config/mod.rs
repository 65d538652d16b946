//! Configuration module for notion-expenses
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Notion credential resolution

pub mod credentials;
pub mod paths;
pub mod settings;

pub use credentials::{Credentials, SecretToken};
pub use paths::ExpensePaths;
pub use settings::{PropertyNames, Settings};
