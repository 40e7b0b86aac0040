//! Core utilities for Larder tools
//!
//! This crate provides shared functionality used by every front end:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//!
//! # Example
//!
//! ```rust,no_run
//! use larder_core::config::Config;
//!
//! let config = Config::load(None).expect("Invalid configuration");
//! if !config.schema.search.include_archived {
//!     println!("Archived recipes are hidden");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, ErrorReport, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, OutputFormat};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result};
}
