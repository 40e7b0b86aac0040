//! CLI utilities for Larder tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Search result rendering
//! - Error reporting

#![warn(missing_docs)]

pub mod output;
pub mod render;
