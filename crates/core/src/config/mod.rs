//! Configuration loading and schema definitions
//!
//! Settings shared by every Larder front end, read from TOML.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
