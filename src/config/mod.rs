//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! warden.toml
//!     → loader.rs (read, parse, validate)
//!     → schema.rs (typed WardenConfig)
//!     → consumed at startup; watcher.rs re-runs the pipeline on change
//! ```

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::WardenConfig;
