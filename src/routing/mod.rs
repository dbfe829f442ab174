//! Route table and target resolution.
//!
//! # Data Flow
//! ```text
//! Route definitions (config)
//!     → table.rs (ordered snapshot, name lookup)
//!     → resolver.rs (expand rule targets against the snapshot)
//!     → Return: matching route names and paths, in table order
//! ```
//!
//! # Design Decisions
//! - The table is fetched/built once per resolution context and reused
//! - Deterministic: same target and table always resolve the same way

pub mod resolver;
pub mod table;
