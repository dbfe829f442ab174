//! Restriction core.
//!
//! # Data Flow
//! ```text
//! Rule store + global settings + route table
//!     → engine.rs (resolve each target once per table generation)
//!     → per request: is_request_governed / is_client_denied
//!     → range.rs (IP against each spec, short-circuit OR)
//! ```
//!
//! # Design Decisions
//! - Pure computation: no I/O, all inputs passed in explicitly
//! - Unknown spec formats degrade to exact matching instead of erroring
//! - First matching rule governs; storage order is the tie-break

pub mod engine;
pub mod range;
pub mod rules;
