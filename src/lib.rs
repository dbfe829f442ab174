//! Route Warden Library
//!
//! IP-based route restriction for named HTTP routes.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌────────────────────────────────────────────┐
//!                         │               ROUTE WARDEN                 │
//!                         │                                            │
//!    Client Request       │  ┌─────────┐    ┌──────────────────┐      │
//!    ─────────────────────┼─▶│  http   │───▶│ restriction gate │      │
//!                         │  │ server  │    │   (middleware)   │      │
//!                         │  └─────────┘    └────────┬─────────┘      │
//!                         │                          │                │
//!                         │                          ▼                │
//!                         │                 ┌──────────────────┐      │
//!                         │                 │    restrict      │      │
//!                         │                 │ engine + ranges  │      │
//!                         │                 └────────┬─────────┘      │
//!                         │                          │                │
//!                         │                          ▼                │
//!                         │                 ┌──────────────────┐      │
//!                         │                 │     routing      │      │
//!                         │                 │ table + resolver │      │
//!                         │                 └──────────────────┘      │
//!                         │                                            │
//!                         │  ┌──────────────────────────────────────┐ │
//!                         │  │         Cross-Cutting Concerns        │ │
//!                         │  │  ┌────────┐ ┌───────┐ ┌────────────┐ │ │
//!                         │  │  │ config │ │ admin │ │observability│ │ │
//!                         │  │  └────────┘ └───────┘ └────────────┘ │ │
//!                         │  └──────────────────────────────────────┘ │
//!                         └────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod config;
pub mod http;
pub mod observability;
pub mod restrict;
pub mod routing;

pub use config::schema::WardenConfig;
pub use http::HttpServer;
pub use restrict::engine::{GlobalSettings, GuardStatus, RestrictionEngine};
pub use routing::table::{RouteEntry, RouteTable};
