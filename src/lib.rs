//! Tasklist: a small task-management service.
//!
//! The crate keeps a list of tasks, each with a title, an optional
//! description, and a pending or done status, and exposes create, read,
//! paged list, partial update, and delete operations over them.
//!
//! # Architecture
//!
//! Tasklist follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP)
//!
//! # Modules
//!
//! - [`task`]: Task entity, repository port, use cases, and adapters
//! - [`config`]: Layered runtime settings
//! - [`telemetry`]: Tracing subscriber setup
//! - [`server`]: HTTP server wiring

pub mod config;
pub mod server;
pub mod task;
pub mod telemetry;
