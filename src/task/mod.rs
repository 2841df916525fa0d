//! Task management.
//!
//! A task is a titled unit of work that is either pending or done. This
//! module validates task input, persists tasks through a repository port,
//! and serves them through paged listing with an optional status filter.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Use cases in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
