//! Step definitions for task management scenarios.

mod given;
mod then;
pub mod world;
