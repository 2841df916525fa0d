//! Adapter implementations for the task repository port and the HTTP
//! boundary.

pub mod http;
pub mod memory;
pub mod postgres;
