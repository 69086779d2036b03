//! Adapters: implementations of ports and the HTTP boundary.

pub mod ai;
pub mod http;
