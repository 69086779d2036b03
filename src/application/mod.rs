//! Application layer: composes domain logic with ports.

pub mod handlers;
