//! Domain layer: conversation state, crisis detection, and shared foundation
//! types. Pure logic with no I/O; external collaborators live behind ports.

pub mod conversation;
pub mod crisis;
pub mod foundation;
