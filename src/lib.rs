//! Haven Chat - Mental-health support chat backend
//!
//! Forwards user messages to a completion provider while maintaining
//! short-lived conversation state and a crisis-detection pipeline that runs
//! before every model invocation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
