//! Ports: trait interfaces the core consumes from external collaborators.

mod completion;

pub use completion::{CompletionError, CompletionService, ProviderInfo};
