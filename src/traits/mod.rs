//! Capability traits

mod completion;

pub use completion::CompletionCapability;
