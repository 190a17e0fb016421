//! Utility modules shared by the providers.

pub mod cancel;
pub mod streaming;

pub use cancel::{CancelHandle, make_cancellable_stream};
pub use streaming::{SseEventConverter, StreamFactory, StreamSignal};
