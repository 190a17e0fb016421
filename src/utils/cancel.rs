//! Cancellation utilities
//!
//! Dropping a [`FragmentStream`] already releases its HTTP connection. A
//! [`CancelHandle`] does the same from somewhere other than the consumer.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::stream::FragmentStream;

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    /// Request cancellation. The wrapped stream ends at its next poll and drops
    /// the underlying transport; no `done` fragment is delivered afterwards.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Make a fragment stream cancellable and return its cancel handle.
pub fn make_cancellable_stream(stream: FragmentStream) -> (FragmentStream, CancelHandle) {
    let flag = Arc::new(AtomicBool::new(false));
    let handle = CancelHandle::new(flag.clone());
    let mut inner = stream;
    let s = async_stream::stream! {
        use futures_util::StreamExt;
        if flag.load(Ordering::SeqCst) {
            return;
        }
        while let Some(item) = inner.next().await {
            if flag.load(Ordering::SeqCst) { break; }
            yield item;
        }
    };
    (Box::pin(s), handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::StreamFragment;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn cancelled_stream_stops_before_done() {
        let inner: FragmentStream = Box::pin(futures::stream::iter(vec![
            Ok(StreamFragment::text("one")),
            Ok(StreamFragment::text("two")),
            Ok(StreamFragment::done()),
        ]));
        let (mut stream, cancel) = make_cancellable_stream(inner);

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.text, "one");

        cancel.cancel();
        assert!(cancel.is_cancelled());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn uncancelled_stream_passes_everything_through() {
        let inner: FragmentStream = Box::pin(futures::stream::iter(vec![
            Ok(StreamFragment::text("a")),
            Ok(StreamFragment::done()),
        ]));
        let (stream, _cancel) = make_cancellable_stream(inner);
        let items: Vec<_> = stream.collect().await;
        assert_eq!(items.len(), 2);
        assert!(items[1].as_ref().unwrap().done);
    }
}
