use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use attendsync_core::reconcile::SlotHandle;
use attendsync_core::storage::{Result, StoreError};

/// Outcome of a write submitted through a
/// [`ReconcilingStore`](super::ReconcilingStore).
///
/// Resolves with the store's canonical copy, or with the store's error as is.
/// Dropping it does not cancel the write: the background task still reconciles
/// or discards the slot.
#[derive(Debug)]
pub struct PendingWrite<R> {
    handle: SlotHandle,
    task: JoinHandle<Result<R>>,
}

impl<R> PendingWrite<R> {
    pub(crate) fn new(handle: SlotHandle, task: JoinHandle<Result<R>>) -> Self {
        Self { handle, task }
    }

    /// Handle of the slot reserved for this write.
    pub fn handle(&self) -> SlotHandle {
        self.handle
    }
}

impl<R> Future for PendingWrite<R> {
    type Output = Result<R>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.task).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            // A panicking store surfaces in the caller, not as a store error
            Poll::Ready(Err(err)) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Poll::Ready(Err(err)) => Poll::Ready(Err(StoreError::Aborted(err.to_string()))),
        }
    }
}
