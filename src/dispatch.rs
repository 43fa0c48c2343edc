//! Results of dispatched requests.

use crate::error::{Error, Result};
use crate::types::Callback;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::task::JoinHandle;

/// The outcome of dispatching a request.
#[derive(Debug)]
pub enum DispatchResult {
    /// The decoded response body. Returned when dispatching synchronously.
    Ready(Value),
    /// A request still in flight. Returned when dispatching asynchronously.
    Pending(PendingResult),
}

impl DispatchResult {
    /// Whether the response is already available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The decoded body, if already available.
    pub fn ready(self) -> Option<Value> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending(_) => None,
        }
    }

    /// The pending result, if the request is still in flight.
    pub fn pending(self) -> Option<PendingResult> {
        match self {
            Self::Ready(_) => None,
            Self::Pending(pending) => Some(pending),
        }
    }

    /// Waits for the response, if needed, and returns the decoded body.
    pub async fn resolve(self) -> Result<Value> {
        match self {
            Self::Ready(value) => Ok(value),
            Self::Pending(pending) => pending.await,
        }
    }

    /// Waits for the response, if needed, and deserializes the body into `T`.
    pub async fn resolve_as<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value = self.resolve().await?;

        Ok(serde_json::from_value::<T>(value)?)
    }
}

/// A request in flight. Resolves exactly once, to the decoded body or to the error.
///
/// The request runs on the tokio runtime whether or not this is awaited. Dropping it detaches
/// the request; callbacks chained with [`PendingResult::then`] still run.
pub struct PendingResult {
    handle: JoinHandle<Result<Value>>,
}

impl fmt::Debug for PendingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingResult")
            .field("finished", &self.handle.is_finished())
            .finish()
    }
}

impl PendingResult {
    /// Spawns `future` onto the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub(crate) fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value>> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    /// Chains `callback` to run once with the decoded body when the request succeeds. It is
    /// not called when the request fails; the error is returned when this is awaited.
    ///
    /// The callback runs in its own task. Callbacks of separate requests run in dispatch
    /// order only on a current-thread runtime; await each result in turn to order them
    /// elsewhere.
    pub fn then<F>(self, callback: F) -> Self
    where
        F: FnOnce(&Value) + Send + 'static,
    {
        let handle = self.handle;

        Self::spawn(async move {
            let value = handle.await??;

            callback(&value);
            Ok(value)
        })
    }

    /// Same as [`PendingResult::then`] with a shared callback.
    pub(crate) fn then_shared(self, callback: Arc<dyn Fn(&Value) + Send + Sync>) -> Self {
        self.then(move |value| callback(value))
    }

    /// Whether the request has resolved.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Aborts the request. Awaiting afterwards resolves to [`Error::Join`].
    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Future for PendingResult {
    type Output = Result<Value>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle)
            .poll(cx)
            .map(|joined| joined.map_err(Error::from).and_then(|result| result))
    }
}

/// Applies the client-wide callback, if any. See [`PendingResult::then`] for ordering.
pub(crate) fn chain_callback(
    pending: PendingResult,
    callback: Option<&Callback>,
) -> PendingResult {
    match callback {
        Some(callback) => pending.then_shared(Arc::clone(callback)),
        None => pending,
    }
}
