//! Type-erased producers and the session-expiry hook.
//!
//! A handle doesn't care where its data comes from: it stores a
//! zero-argument function that returns a boxed future. Boxing keeps
//! `FetchHandle<T>` generic over the data type only, instead of over every
//! closure and future type a caller might pass.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use ptp_api::ApiError;

/// A zero-argument async function producing one remote fetch.
pub type Producer<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

/// Called when a producer fails with a session-expired error.
/// In the app this is the auth context's logout.
pub type ExpiryHook = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Wraps a closure returning a future into a [`Producer`].
///
/// ```rust
/// use ptp_fetch::producer;
///
/// let count = producer(|| async { Ok::<_, ptp_api::ApiError>(42u32) });
/// # let _ = count;
/// ```
pub fn producer<T, F, Fut>(f: F) -> Producer<T>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    Arc::new(move || -> BoxFuture<'static, Result<T, ApiError>> { Box::pin(f()) })
}

/// Wraps a closure returning a future into an [`ExpiryHook`].
pub fn expiry_hook<F, Fut>(f: F) -> ExpiryHook
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move || -> BoxFuture<'static, ()> { Box::pin(f()) })
}

/// An [`ExpiryHook`] that does nothing. For handles on public endpoints
/// that have no session to lose, and for tests.
pub fn no_expiry_hook() -> ExpiryHook {
    expiry_hook(|| async {})
}
