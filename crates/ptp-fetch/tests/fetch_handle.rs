//! Integration tests for `FetchHandle`.
//!
//! Producers here are either immediate (resolve on first poll) or gated:
//! each call to a gated producer takes the next oneshot receiver from a
//! queue and waits on it, so the test decides exactly when, and in which
//! order, in-flight fetches resolve. Tests run on the current-thread
//! runtime, so `settle()` (a few yields) is enough to let spawned triggers
//! reach their await point.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ptp_api::{ApiError, ClientError};
use ptp_fetch::{
    ExpiryHook, FetchHandle, FetchOptions, GENERIC_ERROR_MESSAGE, Producer, expiry_hook,
    no_expiry_hook, producer,
};
use tokio::sync::oneshot;

// =========================================================================
// Helpers
// =========================================================================

type Reply<T> = oneshot::Sender<Result<T, ApiError>>;

/// A producer whose calls resolve only when the matching sender fires.
/// The Nth call waits on the Nth sender.
fn gated<T: Send + 'static>(calls: usize) -> (Producer<T>, Vec<Reply<T>>) {
    let mut senders = Vec::new();
    let mut receivers = VecDeque::new();
    for _ in 0..calls {
        let (tx, rx) = oneshot::channel();
        senders.push(tx);
        receivers.push_back(rx);
    }
    let queue = Arc::new(Mutex::new(receivers));
    let fetch = producer(move || {
        let next = queue.lock().unwrap().pop_front();
        async move {
            match next {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApiError::Network("reply dropped".into()))),
                None => Err(ApiError::Network("unscripted call".into())),
            }
        }
    });
    (fetch, senders)
}

/// A producer that returns the given results in order, immediately.
fn sequence<T: Send + 'static>(
    results: Vec<Result<T, ApiError>>,
) -> (Producer<T>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let queue = Arc::new(Mutex::new(VecDeque::from(results)));
    let fetch = producer(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        let next = queue.lock().unwrap().pop_front();
        async move { next.unwrap_or_else(|| Err(ApiError::Network("unscripted call".into()))) }
    });
    (fetch, calls)
}

/// An expiry hook that counts how often it was called.
fn counting_hook() -> (ExpiryHook, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let hook = expiry_hook(move || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    (hook, count)
}

fn expired() -> ApiError {
    ClientError::new("rest_not_logged_in", "You must be logged in.", 401).into()
}

fn server_error(message: &str) -> ApiError {
    ClientError::new("woocommerce_not_active", message, 500).into()
}

/// Fetch on mount, no key.
fn eager() -> FetchOptions {
    FetchOptions::default()
}

async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

// =========================================================================
// Mount and initial state
// =========================================================================

#[tokio::test]
async fn test_mount_immediate_success_loads_data() {
    let (fetch, _) = sequence(vec![Ok(vec![1, 2, 3])]);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), eager());
    assert!(handle.state().is_loading, "immediate handle starts loading");

    handle.mount().await;

    let state = handle.state();
    assert_eq!(state.data, Some(vec![1, 2, 3]));
    assert!(!state.is_loading);
    assert!(!state.is_refreshing);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_mount_manual_does_not_fetch() {
    let (fetch, calls) = sequence::<u32>(vec![Ok(1)]);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), FetchOptions::manual(()));

    handle.mount().await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!handle.state().is_loading);
    assert_eq!(handle.generation(), 0);
}

#[tokio::test]
async fn test_mount_twice_fetches_once() {
    let (fetch, calls) = sequence(vec![Ok(1u32), Ok(2)]);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), eager());

    handle.mount().await;
    handle.mount().await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(handle.state().data, Some(1));
}

#[tokio::test]
async fn test_refetch_before_mount_is_noop() {
    let (fetch, calls) = sequence(vec![Ok(1u32)]);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), FetchOptions::manual(()));

    handle.refetch().await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(handle.state().data.is_none());
}

// =========================================================================
// Failures
// =========================================================================

#[tokio::test]
async fn test_error_keeps_previous_data_and_sets_message() {
    let (fetch, _) = sequence(vec![
        Ok(vec!["camp"]),
        Err(server_error("WooCommerce is required.")),
    ]);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), eager());
    handle.mount().await;

    handle.refetch().await;

    let state = handle.state();
    assert_eq!(state.data, Some(vec!["camp"]), "data must survive a failed fetch");
    assert_eq!(state.error.as_deref(), Some("WooCommerce is required."));
    assert!(!state.is_loading && !state.is_refreshing);
}

#[tokio::test]
async fn test_error_without_message_uses_generic_text() {
    let (fetch, _) = sequence::<u8>(vec![Err(server_error(""))]);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), eager());

    handle.mount().await;

    assert_eq!(handle.state().error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_error_is_cleared_when_next_attempt_starts() {
    let (fetch, mut replies) = gated::<u8>(2);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), FetchOptions::manual(()));
    handle.mount().await;

    let h = handle.clone();
    let first = tokio::spawn(async move { h.refetch().await });
    settle().await;
    replies.remove(0).send(Err(server_error("boom"))).unwrap();
    first.await.unwrap();
    assert_eq!(handle.state().error.as_deref(), Some("boom"));

    let h = handle.clone();
    let second = tokio::spawn(async move { h.refetch().await });
    settle().await;
    assert!(handle.state().error.is_none(), "error cleared at start of attempt");
    assert!(handle.state().is_loading);

    replies.remove(0).send(Ok(7)).unwrap();
    second.await.unwrap();
    assert_eq!(handle.state().data, Some(7));
}

#[tokio::test]
async fn test_session_expired_calls_hook_once_and_sets_no_error() {
    let (fetch, _) = sequence::<u8>(vec![Err(expired())]);
    let (hook, logouts) = counting_hook();
    let handle = FetchHandle::new(fetch, hook, eager());

    handle.mount().await;

    let state = handle.state();
    assert_eq!(logouts.load(Ordering::SeqCst), 1);
    assert!(state.error.is_none(), "expiry is never shown as an error");
    assert!(state.is_loading, "state stays in its loading condition");
}

#[tokio::test]
async fn test_plain_error_does_not_call_hook() {
    let (fetch, _) = sequence::<u8>(vec![Err(ApiError::Network("offline".into()))]);
    let (hook, logouts) = counting_hook();
    let handle = FetchHandle::new(fetch, hook, eager());

    handle.mount().await;

    assert_eq!(logouts.load(Ordering::SeqCst), 0);
    assert!(handle.state().error.is_some());
}

// =========================================================================
// Refresh
// =========================================================================

#[tokio::test]
async fn test_refresh_keeps_data_visible_until_new_result() {
    let (fetch, mut replies) = gated(2);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), eager());

    let h = handle.clone();
    let mount = tokio::spawn(async move { h.mount().await });
    settle().await;
    replies.remove(0).send(Ok("v1")).unwrap();
    mount.await.unwrap();

    let h = handle.clone();
    let refresh = tokio::spawn(async move { h.refresh().await });
    settle().await;

    let during = handle.state();
    assert_eq!(during.data, Some("v1"), "refresh must not clear data");
    assert!(during.is_refreshing);
    assert!(!during.is_loading, "flags are never both set");

    replies.remove(0).send(Ok("v2")).unwrap();
    refresh.await.unwrap();

    let after = handle.state();
    assert_eq!(after.data, Some("v2"));
    assert!(!after.is_refreshing);
}

// =========================================================================
// Unmount guard
// =========================================================================

#[tokio::test]
async fn test_unmount_mid_flight_prevents_state_write() {
    let (fetch, mut replies) = gated::<u8>(1);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), eager());

    let h = handle.clone();
    let mount = tokio::spawn(async move { h.mount().await });
    settle().await;

    let mut rx = handle.subscribe();
    rx.borrow_and_update();
    handle.unmount();

    replies.remove(0).send(Ok(42)).unwrap();
    mount.await.unwrap();

    assert!(!rx.has_changed().unwrap(), "no write after unmount");
    assert!(handle.state().data.is_none());
}

#[tokio::test]
async fn test_unmount_mid_flight_skips_logout() {
    let (fetch, mut replies) = gated::<u8>(1);
    let (hook, logouts) = counting_hook();
    let handle = FetchHandle::new(fetch, hook, eager());

    let h = handle.clone();
    let mount = tokio::spawn(async move { h.mount().await });
    settle().await;
    handle.unmount();

    replies.remove(0).send(Err(expired())).unwrap();
    mount.await.unwrap();

    assert_eq!(logouts.load(Ordering::SeqCst), 0);
}

// =========================================================================
// Request generations
// =========================================================================

#[tokio::test]
async fn test_stale_response_does_not_overwrite_newer() {
    let (fetch, mut replies) = gated(2);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), FetchOptions::manual(()));
    handle.mount().await;

    let h = handle.clone();
    let older = tokio::spawn(async move { h.refetch().await });
    settle().await;
    let h = handle.clone();
    let newer = tokio::spawn(async move { h.refresh().await });
    settle().await;

    let older_reply = replies.remove(0);
    let newer_reply = replies.remove(0);

    // Newer resolves first, older last.
    newer_reply.send(Ok("newer")).unwrap();
    newer.await.unwrap();
    older_reply.send(Ok("older")).unwrap();
    older.await.unwrap();

    assert_eq!(handle.state().data, Some("newer"));
    assert_eq!(handle.generation(), 2);
}

#[tokio::test]
async fn test_stale_error_is_discarded() {
    let (fetch, mut replies) = gated::<u8>(2);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), FetchOptions::manual(()));
    handle.mount().await;

    let h = handle.clone();
    let older = tokio::spawn(async move { h.refetch().await });
    settle().await;
    let h = handle.clone();
    let newer = tokio::spawn(async move { h.refetch().await });
    settle().await;

    let older_reply = replies.remove(0);
    replies.remove(0).send(Ok(5)).unwrap();
    newer.await.unwrap();
    older_reply.send(Err(server_error("late failure"))).unwrap();
    older.await.unwrap();

    let state = handle.state();
    assert_eq!(state.data, Some(5));
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_stale_session_expiry_still_logs_out() {
    let (fetch, mut replies) = gated::<u8>(2);
    let (hook, logouts) = counting_hook();
    let handle = FetchHandle::new(fetch, hook, FetchOptions::manual(()));
    handle.mount().await;

    let h = handle.clone();
    let older = tokio::spawn(async move { h.refetch().await });
    settle().await;
    let h = handle.clone();
    let newer = tokio::spawn(async move { h.refetch().await });
    settle().await;

    let older_reply = replies.remove(0);
    replies.remove(0).send(Ok(1)).unwrap();
    newer.await.unwrap();
    older_reply.send(Err(expired())).unwrap();
    older.await.unwrap();

    assert_eq!(logouts.load(Ordering::SeqCst), 1);
}

// =========================================================================
// Subscription key
// =========================================================================

#[tokio::test]
async fn test_set_key_change_refetches() {
    let (fetch, calls) = sequence(vec![Ok(1u32), Ok(2)]);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), FetchOptions::with_key("camp-1"));
    handle.mount().await;

    let triggered = handle.set_key("camp-2").await;

    assert!(triggered);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(handle.state().data, Some(2));
}

#[tokio::test]
async fn test_set_key_same_value_does_not_refetch() {
    let (fetch, calls) = sequence(vec![Ok(1u32), Ok(2)]);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), FetchOptions::with_key(7u64));
    handle.mount().await;

    let triggered = handle.set_key(7).await;

    assert!(!triggered);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_set_options_enabling_immediate_fetches() {
    let (fetch, calls) = sequence(vec![Ok(1u32)]);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), FetchOptions::manual(()));
    handle.mount().await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let triggered = handle.set_options(eager()).await;

    assert!(triggered);
    assert_eq!(handle.state().data, Some(1));
}

#[tokio::test]
async fn test_set_key_on_manual_handle_does_not_fetch() {
    let (fetch, calls) = sequence(vec![Ok(1u32)]);
    let handle = FetchHandle::new(fetch, no_expiry_hook(), FetchOptions::manual(1u8));
    handle.mount().await;

    let triggered = handle.set_key(2).await;

    assert!(!triggered);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(handle.options().key, 2);
}
