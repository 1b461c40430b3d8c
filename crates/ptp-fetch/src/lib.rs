//! Async fetch state for the PTP mobile core.
//!
//! A [`FetchHandle`] wraps one async producer (usually an
//! [`ApiClient`](ptp_api::ApiClient) call) and tracks what a screen needs
//! to render it: the data, whether a load or a background refresh is in
//! flight, and a user-facing error message.
//!
//! # What it guarantees
//!
//! - No state is written after [`FetchHandle::unmount`].
//! - A session-expired failure never becomes an error message; it calls
//!   the [`ExpiryHook`] (the auth context's logout) exactly once.
//! - Overlapping triggers can't let an older response overwrite a newer
//!   one (request generations).
//!
//! # Resources
//!
//! [`CampsResource`], [`TrainersResource`], [`SessionsResource`] and
//! [`AppConfigResource`] are ready-made handles for each endpoint.
//!
//! ```ignore
//! let camps = CampsResource::new(client, on_expired);
//! camps.mount().await;
//! for camp in camps.camps() { /* render */ }
//! camps.refresh().await;
//! ```

mod handle;
mod producer;
mod resources;
mod state;

pub use handle::{FetchHandle, GENERIC_ERROR_MESSAGE};
pub use producer::{ExpiryHook, Producer, expiry_hook, no_expiry_hook, producer};
pub use resources::{
    AppConfigResource, CampsResource, SessionPartition, SessionsResource, TrainersResource,
};
pub use state::{FetchMode, FetchOptions, FetchState};
