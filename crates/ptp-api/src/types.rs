//! Core data types exchanged with the PTP REST plugin.
//!
//! These are the structures that come back from `/wp-json/ptp/v1/...` and
//! the JWT login endpoint. Field names follow the backend's JSON exactly,
//! with `#[serde(default)]` wherever the plugin may leave a value out.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A WordPress user ID.
///
/// Newtype over the raw `u64` so a user ID can't be mixed up with a camp
/// or trainer post ID. Serialized as the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// The signed-in account, as returned by `GET /me`.
///
/// Always fetched fresh from the backend after a token is obtained or
/// loaded; never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Display name.
    pub name: String,
    pub email: String,
    /// First WordPress role of the account.
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "subscriber".to_string()
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// What the user types on the login screen.
///
/// The JWT plugin calls the field `username`, but it accepts an email too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Successful response from `POST /jwt-auth/v1/token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The opaque session token to persist and send as a bearer token.
    pub token: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub user_nicename: String,
    #[serde(default)]
    pub user_display_name: String,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A camp or clinic product listed for registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camp {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Display price, already formatted by the backend (e.g. `"$299"`).
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default)]
    pub almost_full: bool,
    #[serde(default)]
    pub product_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "summer".to_string()
}

/// A trainer profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub rating: f64,
}

// ---------------------------------------------------------------------------
// Sessions (the user's bookings)
// ---------------------------------------------------------------------------

/// What kind of product a booked session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Camp,
    Clinic,
}

/// One booked camp or clinic belonging to the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    pub name: String,
    /// Camp date, or `"TBD"` when the product has none.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    /// Raw status string. The backend currently sends `"upcoming"` or
    /// `"completed"`; kept as a string so a new status doesn't break decoding.
    pub status: String,
}

impl Session {
    /// Status value that marks a session as still ahead of the user.
    pub const UPCOMING: &'static str = "upcoming";

    /// Returns `true` if the status is exactly `"upcoming"`.
    pub fn is_upcoming(&self) -> bool {
        self.status == Self::UPCOMING
    }
}

// ---------------------------------------------------------------------------
// Remote app configuration
// ---------------------------------------------------------------------------

/// Remote configuration served by `GET /app-config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub min_supported_app_version: String,
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub banners: Vec<Banner>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    #[serde(default)]
    pub enable_private_training: bool,
    #[serde(default)]
    pub enable_messaging: bool,
}

/// A promotional banner shown on the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub cta_text: String,
    #[serde(default)]
    pub url: String,
}
