//! Message contracts with the display surface.
//!
//! Requests and events are JSON objects tagged by a `type` field, e.g.
//! `{"type": "GET_REFERENCES"}`.

use serde::{Deserialize, Serialize};

use crate::result::Reference;
use crate::settings::Theme;

/// Reply text for a liveness probe.
pub const PING_MESSAGE: &str = "Content script is active";

/// Requests accepted by a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    /// Scan now and reconcile against the previous result.
    GetReferences,
    /// Forget the previous result, then scan.
    ForceRefresh,
    /// Forget the previous result and delete the stored snapshot.
    ClearReferences,
    /// Liveness probe; no side effects.
    Ping,
}

/// Reply to a `Request`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Whether the request was carried out.
    pub success: bool,

    /// Fresh scan, for scanning requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<Reference>>,

    /// URL of the scanned page, for `GET_REFERENCES`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,

    /// Liveness text or failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    /// Bare success.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            references: None,
            page_url: None,
            message: None,
        }
    }

    /// Success carrying scan results.
    #[must_use]
    pub fn with_references(references: Vec<Reference>) -> Self {
        Self {
            references: Some(references),
            ..Self::ok()
        }
    }

    /// Reply to `Request::Ping`.
    #[must_use]
    pub fn pong() -> Self {
        Self {
            message: Some(PING_MESSAGE.to_string()),
            ..Self::ok()
        }
    }

    /// Failure with a reason.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::ok()
        }
    }
}

/// Notifications pushed to subscribers. Nobody listening is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    /// An accepted scan differs from the previous one.
    #[serde(rename_all = "camelCase")]
    ReferencesUpdated {
        /// The accepted scan.
        references: Vec<Reference>,
        /// Growth in entry count since the previous scan.
        new_count: usize,
    },
    /// The display theme preference changed.
    ThemeChanged {
        /// The new preference.
        theme: Theme,
    },
}
