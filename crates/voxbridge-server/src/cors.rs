//! Cross-origin headers for the browser session endpoint.
//!
//! The allow-list is one-directional: a listed origin is echoed back, any
//! other origin receives the first listed origin instead. Browsers then
//! refuse the response for the unlisted caller.

use axum::http::{
    header::{
        ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
        ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    },
    HeaderMap, HeaderValue,
};

const ALLOWED_METHODS: &str = "POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Origin allow-list for cross-origin session requests.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<HeaderValue>,
}

impl CorsPolicy {
    /// Builds a policy from configured origins, dropping entries that are
    /// not valid header values.
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_origins = origins
            .into_iter()
            .filter_map(|origin| {
                let origin = origin.as_ref();
                match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin, "ignoring invalid CORS origin");
                        None
                    }
                }
            })
            .collect();
        Self { allowed_origins }
    }

    /// Picks the `Access-Control-Allow-Origin` value for a request origin.
    ///
    /// Returns `None` only when the allow-list is empty.
    pub fn resolve_origin(&self, origin: Option<&HeaderValue>) -> Option<&HeaderValue> {
        origin
            .and_then(|origin| self.allowed_origins.iter().find(|allowed| *allowed == origin))
            .or_else(|| self.allowed_origins.first())
    }

    /// Builds the full set of CORS response headers for `request_headers`.
    pub fn headers_for(&self, request_headers: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let origin = request_headers.get(axum::http::header::ORIGIN);
        if let Some(allowed) = self.resolve_origin(origin) {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, allowed.clone());
        }
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
        headers
    }
}
