//! Reference tables from the HTTP RFCs.
//!
//! Each entry cites its document and section under <https://tools.ietf.org/html/>.
//! The tables are informational: parsing and compiling never reject methods,
//! headers, protocols or status codes that are missing from them.

use std::sync::LazyLock;

use super::lookup::{NameSet, TwoWayLookup};
use super::{Method, StatusCode};

// Core Rules, rfc5234#appendix-B.1
pub const CR: &[u8] = b"\r";
pub const LF: &[u8] = b"\n";
pub const CRLF: &[u8] = b"\r\n";

/// Protocol versions (rfc1945#section-3.1, rfc7231, rfc7540, draft-ietf-quic-http).
pub static PROTOCOLS: LazyLock<NameSet> = LazyLock::new(|| {
    ["HTTP/0.9", "HTTP/1.0", "HTTP/1.1", "HTTP/2.0", "HTTP/3.0"]
        .into_iter()
        .collect()
});

/// Request methods, rfc7231#section-4.
pub static REQUEST_METHODS: LazyLock<NameSet> =
    LazyLock::new(|| Method::STANDARD.into_iter().collect());

/// Request header fields, rfc7231#section-5.
pub static REQUEST_HEADERS: LazyLock<NameSet> = LazyLock::new(|| {
    [
        // Controls, rfc7231#section-5.1
        "Cache-Control",
        "Expect",
        "Host",
        "Max-Forwards",
        "Pragma",
        "Range",
        "TE",
        // Conditionals, rfc7231#section-5.2
        "If-Match",
        "If-None-Match",
        "If-Modified-Since",
        "If-Unmodified-Since",
        "If-Range",
        // Content negotiation, rfc7231#section-5.3
        "Accept",
        "Accept-Charset",
        "Accept-Encoding",
        "Accept-Language",
        // Authentication credentials, rfc7231#section-5.4
        "Authorization",
        "Proxy-Authorization",
        // Request context, rfc7231#section-5.5
        "From",
        "Referer",
        "User-Agent",
    ]
    .into_iter()
    .collect()
});

/// Response header fields, rfc7231#section-7.
pub static RESPONSE_HEADERS: LazyLock<NameSet> = LazyLock::new(|| {
    [
        // Control data, rfc7231#section-7.1
        "Age",
        "Cache-Control",
        "Expires",
        "Date",
        "Location",
        "Retry-After",
        "Vary",
        "Warning",
        // Validators, rfc7231#section-7.2
        "ETag",
        "Last-Modified",
        // Authentication challenges, rfc7231#section-7.3
        "WWW-Authenticate",
        "Proxy-Authenticate",
        // Response context, rfc7231#section-7.4
        "Accept-Ranges",
        "Allow",
        "Server",
    ]
    .into_iter()
    .collect()
});

/// Status codes and reason phrases, rfc7231#section-6.
pub static RESPONSE_STATUS: LazyLock<TwoWayLookup> = LazyLock::new(|| {
    TwoWayLookup::new(
        StatusCode::ALL
            .into_iter()
            .map(|status| (status, status.canonical_reason())),
    )
});
