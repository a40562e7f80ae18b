//! # httpsuite
//!
//! An in-memory object model for HTTP/1.x requests and responses: build them
//! by hand, compile them to wire bytes, parse them back from raw bytes.
//!
//! Every field is a [`Scalar`], which erases the difference between text,
//! bytes and integers, so `200`, `"200"` and `b"200"` are interchangeable.
//!
//! ## Quick Start
//!
//! ```
//! use httpsuite::{Message, Request, Response};
//!
//! let request = Request::new("GET", "/", "HTTP/1.1").with_header("Host", "example.com");
//! let raw = request.to_bytes();
//! assert_eq!(&raw[..], b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n");
//!
//! let response = Response::parse(b"HTTP/1.1 200 OK\r\nServer: demo\r\n\r\nhello").unwrap();
//! assert_eq!(*response.status(), 200u16);
//! assert_eq!(response.headers().field("Server").unwrap(), "demo");
//! assert_eq!(response.body(), "hello");
//! ```
//!
//! Sockets, connection handling and TLS are left to the caller: `parse` takes
//! a complete buffer and `to_bytes` produces one.

pub mod error;
pub mod http;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use error::{Error, Result};
pub use http::{
    AnyMessage, BodyPolicy, Compiled, Format, HeaderMap, Message, ParseOptions, Request, Response,
    Scalar,
};
