//! HTTP response: `protocol status status_msg`, headers and body.
//!
//! A status line parses like a request line: exactly three tokens on single
//! spaces. A reason phrase with spaces (`Not Found`) still compiles, but the
//! result does not parse back.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StatusCode;
use super::headers::HeaderMap;
use super::message::{self, Message};
use super::scalar::Scalar;
use crate::error::Result;

/// An HTTP response.
///
/// # Examples
///
/// ```
/// use httpsuite::{Message, Response};
/// use httpsuite::http::StatusCode;
///
/// let response = Response::new("HTTP/1.1", 200u16, "OK");
/// assert_eq!(response.to_bytes(), &b"HTTP/1.1 200 OK\r\n\r\n"[..]);
///
/// let not_found = Response::with_status("HTTP/1.1", StatusCode::NotFound).with_body("gone");
/// assert_eq!(not_found.first_line(), "HTTP/1.1 404 Not Found");
/// assert_eq!(not_found.status_code(), Some(StatusCode::NotFound));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    protocol: Scalar,
    status: Scalar,
    status_msg: Scalar,
    #[serde(default)]
    headers: HeaderMap,
    #[serde(default)]
    body: Scalar,
}

impl Response {
    /// Creates a response with no headers and an empty body.
    pub fn new(
        protocol: impl Into<Scalar>,
        status: impl Into<Scalar>,
        status_msg: impl Into<Scalar>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            status: status.into(),
            status_msg: status_msg.into(),
            headers: HeaderMap::new(),
            body: Scalar::empty(),
        }
    }

    /// Creates a response whose reason phrase is the canonical one for `status`.
    pub fn with_status(protocol: impl Into<Scalar>, status: StatusCode) -> Self {
        Self::new(protocol, status, status.canonical_reason())
    }

    /// Sets a header, overwriting an existing value with the same name.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<Scalar>, value: impl Into<Scalar>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Replaces the whole header map.
    #[must_use]
    pub fn with_headers(mut self, headers: impl Into<HeaderMap>) -> Self {
        self.headers = headers.into();
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Scalar>) -> Self {
        self.body = body.into();
        self
    }

    pub fn protocol(&self) -> &Scalar {
        &self.protocol
    }

    pub fn status(&self) -> &Scalar {
        &self.status
    }

    pub fn status_msg(&self) -> &Scalar {
        &self.status_msg
    }

    /// The status as a catalog entry, when it is a known numeric code.
    pub fn status_code(&self) -> Option<StatusCode> {
        std::str::from_utf8(self.status.as_bytes())
            .ok()?
            .parse::<u16>()
            .ok()
            .and_then(StatusCode::from_u16)
    }

    pub fn set_protocol(&mut self, protocol: impl Into<Scalar>) {
        self.protocol = protocol.into();
    }

    pub fn set_status(&mut self, status: impl Into<Scalar>) {
        self.status = status.into();
    }

    pub fn set_status_msg(&mut self, status_msg: impl Into<Scalar>) {
        self.status_msg = status_msg.into();
    }
}

impl Message for Response {
    const ARROW: &'static str = "←";

    fn from_first_line(first_line: &Scalar, headers: HeaderMap, body: Scalar) -> Result<Self> {
        let [protocol, status, status_msg] = message::first_line_tokens(first_line)?;
        Ok(Self {
            protocol,
            status,
            status_msg,
            headers,
            body,
        })
    }

    fn first_line(&self) -> Scalar {
        self.protocol.concat(" ") + &self.status + " " + &self.status_msg
    }

    fn set_first_line(&mut self, line: impl Into<Scalar>) -> Result<()> {
        let [protocol, status, status_msg] = message::first_line_tokens(&line.into())?;
        self.protocol = protocol;
        self.status = status;
        self.status_msg = status_msg;
        Ok(())
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn body(&self) -> &Scalar {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Scalar {
        &mut self.body
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        message::display(self, f)
    }
}
