//! HTTP request: `method target protocol`, headers and body.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::headers::HeaderMap;
use super::message::{self, Message};
use super::scalar::Scalar;
use crate::error::Result;

/// An HTTP request.
///
/// Build one directly, or use [`Message::parse`] on raw bytes.
///
/// # Examples
///
/// ```
/// use httpsuite::{Message, Request};
///
/// let request = Request::new("GET", "/", "HTTP/1.1")
///     .with_header("Host", "example.com")
///     .with_body("hi");
/// assert_eq!(
///     request.to_bytes(),
///     &b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\nhi"[..]
/// );
///
/// let parsed = Request::parse(request.to_bytes()).unwrap();
/// assert_eq!(parsed, request);
/// assert_eq!(parsed.headers().field("Host").unwrap(), "example.com");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    method: Scalar,
    target: Scalar,
    protocol: Scalar,
    #[serde(default)]
    headers: HeaderMap,
    #[serde(default)]
    body: Scalar,
}

impl Request {
    /// Creates a request with no headers and an empty body.
    pub fn new(
        method: impl Into<Scalar>,
        target: impl Into<Scalar>,
        protocol: impl Into<Scalar>,
    ) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
            protocol: protocol.into(),
            headers: HeaderMap::new(),
            body: Scalar::empty(),
        }
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

    /// Returns the request method (`GET`, `POST`, ...).
    pub fn method(&self) -> &Scalar {
        &self.method
    }

    /// Returns the request target (`/index.html`).
    pub fn target(&self) -> &Scalar {
        &self.target
    }

    /// Returns the protocol version (`HTTP/1.1`).
    pub fn protocol(&self) -> &Scalar {
        &self.protocol
    }

    pub fn set_method(&mut self, method: impl Into<Scalar>) {
        self.method = method.into();
    }

    pub fn set_target(&mut self, target: impl Into<Scalar>) {
        self.target = target.into();
    }

    pub fn set_protocol(&mut self, protocol: impl Into<Scalar>) {
        self.protocol = protocol.into();
    }
}

impl Message for Request {
    const ARROW: &'static str = "→";

    fn from_first_line(first_line: &Scalar, headers: HeaderMap, body: Scalar) -> Result<Self> {
        let [method, target, protocol] = message::first_line_tokens(first_line)?;
        Ok(Self {
            method,
            target,
            protocol,
            headers,
            body,
        })
    }

    fn first_line(&self) -> Scalar {
        self.method.concat(" ") + &self.target + " " + &self.protocol
    }

    fn set_first_line(&mut self, line: impl Into<Scalar>) -> Result<()> {
        let [method, target, protocol] = message::first_line_tokens(&line.into())?;
        self.method = method;
        self.target = target;
        self.protocol = protocol;
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

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        message::display(self, f)
    }
}
