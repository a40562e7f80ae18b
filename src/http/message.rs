//! The contract shared by [`Request`] and [`Response`]: compiling to wire
//! bytes or display text, and parsing from a complete raw buffer.
//!
//! Wire layout, byte-exact:
//!
//! ```text
//! <first-line>\r\n<Name: Value>\r\n...<Name: Value>\r\n\r\n<body>
//! ```
//!
//! Parsing expects one complete head followed by an already-complete body.
//! There is no incremental parsing, chunked decoding or header folding.

use std::fmt;
use std::str::FromStr;

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::headers::HeaderMap;
use super::request::Request;
use super::response::Response;
use super::rfc::CRLF;
use super::scalar::Scalar;
use crate::error::{Error, Result};

/// Representation a message is compiled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Text,
    Bytes,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" | "str" | "string" => Ok(Self::Text),
            "bytes" | "raw" => Ok(Self::Bytes),
            other => Err(Error::Format {
                requested: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Bytes => "bytes",
        })
    }
}

/// Output of [`Message::compile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compiled {
    Text(String),
    Bytes(Bytes),
}

impl Compiled {
    pub fn format(&self) -> Format {
        match self {
            Self::Text(_) => Format::Text,
            Self::Bytes(_) => Format::Bytes,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => &bytes[..],
        }
    }

    pub fn into_bytes(self) -> Bytes {
        match self {
            Self::Text(text) => Bytes::from(text),
            Self::Bytes(bytes) => bytes,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// What becomes of the bytes after the blank line that ends the head.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyPolicy {
    /// The body is everything after the first blank line, byte for byte.
    #[default]
    Verbatim,
    /// The body is every non-empty CRLF-delimited line after the first blank
    /// line, concatenated without separators. Blank lines inside the body are lost.
    JoinLines,
}

/// Options for [`Message::parse_with`].
///
/// # Examples
///
/// ```
/// use httpsuite::{BodyPolicy, Message, ParseOptions, Request};
///
/// let raw = b"POST / HTTP/1.1\r\n\r\na\r\n\r\nb";
///
/// let verbatim = Request::parse(raw).unwrap();
/// assert_eq!(verbatim.body(), "a\r\n\r\nb");
///
/// let options = ParseOptions::new().body_policy(BodyPolicy::JoinLines);
/// let joined = Request::parse_with(raw, &options).unwrap();
/// assert_eq!(joined.body(), "ab");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    body: BodyPolicy,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn body_policy(mut self, policy: BodyPolicy) -> Self {
        self.body = policy;
        self
    }

    pub fn body(&self) -> BodyPolicy {
        self.body
    }
}

/// Shared behavior of HTTP requests and responses.
///
/// Implementors store their typed first-line fields and derive the first line
/// from them on every read, so it can never go stale.
pub trait Message: Sized {
    /// Marker prefixed to each line of the display form.
    const ARROW: &'static str;

    /// Builds a message from a raw first line plus already-parsed headers and body.
    ///
    /// # Errors
    ///
    /// [`Error::Malformed`] when the first line has the wrong number of tokens.
    fn from_first_line(first_line: &Scalar, headers: HeaderMap, body: Scalar) -> Result<Self>;

    /// Derives the first line from the typed fields.
    fn first_line(&self) -> Scalar;

    /// Replaces the typed fields with the tokens of `line`.
    ///
    /// # Errors
    ///
    /// [`Error::Malformed`] when `line` has the wrong number of tokens; the
    /// message is left unchanged.
    fn set_first_line(&mut self, line: impl Into<Scalar>) -> Result<()>;

    fn headers(&self) -> &HeaderMap;

    fn headers_mut(&mut self) -> &mut HeaderMap;

    fn body(&self) -> &Scalar;

    fn body_mut(&mut self) -> &mut Scalar;

    fn set_headers(&mut self, headers: impl Into<HeaderMap>) {
        *self.headers_mut() = headers.into();
    }

    fn set_body(&mut self, body: impl Into<Scalar>) {
        *self.body_mut() = body.into();
    }

    /// Serializes the message as `first line CRLF headers CRLF body`.
    ///
    /// The text form is the byte form decoded; it keeps every CRLF.
    fn compile(&self, format: Format) -> Compiled {
        let first_line = self.first_line();
        let headers = self.headers();
        let body = self.body();

        let estimated_size = first_line.len() + headers.len() * 32 + body.len() + 4;
        let mut buf = BytesMut::with_capacity(estimated_size);
        buf.put_slice(first_line.as_bytes());
        buf.put_slice(CRLF);
        headers.write_wire(&mut buf);
        buf.put_slice(CRLF);
        buf.put_slice(body.as_bytes());

        trace!(%format, len = buf.len(), "compiled message");

        match format {
            Format::Bytes => Compiled::Bytes(buf.freeze()),
            Format::Text => Compiled::Text(String::from_utf8_lossy(&buf).into_owned()),
        }
    }

    /// Like [`compile`](Self::compile), with the format given by name.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] unless `format` names the text or bytes form.
    fn compile_as(&self, format: &str) -> Result<Compiled> {
        Ok(self.compile(format.parse()?))
    }

    /// Wire bytes of the message.
    fn to_bytes(&self) -> Bytes {
        self.compile(Format::Bytes).into_bytes()
    }

    fn to_text(&self) -> String {
        self.compile(Format::Text).into_text()
    }

    /// Text form with empty lines dropped and every other line prefixed by
    /// `arrow`, joined by CRLF. An empty `arrow` returns the plain text form.
    fn to_display(&self, arrow: &str) -> String {
        let text = self.to_text();
        if arrow.is_empty() {
            return text;
        }
        text.lines()
            .filter(|line| !line.is_empty())
            .map(|line| format!("{arrow} {line}"))
            .collect::<Vec<_>>()
            .join("\r\n")
    }

    /// Parses a complete raw message with the default [`ParseOptions`].
    fn parse(raw: impl AsRef<[u8]>) -> Result<Self> {
        Self::parse_with(raw, &ParseOptions::default())
    }

    /// Parses a complete raw message.
    ///
    /// # Errors
    ///
    /// [`Error::Malformed`] when the first line has the wrong number of tokens.
    fn parse_with(raw: impl AsRef<[u8]>, options: &ParseOptions) -> Result<Self> {
        let head = Head::split(raw.as_ref(), options);
        head.log(options);
        Self::from_first_line(&head.first_line, head.headers, head.body)
    }
}

/// A parsed message whose variant was picked from its first line.
///
/// A first line starting with `HTTP/` is a status line; anything else is a
/// request line.
///
/// # Examples
///
/// ```
/// use httpsuite::AnyMessage;
///
/// let msg = AnyMessage::parse(b"HTTP/1.1 204 No-Content\r\n\r\n").unwrap();
/// assert!(matches!(msg, AnyMessage::Response(ref r) if r.status_msg() == "No-Content"));
///
/// // A status line is three tokens, like a request line.
/// assert!(AnyMessage::parse(b"HTTP/1.1 404 Not Found\r\n\r\n").is_err());
///
/// let msg = AnyMessage::parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();
/// assert!(matches!(msg, AnyMessage::Request(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnyMessage {
    Request(Request),
    Response(Response),
}

impl AnyMessage {
    pub fn parse(raw: impl AsRef<[u8]>) -> Result<Self> {
        Self::parse_with(raw, &ParseOptions::default())
    }

    pub fn parse_with(raw: impl AsRef<[u8]>, options: &ParseOptions) -> Result<Self> {
        let head = Head::split(raw.as_ref(), options);
        head.log(options);
        if head.first_line.as_bytes().starts_with(b"HTTP/") {
            Response::from_first_line(&head.first_line, head.headers, head.body).map(Self::Response)
        } else {
            Request::from_first_line(&head.first_line, head.headers, head.body).map(Self::Request)
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        match self {
            Self::Request(r) => r.headers(),
            Self::Response(r) => r.headers(),
        }
    }

    pub fn body(&self) -> &Scalar {
        match self {
            Self::Request(r) => r.body(),
            Self::Response(r) => r.body(),
        }
    }

    pub fn compile(&self, format: Format) -> Compiled {
        match self {
            Self::Request(r) => r.compile(format),
            Self::Response(r) => r.compile(format),
        }
    }

    pub fn to_bytes(&self) -> Bytes {
        self.compile(Format::Bytes).into_bytes()
    }
}

impl From<Request> for AnyMessage {
    fn from(request: Request) -> Self {
        Self::Request(request)
    }
}

impl From<Response> for AnyMessage {
    fn from(response: Response) -> Self {
        Self::Response(response)
    }
}

impl fmt::Display for AnyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(r) => fmt::Display::fmt(r, f),
            Self::Response(r) => fmt::Display::fmt(r, f),
        }
    }
}

/// Cuts a first line into exactly three fields on single spaces.
pub(crate) fn first_line_tokens(line: &Scalar) -> Result<[Scalar; 3]> {
    let tokens: Vec<&[u8]> = line.as_bytes().split(|b| *b == b' ').collect();
    match tokens.as_slice() {
        [a, b, c] => Ok([Scalar::from(*a), Scalar::from(*b), Scalar::from(*c)]),
        _ => Err(Error::Malformed {
            expected: 3,
            found: tokens.len(),
            line: line.as_text().into_owned(),
        }),
    }
}

/// The pieces of a raw message, before a variant is chosen.
struct Head {
    first_line: Scalar,
    headers: HeaderMap,
    body: Scalar,
}

impl Head {
    fn split(raw: &[u8], options: &ParseOptions) -> Self {
        let mut head = Head {
            first_line: Scalar::empty(),
            headers: HeaderMap::new(),
            body: Scalar::empty(),
        };

        let mut lines = CrlfLines::new(raw);
        let mut in_head = true;
        let mut index = 0usize;

        while let Some(line) = lines.next() {
            if line.is_empty() && in_head {
                in_head = false;
                if options.body() == BodyPolicy::Verbatim {
                    head.body = Scalar::from(lines.remainder());
                    break;
                }
            } else if in_head {
                if index == 0 {
                    head.first_line = Scalar::from(line);
                } else if let Some(colon) = line.iter().position(|b| *b == b':') {
                    let (name, value) = (&line[..colon], &line[colon + 1..]);
                    let value = value.strip_prefix(b" ").unwrap_or(value);
                    head.headers.insert(name, value);
                }
            } else if !line.is_empty() {
                head.body.concat_in_place(line);
            }
            index += 1;
        }

        head
    }

    fn log(&self, options: &ParseOptions) {
        debug!(
            first_line = %self.first_line,
            headers = self.headers.len(),
            body_len = self.body.len(),
            policy = ?options.body(),
            "parsed message head"
        );
    }
}

/// Iterates over CRLF-terminated lines. A trailing CRLF does not produce an
/// extra empty line.
struct CrlfLines<'a> {
    rest: &'a [u8],
}

impl<'a> CrlfLines<'a> {
    fn new(raw: &'a [u8]) -> Self {
        Self { rest: raw }
    }

    /// Bytes not yet consumed by the iterator.
    fn remainder(&self) -> &'a [u8] {
        self.rest
    }
}

impl<'a> Iterator for CrlfLines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.windows(2).position(|w| w == CRLF) {
            Some(end) => {
                let line = &self.rest[..end];
                self.rest = &self.rest[end + 2..];
                Some(line)
            }
            None => Some(std::mem::take(&mut self.rest)),
        }
    }
}

/// Text form with the direction marker, as shown by `Display`.
pub(crate) fn display<M: Message>(message: &M, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&message.to_display(M::ARROW))
}
