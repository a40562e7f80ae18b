use httpsuite::http::StatusCode;
use httpsuite::http::rfc::RESPONSE_STATUS;
use httpsuite::{AnyMessage, Error, Format, HeaderMap, Message, Request, Response, Scalar};
use serde_json::json;

const BODY: &str = r#"{"hello": "world"}"#;

fn request() -> Request {
    Request::new("GET", "/", "HTTP/1.1")
        .with_headers([
            ("Host", "www.google.com"),
            ("Accept", "*/*"),
            ("User-Agent", "httpsuite/1.0.0"),
            ("Connection", "keep-alive"),
        ])
        .with_body(BODY)
}

fn response() -> Response {
    Response::new("HTTP/1.1", 200u16, "OK")
        .with_headers([
            ("Host", "www.google.com"),
            ("Accept", "*/*"),
            ("Connection", "keep-alive"),
            ("Keep-Alive", "timeout=5, max=1000"),
            ("Server", "httpsuite/1.0.0"),
        ])
        .with_body(BODY)
}

const REQUEST_RAW: &[u8] = b"GET / HTTP/1.1\r\nHost: www.google.com\r\nAccept: */*\r\nUser-Agent: httpsuite/1.0.0\r\nConnection: keep-alive\r\n\r\n{\"hello\": \"world\"}";
const RESPONSE_RAW: &[u8] = b"HTTP/1.1 200 OK\r\nHost: www.google.com\r\nAccept: */*\r\nConnection: keep-alive\r\nKeep-Alive: timeout=5, max=1000\r\nServer: httpsuite/1.0.0\r\n\r\n{\"hello\": \"world\"}";

#[test]
fn compiles_to_exact_wire_bytes() {
    assert_eq!(request().to_bytes(), REQUEST_RAW);
    assert_eq!(response().to_bytes(), RESPONSE_RAW);
}

#[test]
fn text_form_is_decoded_wire_form() {
    assert_eq!(request().to_text().as_bytes(), REQUEST_RAW);
    assert_eq!(response().to_text().as_bytes(), RESPONSE_RAW);
}

#[test]
fn first_line_getters() {
    assert_eq!(request().first_line(), b"GET / HTTP/1.1");
    assert_eq!(response().first_line(), "HTTP/1.1 200 OK");
    assert_eq!(request().protocol(), "HTTP/1.1");
    assert_eq!(response().protocol(), b"HTTP/1.1");
}

#[test]
fn body_getter_matches_text_and_bytes() {
    assert_eq!(request().body(), BODY);
    assert_eq!(response().body(), BODY.as_bytes());
}

#[test]
fn parse_reproduces_request() {
    let parsed = Request::parse(REQUEST_RAW).unwrap();
    assert_eq!(parsed, request());

    let keys: Vec<String> = parsed.headers().keys().map(ToString::to_string).collect();
    assert_eq!(keys, ["Host", "Accept", "User-Agent", "Connection"]);
}

#[test]
fn parse_reproduces_response() {
    assert_eq!(Response::parse(RESPONSE_RAW).unwrap(), response());
}

#[test]
fn round_trip_small_request() {
    let original = Request::new("GET", "/", "HTTP/1.1")
        .with_header("Host", "example.com")
        .with_body("hi");
    let parsed = Request::parse(original.compile(Format::Bytes).as_bytes()).unwrap();
    assert_eq!(parsed.method(), "GET");
    assert_eq!(parsed.target(), "/");
    assert_eq!(parsed.protocol(), "HTTP/1.1");
    assert_eq!(parsed.headers(), &HeaderMap::from([("Host", "example.com")]));
    assert_eq!(parsed.body(), "hi");
}

#[test]
fn body_with_blank_lines_survives_round_trip() {
    let original = Request::new("POST", "/upload", "HTTP/1.1").with_body("line one\r\n\r\nline two\r\n");
    assert_eq!(Request::parse(original.to_bytes()).unwrap(), original);
}

#[test]
fn header_only_response_compiles() {
    let r = Response::new("HTTP/1.1", 200u16, "OK");
    assert_eq!(r.to_bytes(), &b"HTTP/1.1 200 OK\r\n\r\n"[..]);
}

#[test]
fn malformed_first_lines() {
    let mut req = request();
    assert!(matches!(req.set_first_line("GET /"), Err(Error::Malformed { .. })));
    let mut res = response();
    assert!(matches!(res.set_first_line("GET /"), Err(Error::Malformed { .. })));
}

#[test]
fn headers_and_body_setters() {
    let mut req = request();
    req.set_headers(HeaderMap::new());
    assert!(req.headers().is_empty());

    req.headers_mut().set_field("User_Agent", "tester");
    req.headers_mut().merge_in_place([("Accept", "*/*")]);
    req.set_body("<html>");
    req.body_mut().concat_in_place("</html>");

    assert_eq!(
        req.to_bytes(),
        &b"GET / HTTP/1.1\r\nUser-Agent: tester\r\nAccept: */*\r\n\r\n<html></html>"[..]
    );
}

#[test]
fn headers_from_dynamic_values() {
    let mut res = response();
    res.set_headers(HeaderMap::try_from(json!({"Content-Length": 18})).unwrap());
    assert_eq!(*res.headers().field("Content_Length").unwrap(), 18u32);

    assert!(matches!(
        HeaderMap::try_from(json!("NONE")),
        Err(Error::Type { found: "string", .. })
    ));
}

#[test]
fn compile_rejects_unknown_format() {
    assert!(matches!(request().compile_as("dict"), Err(Error::Format { .. })));
    assert!(matches!(response().compile_as("dict"), Err(Error::Format { .. })));
}

#[test]
fn any_message_picks_variant() {
    match AnyMessage::parse(RESPONSE_RAW).unwrap() {
        AnyMessage::Response(r) => assert_eq!(r.status_code(), Some(StatusCode::Ok)),
        other => panic!("expected a response, got {other:?}"),
    }
    match AnyMessage::parse(REQUEST_RAW).unwrap() {
        AnyMessage::Request(r) => assert_eq!(r.method(), "GET"),
        other => panic!("expected a request, got {other:?}"),
    }
}

#[test]
fn binary_body_survives_json() {
    let request = Request::new("POST", "/upload", "HTTP/1.1").with_body(vec![0xffu8]);
    let json = serde_json::to_string(&request).unwrap();
    let back: Request = serde_json::from_str(&json).unwrap();
    assert_eq!(back, request);
    assert_eq!(back.body().as_bytes(), [0xff]);
}

#[test]
fn any_message_serializes_with_kind_tag() {
    let msg = AnyMessage::from(Response::new("HTTP/1.1", 204u16, "No Content"));
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["kind"], "response");
    assert_eq!(value["status"], "204");
    assert_eq!(msg.to_bytes(), &b"HTTP/1.1 204 No Content\r\n\r\n"[..]);
}

#[test]
fn status_table_drives_responses() {
    let phrase = RESPONSE_STATUS.get(404u16).unwrap();
    let res = Response::new("HTTP/1.1", 404u16, phrase);
    assert_eq!(res.first_line(), "HTTP/1.1 404 Not Found");
    assert_eq!(res.status_msg(), &Scalar::from("Not Found"));
}
