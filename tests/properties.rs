use httpsuite::{Error, HeaderMap, Message, Request, Response, Scalar};
use proptest::prelude::*;

// Header names and values that survive the wire form: no CR/LF, names without
// colons, values without a leading space.
fn header_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_-]{0,15}"
}

fn header_value() -> impl Strategy<Value = String> {
    "[!-~]([ -~]{0,30})?"
}

fn token() -> impl Strategy<Value = String> {
    "[!-~]{1,16}"
}

fn headers() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((header_name(), header_value()), 0..8)
}

proptest! {
    /// Property: text, bytes and a nested scalar all canonicalize identically
    #[test]
    fn prop_scalar_kinds_agree(text in "[ -~]{0,32}") {
        let from_text = Scalar::from(text.as_str());
        let from_bytes = Scalar::from(text.as_bytes());
        let nested = Scalar::from(&from_text);
        prop_assert_eq!(&from_text, &from_bytes);
        prop_assert_eq!(&nested, &from_text);
        prop_assert_eq!(from_text.as_text(), nested.as_text());
    }

    /// Property: integers equal their decimal text
    #[test]
    fn prop_integers_are_decimal(n in any::<i64>()) {
        let scalar = Scalar::from(n);
        prop_assert_eq!(&scalar, &Scalar::from(n.to_string()));
        prop_assert!(scalar == n);
        prop_assert!(scalar != n.wrapping_add(1));
    }

    /// Property: merge keeps left order, appends unseen right keys, and right wins
    #[test]
    fn prop_merge_ordering(left in headers(), right in headers()) {
        let l: HeaderMap = left.iter().cloned().collect();
        let r: HeaderMap = right.iter().cloned().collect();
        let merged = l.merge(&r);

        let left_keys: Vec<&Scalar> = l.keys().collect();
        let merged_keys: Vec<&Scalar> = merged.keys().collect();
        prop_assert_eq!(&merged_keys[..left_keys.len()], &left_keys[..]);

        for (name, value) in r.iter() {
            prop_assert_eq!(merged.get(name), Some(value));
        }
        for (name, value) in l.iter() {
            if !r.contains(name) {
                prop_assert_eq!(merged.get(name), Some(value));
            }
        }
    }

    /// Property: any well-formed request survives compile then parse
    #[test]
    fn prop_request_round_trip(
        method in "[A-Z]{1,8}",
        target in token(),
        protocol in "HTTP/[0-3]\\.[0-9]",
        pairs in headers(),
        body in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let original = Request::new(method, target, protocol)
            .with_headers(pairs)
            .with_body(body);
        let parsed = Request::parse(original.to_bytes()).unwrap();
        prop_assert_eq!(parsed, original);
    }

    /// Property: single-token reason phrases survive compile then parse
    #[test]
    fn prop_response_round_trip(
        status in 100u16..600,
        phrase in "[A-Za-z-]{1,20}",
        pairs in headers(),
        body in "[ -~\r\n]{0,128}",
    ) {
        let original = Response::new("HTTP/1.1", status, phrase)
            .with_headers(pairs)
            .with_body(body);
        let parsed = Response::parse(original.to_bytes()).unwrap();
        prop_assert_eq!(parsed, original);
    }

    /// Property: a status line with more than three tokens never parses
    #[test]
    fn prop_response_rejects_spaced_phrase(
        status in 100u16..600,
        words in proptest::collection::vec("[A-Za-z]{1,10}", 2..5),
    ) {
        let raw = format!("HTTP/1.1 {status} {}\r\n\r\n", words.join(" "));
        let is_malformed = matches!(
            Response::parse(raw),
            Err(Error::Malformed { expected: 3, .. })
        );
        prop_assert!(is_malformed);
    }
}
