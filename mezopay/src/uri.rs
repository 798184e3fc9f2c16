//! `musd:pay` payment URI encoding and decoding.
//!
//! A payment URI carries a [`PaymentRequest`] in a form suitable for QR codes:
//!
//! ```text
//! musd:pay?to=<address>&amount=<decimal>[&memo=<text>][&orderId=<text>]
//! ```
//!
//! Values use `application/x-www-form-urlencoded` escaping, the same rules
//! browsers apply to `URLSearchParams`: spaces become `+`, reserved and
//! non-ASCII bytes are percent-encoded. Parameters are written in the order
//! above and may appear in any order when decoding.

use url::form_urlencoded;

use crate::payment::PaymentRequest;

/// Scheme and path every payment URI starts with.
pub const PAYMENT_URI_PREFIX: &str = "musd:pay?";

/// Returned by [`PaymentRequest::from_str`](std::str::FromStr::from_str) when a
/// string is not a usable payment URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
    /// Wrong prefix, or `to`/`amount` missing.
    #[error("not a valid musd:pay URI")]
    InvalidPaymentUri,
}

/// Encodes a payment request as a `musd:pay` URI.
///
/// `memo` and `orderId` are only written when present and non-empty. Field
/// contents are not validated.
#[must_use]
pub fn encode(request: &PaymentRequest) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("to", &request.to)
        .append_pair("amount", &request.amount);
    if let Some(memo) = non_empty(request.memo.as_deref()) {
        query.append_pair("memo", memo);
    }
    if let Some(order_id) = non_empty(request.order_id.as_deref()) {
        query.append_pair("orderId", order_id);
    }
    format!("{PAYMENT_URI_PREFIX}{}", query.finish())
}

/// Decodes a `musd:pay` URI.
///
/// Returns `None` when the prefix is missing or `to`/`amount` is absent or
/// empty. Empty `memo`/`orderId` values decode as absent. When a key is
/// repeated the first occurrence wins; unknown keys are ignored.
#[must_use]
pub fn decode(uri: &str) -> Option<PaymentRequest> {
    let query = uri.strip_prefix(PAYMENT_URI_PREFIX)?;

    let mut to = None;
    let mut amount = None;
    let mut memo = None;
    let mut order_id = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match key.as_ref() {
            "to" => &mut to,
            "amount" => &mut amount,
            "memo" => &mut memo,
            "orderId" => &mut order_id,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    Some(PaymentRequest {
        to: to.filter(|v| !v.is_empty())?,
        amount: amount.filter(|v| !v.is_empty())?,
        memo: memo.filter(|v| !v.is_empty()),
        order_id: order_id.filter(|v| !v.is_empty()),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TO: &str = "0xabc0000000000000000000000000000000000def";

    #[test]
    fn test_encode_full_request() {
        let request = PaymentRequest::new(TO, "50")
            .with_memo("order")
            .with_order_id("X1");
        let uri = encode(&request);
        assert_eq!(uri, format!("musd:pay?to={TO}&amount=50&memo=order&orderId=X1"));
        assert_eq!(decode(&uri), Some(request));
    }

    #[test]
    fn test_encode_skips_empty_optionals() {
        let request = PaymentRequest {
            to: TO.into(),
            amount: "1".into(),
            memo: Some(String::new()),
            order_id: None,
        };
        assert_eq!(encode(&request), format!("musd:pay?to={TO}&amount=1"));
    }

    #[test]
    fn test_encode_escapes_reserved_characters() {
        let request = PaymentRequest::new(TO, "1").with_memo("a b&c=d%e+f#g/é");
        let uri = encode(&request);
        assert_eq!(
            uri,
            format!("musd:pay?to={TO}&amount=1&memo=a+b%26c%3Dd%25e%2Bf%23g%2F%C3%A9")
        );
        assert_eq!(decode(&uri).unwrap().memo.as_deref(), Some("a b&c=d%e+f#g/é"));
    }

    #[test]
    fn test_encode_passes_malformed_fields_through() {
        let request = PaymentRequest::new("not-an-address", "lots");
        assert_eq!(encode(&request), "musd:pay?to=not-an-address&amount=lots");
    }

    #[test]
    fn test_decode_rejects_incomplete_input() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("musd:pay"), None);
        assert_eq!(decode(&format!("ethereum:pay?to={TO}&amount=1")), None);
        assert_eq!(decode(&format!("MUSD:pay?to={TO}&amount=1")), None);
        assert_eq!(decode("musd:pay?amount=1"), None);
        assert_eq!(decode(&format!("musd:pay?to={TO}")), None);
        assert_eq!(decode(&format!("musd:pay?to={TO}&amount=")), None);
        assert_eq!(decode("musd:pay?to=&amount=1"), None);
    }

    #[test]
    fn test_decode_any_parameter_order() {
        let decoded = decode(&format!("musd:pay?orderId=A-9&amount=2.5&foo=bar&to={TO}")).unwrap();
        assert_eq!(decoded, PaymentRequest::new(TO, "2.5").with_order_id("A-9"));
    }

    #[test]
    fn test_decode_absent_optionals_stay_absent() {
        let decoded = decode(&format!("musd:pay?to={TO}&amount=3&memo=")).unwrap();
        assert_eq!(decoded.memo, None);
        assert_eq!(decoded.order_id, None);
    }

    #[test]
    fn test_decode_first_occurrence_wins() {
        let decoded = decode(&format!("musd:pay?to={TO}&amount=1&amount=2")).unwrap();
        assert_eq!(decoded.amount, "1");
    }

    #[test]
    fn test_decode_percent_encoded_space() {
        let uri = format!("musd:pay?to={TO}&amount=1&memo=Payment%20for%20services");
        let decoded = decode(&uri).unwrap();
        assert_eq!(decoded.memo.as_deref(), Some("Payment for services"));
    }

    #[test]
    fn test_roundtrip_valid_requests() {
        let requests = [
            PaymentRequest::new(TO, "0"),
            PaymentRequest::new(TO, "100.5").with_memo("Payment for services"),
            PaymentRequest::new(TO, "0.000000000000000001").with_order_id("ORDER-123"),
            PaymentRequest::new(TO, "7")
                .with_memo("line1\nline2 ✓")
                .with_order_id("id with spaces & symbols=?"),
        ];
        for request in requests {
            assert_eq!(decode(&encode(&request)), Some(request));
        }
    }
}
