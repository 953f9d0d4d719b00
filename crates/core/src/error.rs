//! Domain error model and HTTP failure normalization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized, display-ready failure produced from any HTTP outcome.
///
/// Immutable once constructed; carries no retry state. `message` is already
/// localized, so callers can render it verbatim. `status` is absent only for
/// transport-level failures where no HTTP response was obtained.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub body: Option<String>,
}

impl ApiError {
    /// Transport-level failure: the request never produced an HTTP response.
    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            message: format!("network error: {}", detail.into()),
            status: None,
            body: None,
        }
    }

    /// A 2xx response whose body could not be decoded as the expected type.
    pub fn decode(detail: impl Into<String>) -> Self {
        Self {
            message: format!("malformed response: {}", detail.into()),
            status: None,
            body: None,
        }
    }
}

/// Fixed translation table for the error codes the server is known to emit.
fn translate(code: &str) -> Option<&'static str> {
    match code {
        "unauthorized" => Some("Not authorized; please sign in again and retry."),
        "csrf_required" => Some("Your login session has expired; refresh the page and retry."),
        "invalid_credentials" => Some("Incorrect username or password."),
        "session_disabled" => Some("Login sessions are not enabled on this server."),
        "not_found" => Some("The requested resource does not exist."),
        "forbidden" => Some("This account is not allowed to perform that operation."),
        _ => None,
    }
}

/// Normalize an HTTP failure into a stable [`ApiError`].
///
/// Total over all `(status, body)` pairs and deterministic. The raw body is
/// trimmed, then read as a JSON object with an `error` or `message` field;
/// bodies that are not JSON objects are taken verbatim as the server message.
/// Known codes map through the translation table; unknown non-empty messages
/// pass through unchanged (they are assumed already human-readable); an empty
/// message falls back to a generic sentence embedding the status code.
pub fn normalize(status: u16, raw_body: &str) -> ApiError {
    let text = raw_body.trim();

    let server_msg = if text.is_empty() {
        String::new()
    } else {
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => value
                .get("error")
                .or_else(|| value.get("message"))
                .and_then(|field| field.as_str())
                .unwrap_or_default()
                .trim()
                .to_string(),
            Err(_) => text.to_string(),
        }
    };

    let message = match translate(&server_msg) {
        Some(localized) => localized.to_string(),
        None if !server_msg.is_empty() => server_msg,
        None => format!("request failed (status {status})"),
    };

    ApiError {
        message,
        status: Some(status),
        body: if text.is_empty() { None } else { Some(text.to_string()) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_fixed_sentences() {
        for code in [
            "unauthorized",
            "csrf_required",
            "invalid_credentials",
            "session_disabled",
            "not_found",
            "forbidden",
        ] {
            let expected = translate(code).unwrap();

            // As a JSON `error` field, as a JSON `message` field, and bare.
            let json_error = format!("{{\"error\":\"{code}\"}}");
            let json_message = format!("{{\"message\":\"{code}\"}}");
            for body in [json_error.as_str(), json_message.as_str(), code] {
                // The table applies regardless of status code.
                for status in [400_u16, 403, 500] {
                    assert_eq!(normalize(status, body).message, expected);
                }
            }
        }
    }

    #[test]
    fn empty_body_falls_back_to_status_sentence() {
        let err = normalize(503, "");
        assert!(err.message.contains("503"));
        assert_eq!(err.status, Some(503));
        assert_eq!(err.body, None);
    }

    #[test]
    fn whitespace_only_body_is_treated_as_empty() {
        let err = normalize(500, "  \n\t ");
        assert!(err.message.contains("500"));
        assert_eq!(err.body, None);
    }

    #[test]
    fn unknown_server_message_passes_through_verbatim() {
        let err = normalize(422, "{\"error\":\"quota exceeded for tenant\"}");
        assert_eq!(err.message, "quota exceeded for tenant");
        assert_eq!(err.status, Some(422));
    }

    #[test]
    fn non_json_body_is_taken_verbatim() {
        let err = normalize(502, "upstream timed out");
        assert_eq!(err.message, "upstream timed out");
        assert_eq!(err.body.as_deref(), Some("upstream timed out"));
    }

    #[test]
    fn json_without_error_fields_falls_back_to_status_sentence() {
        let err = normalize(500, "{\"detail\":\"boom\"}");
        assert!(err.message.contains("500"));
    }

    #[test]
    fn error_field_wins_over_message_field() {
        let err = normalize(403, "{\"error\":\"forbidden\",\"message\":\"other\"}");
        assert_eq!(err.message, translate("forbidden").unwrap());
    }

    #[test]
    fn non_string_error_field_falls_back_to_status_sentence() {
        let err = normalize(500, "{\"error\":42}");
        assert!(err.message.contains("500"));
    }

    #[test]
    fn network_errors_carry_no_status() {
        let err = ApiError::network("connection refused");
        assert_eq!(err.status, None);
        assert!(err.message.contains("connection refused"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: normalize is total and deterministic over arbitrary
            /// (status, body) inputs.
            #[test]
            fn normalize_is_total_and_deterministic(status in any::<u16>(), body in ".*") {
                let first = normalize(status, &body);
                let second = normalize(status, &body);
                prop_assert_eq!(&first, &second);
                prop_assert_eq!(first.status, Some(status));
            }
        }
    }
}
