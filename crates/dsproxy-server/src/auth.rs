//! `AppToken` header check.
//!
//! Callers prove they belong to the integration by echoing its client id in
//! the `AppToken` header. The header is optional unless the server requires
//! it; when present it must match.

use axum::http::HeaderMap;
use subtle::ConstantTimeEq;

use crate::error::ServerError;

/// Header carrying the caller's copy of the client id (matched case-insensitively).
pub const APP_TOKEN_HEADER: &str = "AppToken";

/// Validate the `AppToken` header against the effective client id.
///
/// `client_id` is `None` when neither the request nor the server defaults
/// supply one; that case is left to the missing-field check.
pub fn check_app_token(
    headers: &HeaderMap,
    client_id: Option<&str>,
    required: bool,
) -> Result<(), ServerError> {
    let presented = match headers.get(APP_TOKEN_HEADER) {
        Some(value) => Some(value.to_str().map_err(|_| {
            ServerError::Unauthorized("AppToken header is not valid text".to_string())
        })?),
        None => None,
    };

    match (presented, client_id) {
        (None, _) if required => Err(ServerError::Unauthorized(
            "AppToken header is required".to_string(),
        )),
        (Some(token), Some(expected)) if !constant_time_eq(token, expected) => Err(
            ServerError::Unauthorized("AppToken does not match dsJWTClientId".to_string()),
        ),
        _ => Ok(()),
    }
}

/// Compare two strings in constant time.
fn constant_time_eq(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    if a_bytes.len() == b_bytes.len() {
        a_bytes.ct_eq(b_bytes).into()
    } else {
        // Dummy comparison keeps timing independent of the length mismatch.
        let _ = a_bytes.ct_eq(a_bytes);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue};

    fn headers(token: Option<&str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(t) = token {
            map.insert(
                HeaderName::from_bytes(APP_TOKEN_HEADER.as_bytes()).unwrap(),
                HeaderValue::from_str(t).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_matching_token_passes() {
        assert!(check_app_token(&headers(Some("C1")), Some("C1"), true).is_ok());
    }

    #[test]
    fn test_mismatch_is_unauthorized() {
        let err = check_app_token(&headers(Some("C2")), Some("C1"), false).unwrap_err();
        assert!(matches!(err, ServerError::Unauthorized(_)));
    }

    #[test]
    fn test_absent_header_is_optional_by_default() {
        assert!(check_app_token(&headers(None), Some("C1"), false).is_ok());
        assert!(check_app_token(&headers(None), Some("C1"), true).is_err());
    }

    #[test]
    fn test_unknown_client_id_defers() {
        assert!(check_app_token(&headers(Some("C1")), None, false).is_ok());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "abcd"));
    }
}
