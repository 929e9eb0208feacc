//! Bearer credential pre-check
//!
//! Only the presence and shape of `Authorization: Bearer <token>` is checked
//! here. Token signatures are verified by the identity provider in front of
//! the gateway.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::error::AppError;

/// Header carrying the caller's opaque user id, inbound and upstream.
pub const USER_ID_HEADER: &str = "x-user-id";

/// User id forwarded upstream when the caller sent none.
pub const ANONYMOUS: &str = "anonymous";

const BEARER_PREFIX: &str = "Bearer ";

/// Caller identity established at the gateway boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Raw bearer token, never logged
    token: String,
    /// Value of `X-User-ID`, if the caller sent one
    user_id: Option<String>,
}

impl Identity {
    /// User id to forward upstream, `anonymous` when absent.
    pub fn forwarded_user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or(ANONYMOUS)
    }

    /// The explicit user id, required by the profile endpoints.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Rejects requests without a well-formed bearer credential.
pub fn authenticate(headers: &HeaderMap) -> Result<Identity, AppError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    Ok(Identity {
        token: token.to_string(),
        user_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_valid_bearer_with_user_id() {
        let identity =
            authenticate(&headers(&[("authorization", "Bearer abc.def"), ("x-user-id", "user_42")]))
                .unwrap();
        assert_eq!(identity.token(), "abc.def");
        assert_eq!(identity.forwarded_user_id(), "user_42");
        assert_eq!(identity.user_id(), Some("user_42"));
    }

    #[test]
    fn test_missing_user_id_forwards_anonymous() {
        let identity = authenticate(&headers(&[("authorization", "Bearer t")])).unwrap();
        assert_eq!(identity.forwarded_user_id(), "anonymous");
        assert_eq!(identity.user_id(), None);
    }

    #[test]
    fn test_missing_header_rejected() {
        assert!(matches!(authenticate(&HeaderMap::new()), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_wrong_scheme_rejected() {
        let result = authenticate(&headers(&[("authorization", "Basic dXNlcjpwYXNz")]));
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_empty_token_rejected() {
        let result = authenticate(&headers(&[("authorization", "Bearer    ")]));
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
