use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Extractor guarding a route: the request must carry the configured token as
/// a bearer header or a `?token=` query parameter.
pub struct Authenticated;

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts.headers.typed_get::<Authorization<Bearer>>();
        let query_token = Query::<TokenQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.token);
        verify_token(&state.settings.auth_token, header, query_token.as_deref())?;
        Ok(Authenticated)
    }
}

/// The header wins over the query parameter when both are present.
pub fn verify_token(
    expected: &str,
    auth: Option<Authorization<Bearer>>,
    query_token: Option<&str>,
) -> Result<(), ApiError> {
    let provided = auth
        .as_ref()
        .map(|a| a.token())
        .or(query_token);
    match provided {
        Some(token) if token == expected => Ok(()),
        _ => Err(ApiError::Unauthorized(
            "Invalid authentication token".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_token_header() {
        let auth = Authorization::bearer("secret").unwrap();
        assert!(verify_token("secret", Some(auth), None).is_ok());
        let wrong = Authorization::bearer("nope").unwrap();
        assert!(verify_token("secret", Some(wrong), Some("secret")).is_err());
    }

    #[test]
    fn test_verify_token_query() {
        assert!(verify_token("secret", None, Some("secret")).is_ok());
        assert!(verify_token("secret", None, Some("bad")).is_err());
        assert!(verify_token("secret", None, None).is_err());
    }
}
