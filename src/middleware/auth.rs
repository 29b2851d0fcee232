use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::Error;

/// Claims issued by the identity provider. `sub` is the user's UUID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

const SCHEMES: [&str; 2] = ["Bearer ", "JWT "];

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
}

/// `Ok(None)` when no Authorization header is present. The error is the code
/// sent back to the client.
pub fn claims_from_headers(
    headers: &HeaderMap,
    secret: &str,
) -> Result<Option<Claims>, &'static str> {
    let Some(auth_header) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err("bad_authorization");
    };
    let Some(token) = SCHEMES
        .iter()
        .find_map(|scheme| auth_str.strip_prefix(scheme))
    else {
        return Err("unsupported_scheme");
    };

    match decode_token(token.trim(), secret) {
        Ok(claims) => Ok(Some(claims)),
        Err(e) => {
            tracing::debug!(error = %e, "rejected bearer token");
            Err("invalid_token")
        }
    }
}

/// Attaches decoded [`Claims`] to the request when a token is sent. Requests
/// without one pass through as anonymous; a bad token is a 401.
pub async fn authenticate(mut req: Request, next: Next) -> Response {
    let config = crate::config::get_config();
    match claims_from_headers(req.headers(), &config.jwt_secret) {
        Ok(Some(claims)) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Ok(None) => next.run(req).await,
        Err(code) => (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response(),
    }
}

/// The authenticated caller. Extracting it fails with 401 for anonymous
/// requests; use `Option<AuthUser>` where a viewer is optional.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl TryFrom<Claims> for AuthUser {
    type Error = Error;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| Error::Unauthorized("invalid_subject".to_string()))?;
        Ok(Self {
            id,
            first_name: claims.first_name,
            last_name: claims.last_name,
            email: claims.email,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| Error::Unauthorized("missing_authorization".to_string()))?;
        AuthUser::try_from(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test_secret_key";

    fn token(sub: &str, exp_offset: i64, secret: &str) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (chrono::Utc::now().timestamp() + exp_offset) as usize,
            first_name: Some("Grace".into()),
            last_name: Some("Hopper".into()),
            email: None,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_anonymous() {
        assert!(matches!(claims_from_headers(&HeaderMap::new(), SECRET), Ok(None)));
    }

    #[test]
    fn bearer_and_jwt_schemes_are_accepted() {
        let user_id = Uuid::new_v4();
        let t = token(&user_id.to_string(), 3600, SECRET);

        for scheme in ["Bearer", "JWT"] {
            let claims = claims_from_headers(&headers(&format!("{} {}", scheme, t)), SECRET)
                .unwrap()
                .unwrap();
            let user = AuthUser::try_from(claims).unwrap();
            assert_eq!(user.id, user_id);
            assert_eq!(user.first_name.as_deref(), Some("Grace"));
        }
    }

    #[test]
    fn other_schemes_are_rejected() {
        let t = token(&Uuid::new_v4().to_string(), 3600, SECRET);
        let err = claims_from_headers(&headers(&format!("Basic {}", t)), SECRET).unwrap_err();
        assert_eq!(err, "unsupported_scheme");
    }

    #[test]
    fn expired_or_foreign_tokens_are_invalid() {
        let sub = Uuid::new_v4().to_string();
        let expired = token(&sub, -3600, SECRET);
        assert_eq!(
            claims_from_headers(&headers(&format!("Bearer {}", expired)), SECRET).unwrap_err(),
            "invalid_token"
        );

        let foreign = token(&sub, 3600, "another_secret");
        assert_eq!(
            claims_from_headers(&headers(&format!("Bearer {}", foreign)), SECRET).unwrap_err(),
            "invalid_token"
        );
    }

    #[test]
    fn non_uuid_subject_is_unauthorized() {
        let claims = decode_token(&token("42", 3600, SECRET), SECRET).unwrap();
        assert!(matches!(AuthUser::try_from(claims), Err(Error::Unauthorized(_))));
    }
}
