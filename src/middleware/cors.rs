use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Restricts browsers to `origin` when configured; otherwise any origin may
/// call the API.
pub fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let permissive = || {
        CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(Any)
    };

    let Some(origin) = origin else {
        return permissive();
    };

    match HeaderValue::from_str(origin) {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
        Err(_) => {
            tracing::warn!(origin, "ignoring unparsable CORS_ORIGIN");
            permissive()
        }
    }
}
