use std::sync::Arc;

use auth::AuthError;
use auth::Authenticator;
use auth::Principal;
use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;

/// Header carrying the session token on gated requests
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub principal: Principal,
}

/// Resolve the caller from the session token header.
///
/// # Errors
/// * `Missing` - No token header, or an empty one
/// * `Malformed` - Header is not text, the token cannot be read, or its
///   subject is not a user id
/// * `InvalidSignature` - Token was not signed with our secret
/// * `Expired` - Token lifetime is over
pub fn resolve_user(
    headers: &HeaderMap,
    authenticator: &Authenticator,
) -> Result<AuthenticatedUser, AuthError> {
    let token = headers
        .get(AUTH_TOKEN_HEADER)
        .ok_or(AuthError::Missing)?
        .to_str()
        .map_err(|_| AuthError::Malformed)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::Missing);
    }

    let principal = authenticator.validate_token(token)?;
    let user_id = UserId::from_string(principal.as_str()).map_err(|_| AuthError::Malformed)?;

    Ok(AuthenticatedUser { user_id, principal })
}

/// Middleware that rejects requests without a valid session token and adds
/// the caller to request extensions.
///
/// Rejected requests never reach the handler. Every rejection gets the same
/// response; the reason is only logged.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let caller = resolve_user(req.headers(), &authenticator).map_err(|e| {
        tracing::warn!(
            reason = ?e,
            method = %req.method(),
            path = %req.uri().path(),
            "Request rejected by auth gate"
        );
        ApiError::Unauthorized("Unauthorized".to_string())
    })?;

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::atomic::Ordering;

    use auth::TokenIssuer;
    use axum::body::Body;
    use axum::http::Request;
    use axum::http::StatusCode;
    use axum::middleware;
    use axum::routing::get;
    use axum::Extension;
    use axum::Router;
    use chrono::Duration;
    use tower::ServiceExt;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET, Duration::seconds(3600)).unwrap())
    }

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_TOKEN_HEADER, token.parse().unwrap());
        headers
    }

    /// Router with one gated route whose handler records that it ran.
    fn gated_app(authenticator: Arc<Authenticator>, reached: Arc<AtomicBool>) -> Router {
        let handler = move |Extension(caller): Extension<AuthenticatedUser>| {
            let reached = Arc::clone(&reached);
            async move {
                reached.store(true, Ordering::SeqCst);
                caller.user_id.to_string()
            }
        };

        Router::new().route(
            "/gated",
            get(handler).route_layer(middleware::from_fn_with_state(authenticator, authenticate)),
        )
    }

    fn request(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/gated");
        if let Some(token) = token {
            builder = builder.header(AUTH_TOKEN_HEADER, token);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_resolve_user() {
        let authenticator = authenticator();
        let user_id = UserId::new();
        let token = authenticator
            .issue_token(&Principal::new(user_id))
            .unwrap();

        let caller = resolve_user(&headers_with(&token), &authenticator).unwrap();

        assert_eq!(caller.user_id, user_id);
        assert_eq!(caller.principal.as_str(), user_id.to_string());
    }

    #[test]
    fn test_resolve_user_missing_header() {
        let authenticator = authenticator();

        assert_eq!(
            resolve_user(&HeaderMap::new(), &authenticator).unwrap_err(),
            AuthError::Missing
        );
        assert_eq!(
            resolve_user(&headers_with(" "), &authenticator).unwrap_err(),
            AuthError::Missing
        );
    }

    #[test]
    fn test_resolve_user_rejects_bad_tokens() {
        let authenticator = authenticator();

        assert_eq!(
            resolve_user(&headers_with("not-a-token"), &authenticator).unwrap_err(),
            AuthError::Malformed
        );

        let foreign = TokenIssuer::new(b"another_secret_key_of_32_bytes!!!")
            .issue(&Principal::new(UserId::new()), Duration::seconds(3600))
            .unwrap();
        assert_eq!(
            resolve_user(&headers_with(&foreign), &authenticator).unwrap_err(),
            AuthError::InvalidSignature
        );

        let expired = TokenIssuer::new(SECRET)
            .issue_at(&Principal::new(UserId::new()), Duration::seconds(60), 1_000)
            .unwrap();
        assert_eq!(
            resolve_user(&headers_with(&expired), &authenticator).unwrap_err(),
            AuthError::Expired
        );

        let not_a_user = authenticator
            .issue_token(&Principal::new("u1"))
            .unwrap();
        assert_eq!(
            resolve_user(&headers_with(&not_a_user), &authenticator).unwrap_err(),
            AuthError::Malformed
        );
    }

    #[tokio::test]
    async fn test_gate_blocks_handler_without_token() {
        let reached = Arc::new(AtomicBool::new(false));
        let app = gated_app(authenticator(), Arc::clone(&reached));

        let response = app.oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!reached.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_gate_blocks_handler_with_invalid_token() {
        let reached = Arc::new(AtomicBool::new(false));
        let app = gated_app(authenticator(), Arc::clone(&reached));

        let response = app.oneshot(request(Some("a.b.c"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!reached.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_gate_passes_caller_to_handler() {
        let authenticator = authenticator();
        let reached = Arc::new(AtomicBool::new(false));
        let app = gated_app(Arc::clone(&authenticator), Arc::clone(&reached));
        let user_id = UserId::new();
        let token = authenticator
            .issue_token(&Principal::new(user_id))
            .unwrap();

        let response = app.oneshot(request(Some(&token))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(reached.load(Ordering::SeqCst));
    }
}
