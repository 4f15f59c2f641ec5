// Auth middleware - verifies the token cookie and injects the decoded
// Principal into request extensions for handlers

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use super::token::{token_from_cookie_header, verify_token, Principal};
use crate::app_state::AppState;
use crate::error::{AppError, AppResult};

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = extract_principal(request.headers(), &state.config.auth.jwt_secret)?;
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

fn extract_principal(headers: &HeaderMap, secret: &str) -> AppResult<Principal> {
    let cookie_header = headers
        .get(header::COOKIE)
        .ok_or_else(|| AppError::Unauthorized("Missing auth token".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Malformed cookie header".to_string()))?;

    let token = token_from_cookie_header(cookie_header)
        .ok_or_else(|| AppError::Unauthorized("Missing auth token".to_string()))?;

    let claims = verify_token(token, secret)?;

    Ok(Principal {
        id: claims.sub,
        role: claims.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::{issue_token, Role};
    use axum::http::HeaderValue;

    #[test]
    fn extracts_principal_from_cookie() {
        let token = issue_token(9, Role::Company, "s3cret", 600).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("token={}", token)).unwrap(),
        );

        let principal = extract_principal(&headers, "s3cret").unwrap();
        assert_eq!(principal.id, 9);
        assert_eq!(principal.role, Role::Company);
    }

    #[test]
    fn missing_cookie_is_unauthorized() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_principal(&headers, "s3cret"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
