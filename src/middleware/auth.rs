// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState, models::auth::Claims};

// verifyToken: valida o Bearer e pendura as claims na requisição
pub async fn verify_token(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = {
        let token = extract_bearer(request.headers())?;
        app_state.auth_service.validate_token(token)?
    };

    // Insere as claims nos "extensions" da requisição
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AppError::MissingToken)?;

    let token = header
        .to_str()
        .map_err(|_| AppError::InvalidToken)?
        .strip_prefix("Bearer ")
        .ok_or(AppError::InvalidToken)?
        .trim();

    if token.is_empty() {
        return Err(AppError::InvalidToken);
    }
    Ok(token)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn absent_header_is_missing_token() {
        assert!(matches!(
            extract_bearer(&HeaderMap::new()),
            Err(AppError::MissingToken)
        ));
    }

    #[test]
    fn malformed_header_is_invalid_token() {
        for value in ["abc.def.ghi", "Basic dXNlcjpwYXNz", "Bearer ", "Bearer    "] {
            assert!(
                matches!(extract_bearer(&headers(value)), Err(AppError::InvalidToken)),
                "{value}"
            );
        }
    }
}
