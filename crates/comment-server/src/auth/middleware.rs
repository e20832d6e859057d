use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, routes::AppState, store::Database};

use super::jwt::verify_access_token;

/// Caller identity resolved from the bearer token. On seller routes `id` is
/// the seller's ID.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

pub async fn auth_middleware<D: Database>(
    State(state): State<AppState<D>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let claims = verify_access_token(token, &state.config.jwt_secret)?;

    if claims.sub.is_empty() {
        return Err(AppError::Unauthorized);
    }

    request.extensions_mut().insert(AuthUser { id: claims.sub });

    Ok(next.run(request).await)
}
