// src/middleware/rbac.rs

use axum::{extract::State, middleware::Next, response::Response};

use crate::{
    common::error::AppError,
    models::auth::{Claims, Role},
};

/// Conjunto de papéis aceitos por um grupo de rotas.
#[derive(Debug, Clone, Copy)]
pub struct AllowedRoles(pub &'static [Role]);

pub const ADMIN_ONLY: AllowedRoles = AllowedRoles(&[Role::Admin]);
pub const STAFF: AllowedRoles = AllowedRoles(&[Role::Admin, Role::Vendedor]);

impl AllowedRoles {
    pub fn permits(&self, role: Role) -> bool {
        self.0.contains(&role)
    }
}

// requireRole: roda depois do verify_token, que já deixou as claims
pub async fn require_role(
    State(allowed): State<AllowedRoles>,
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let role = request
        .extensions()
        .get::<Claims>()
        .map(|claims| claims.role)
        .ok_or(AppError::MissingToken)?;

    if !allowed.permits(role) {
        tracing::warn!(?role, "acesso negado pelo papel");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_only_rejects_seller() {
        assert!(ADMIN_ONLY.permits(Role::Admin));
        assert!(!ADMIN_ONLY.permits(Role::Vendedor));
    }

    #[test]
    fn staff_accepts_both_roles() {
        assert!(STAFF.permits(Role::Admin));
        assert!(STAFF.permits(Role::Vendedor));
    }
}
