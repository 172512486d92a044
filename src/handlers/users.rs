// src/handlers/users.rs

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{UpdateRolePayload, User, UserResponse},
};

// GET /api/usuarios
#[utoipa::path(
    get,
    path = "/api/usuarios",
    tag = "Usuarios",
    responses(
        (status = 200, description = "Todos os usuários", body = Vec<User>),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_service.list_users().await?;
    Ok(Json(users))
}

// GET /api/usuarios/{id}
#[utoipa::path(
    get,
    path = "/api/usuarios/{id}",
    tag = "Usuarios",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário", body = User),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.user_service.get_user(id).await?;
    Ok(Json(user))
}

// DELETE /api/usuarios/{id}
#[utoipa::path(
    delete,
    path = "/api/usuarios/{id}",
    tag = "Usuarios",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário removido", body = UserResponse),
        (status = 404, description = "Usuário não encontrado"),
        (status = 409, description = "Usuário possui vendas")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let usuario = app_state.user_service.delete_user(id).await?;

    Ok(Json(UserResponse {
        message: "Usuario eliminado con éxito".into(),
        usuario,
    }))
}

// PATCH /api/usuarios/{id}
#[utoipa::path(
    patch,
    path = "/api/usuarios/{id}",
    tag = "Usuarios",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = UpdateRolePayload,
    responses(
        (status = 200, description = "Papel atualizado", body = UserResponse),
        (status = 400, description = "Papel inválido"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user_role(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateRolePayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let usuario = app_state.user_service.change_role(id, payload.role).await?;

    Ok(Json(UserResponse {
        message: "Rol actualizado con éxito".into(),
        usuario,
    }))
}
