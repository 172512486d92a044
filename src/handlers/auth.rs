// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{CredentialsPayload, LoginResponse, MessageResponse},
};

// POST /api/register
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Auth",
    request_body = CredentialsPayload,
    responses(
        (status = 201, description = "Usuario registrado", body = MessageResponse),
        (status = 400, description = "Campos ausentes ou vazios"),
        (status = 409, description = "Nome já em uso")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CredentialsPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let (name, password) = payload.into_credentials()?;

    app_state.auth_service.register_user(&name, &password).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Usuario registrado con éxito".into(),
        }),
    ))
}

// POST /api/login
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = CredentialsPayload,
    responses(
        (status = 200, description = "Token emitido", body = LoginResponse),
        (status = 400, description = "Campos ausentes ou vazios"),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CredentialsPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let (name, password) = payload.into_credentials()?;

    let token = app_state.auth_service.login_user(&name, &password).await?;

    Ok(Json(LoginResponse {
        message: "Inicio de sesión exitoso".into(),
        token,
    }))
}
