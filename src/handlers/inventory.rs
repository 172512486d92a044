// src/handlers/inventory.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::AppError,
    config::AppState,
    models::inventory::{ReplenishmentEntry, ReplenishmentPayload, ReplenishmentResponse},
};

// GET /api/inventarios
#[utoipa::path(
    get,
    path = "/api/inventarios",
    tag = "Inventarios",
    responses(
        (status = 200, description = "Reposições com o nome do produto", body = Vec<ReplenishmentEntry>),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_replenishments(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.inventory_service.list_replenishments().await?;
    Ok(Json(entries))
}

// POST /api/inventarios
#[utoipa::path(
    post,
    path = "/api/inventarios",
    tag = "Inventarios",
    request_body = ReplenishmentPayload,
    responses(
        (status = 201, description = "Reposição registrada", body = ReplenishmentResponse),
        (status = 400, description = "Campos ausentes"),
        (status = 403, description = "Apenas admin"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn record_replenishment(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ReplenishmentPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let replenishment = payload.into_new_replenishment()?;

    let (inventario, new_stock) = app_state
        .inventory_service
        .record_replenishment(&replenishment)
        .await?;

    // Retorna o novo saldo para o frontend atualizar a tela
    Ok((
        StatusCode::CREATED,
        Json(ReplenishmentResponse {
            message: "Reposición de inventario registrada".into(),
            inventario,
            new_stock,
        }),
    ))
}
