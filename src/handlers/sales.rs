// src/handlers/sales.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::sale::{RecordSalePayload, RecordSaleResponse},
};

// POST /api/ventas
#[utoipa::path(
    post,
    path = "/api/ventas",
    tag = "Ventas",
    request_body = RecordSalePayload,
    responses(
        (status = 201, description = "Venda registrada", body = RecordSaleResponse),
        (status = 400, description = "Usuário ou itens ausentes"),
        (status = 404, description = "Produto ou usuário inexistente"),
        (status = 409, description = "Estoque insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn record_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<RecordSalePayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let request = payload.into_sale_request()?;

    tracing::debug!(
        recorded_by = %claims.id,
        user_id = %request.user_id,
        lines = request.line_items.len(),
        "registrando venda"
    );

    let (sale, _items) = app_state.sale_service.record_sale(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecordSaleResponse {
            message: "Venta registrada con éxito".into(),
            sale_id: sale.id,
        }),
    ))
}
