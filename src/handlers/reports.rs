// src/handlers/reports.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::report::{SaleDetail, SaleSummary},
};

// GET /api/reportes
#[utoipa::path(
    get,
    path = "/api/reportes",
    tag = "Reportes",
    responses(
        (status = 200, description = "Vendas, mais recentes primeiro", body = Vec<SaleSummary>)
    ),
    security(("api_jwt" = []))
)]
pub async fn sales_summary(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.report_service.sales_summary().await?;
    Ok(Json(rows))
}

// GET /api/reportes/detalle
#[utoipa::path(
    get,
    path = "/api/reportes/detalle",
    tag = "Reportes",
    responses(
        (status = 200, description = "Vendas com os itens e dados do produto", body = Vec<SaleDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn sales_detail(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state.report_service.sales_detail().await?;
    Ok(Json(sales))
}
