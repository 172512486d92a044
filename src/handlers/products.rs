// src/handlers/products.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::product::{Product, ProductPayload, ProductResponse},
};

// POST /api/productos
#[utoipa::path(
    post,
    path = "/api/productos",
    tag = "Productos",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = ProductResponse),
        (status = 400, description = "Campos ausentes ou negativos"),
        (status = 403, description = "Token ausente, inválido ou papel sem acesso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ProductPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let new_product = payload.into_new_product()?;

    let producto = app_state.product_service.create_product(&new_product).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            message: "Producto creado con éxito".into(),
            producto,
        }),
    ))
}

// GET /api/productos
#[utoipa::path(
    get,
    path = "/api/productos",
    tag = "Productos",
    responses(
        (status = 200, description = "Catálogo completo", body = Vec<Product>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.list_products().await?;
    Ok(Json(products))
}

// GET /api/productos/{id}
#[utoipa::path(
    get,
    path = "/api/productos/{id}",
    tag = "Productos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto", body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.product_service.get_product(id).await?;
    Ok(Json(product))
}

// PUT /api/productos/{id}
#[utoipa::path(
    put,
    path = "/api/productos/{id}",
    tag = "Productos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = ProductResponse),
        (status = 400, description = "Campos ausentes ou negativos"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<ProductPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let product = payload.into_new_product()?;

    let producto = app_state.product_service.update_product(id, &product).await?;

    Ok(Json(ProductResponse {
        message: "Producto actualizado con éxito".into(),
        producto,
    }))
}

// DELETE /api/productos/{id}
#[utoipa::path(
    delete,
    path = "/api/productos/{id}",
    tag = "Productos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto removido", body = ProductResponse),
        (status = 404, description = "Produto não encontrado"),
        (status = 409, description = "Produto referenciado por vendas ou reposições")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let producto = app_state.product_service.delete_product(id).await?;

    Ok(Json(ProductResponse {
        message: "Producto eliminado con éxito".into(),
        producto,
    }))
}
