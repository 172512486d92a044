// src/models/report.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// GET /reportes
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    pub date: DateTime<Utc>,
    pub total: Decimal,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct ProductRef {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetailLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub subtotal: Decimal,
    pub product: ProductRef,
}

// GET /reportes/detalle
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub total: Decimal,
    pub user_id: Uuid,
    pub line_items: Vec<SaleDetailLine>,
}

// Linha "achatada" do JOIN sale_items x products
#[derive(Debug, Clone, FromRow)]
pub struct SaleLineRow {
    pub sale_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub subtotal: Decimal,
    pub product_name: String,
    pub product_price: Decimal,
}

impl From<SaleLineRow> for SaleDetailLine {
    fn from(row: SaleLineRow) -> Self {
        Self {
            product_id: row.product_id,
            quantity: row.quantity,
            subtotal: row.subtotal,
            product: ProductRef {
                name: row.product_name,
                price: row.product_price,
            },
        }
    }
}
