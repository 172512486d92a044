// src/models/sale.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{error::AppError, validation::missing};

// Cabeçalho da venda
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub total: Decimal,
}

// Item da venda (detalle)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub subtotal: Decimal,
}

// `Serialize` é exigido pelo `length` do validator no payload da venda
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPayload {
    #[validate(required(message = "El campo 'productId' es obligatorio."))]
    pub product_id: Option<Uuid>,

    #[validate(
        required(message = "El campo 'quantity' es obligatorio."),
        range(min = 1, message = "La cantidad debe ser mayor que cero.")
    )]
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordSalePayload {
    #[validate(required(message = "El campo 'userId' es obligatorio."))]
    pub user_id: Option<Uuid>,

    #[validate(
        required(message = "El campo 'lineItems' es obligatorio."),
        length(min = 1, message = "La venta debe tener al menos un producto."),
        nested
    )]
    pub line_items: Option<Vec<LineItemPayload>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Pedido de venda já validado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRequest {
    pub user_id: Uuid,
    pub line_items: Vec<LineItem>,
}

impl RecordSalePayload {
    pub fn into_sale_request(self) -> Result<SaleRequest, AppError> {
        self.validate()?;

        let user_id = self.user_id.ok_or_else(|| missing("userId"))?;
        let line_items = self
            .line_items
            .ok_or_else(|| missing("lineItems"))?
            .into_iter()
            .map(|line| -> Result<LineItem, AppError> {
                Ok(LineItem {
                    product_id: line.product_id.ok_or_else(|| missing("productId"))?,
                    quantity: line.quantity.ok_or_else(|| missing("quantity"))?,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(SaleRequest { user_id, line_items })
    }
}

/// Item de venda com o preço lido sob lock, usado no cálculo do total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl PricedLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

pub fn sale_total(lines: &[PricedLine]) -> Decimal {
    lines.iter().map(PricedLine::subtotal).sum()
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordSaleResponse {
    pub message: String,
    pub sale_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RecordSalePayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_line_items_are_rejected() {
        let user = Uuid::new_v4();
        let err = parse(&format!(r#"{{"userId":"{user}","lineItems":[]}}"#))
            .into_sale_request()
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn missing_user_is_rejected() {
        let product = Uuid::new_v4();
        let err = parse(&format!(
            r#"{{"lineItems":[{{"productId":"{product}","quantity":1}}]}}"#
        ))
        .into_sale_request()
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn zero_quantity_is_rejected_as_out_of_range() {
        let (user, product) = (Uuid::new_v4(), Uuid::new_v4());
        let payload = parse(&format!(
            r#"{{"userId":"{user}","lineItems":[{{"productId":"{product}","quantity":0}}]}}"#
        ));
        assert!(payload.validate().is_err());
    }

    #[test]
    fn valid_payload_becomes_request() {
        let (user, product) = (Uuid::new_v4(), Uuid::new_v4());
        let request = parse(&format!(
            r#"{{"userId":"{user}","lineItems":[{{"productId":"{product}","quantity":2}}]}}"#
        ))
        .into_sale_request()
        .unwrap();

        assert_eq!(request.user_id, user);
        assert_eq!(
            request.line_items,
            vec![LineItem { product_id: product, quantity: 2 }]
        );
    }

    #[test]
    fn total_is_sum_of_subtotals() {
        let lines = [
            PricedLine { product_id: Uuid::new_v4(), quantity: 2, unit_price: Decimal::from(10) },
            PricedLine { product_id: Uuid::new_v4(), quantity: 3, unit_price: Decimal::new(250, 2) },
        ];
        assert_eq!(lines[0].subtotal(), Decimal::from(20));
        assert_eq!(lines[1].subtotal(), Decimal::new(750, 2));
        assert_eq!(sale_total(&lines), Decimal::new(2750, 2));
        assert_eq!(sale_total(&[]), Decimal::ZERO);
    }
}
