// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{error::AppError, validation::missing};

// Registro de reposição (append-only)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Replenishment {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub replenishment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

// Linha da listagem, já com o nome do produto
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplenishmentEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub replenishment_date: NaiveDate,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplenishmentPayload {
    #[validate(required(message = "El campo 'productId' es obligatorio."))]
    pub product_id: Option<Uuid>,

    #[validate(
        required(message = "El campo 'quantity' es obligatorio."),
        range(min = 1, message = "La cantidad debe ser mayor que cero.")
    )]
    pub quantity: Option<i32>,

    // Formato YYYY-MM-DD
    #[validate(required(message = "El campo 'replenishmentDate' es obligatorio."))]
    pub replenishment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReplenishment {
    pub product_id: Uuid,
    pub quantity: i32,
    pub replenishment_date: NaiveDate,
}

impl ReplenishmentPayload {
    pub fn into_new_replenishment(self) -> Result<NewReplenishment, AppError> {
        self.validate()?;

        Ok(NewReplenishment {
            product_id: self.product_id.ok_or_else(|| missing("productId"))?,
            quantity: self.quantity.ok_or_else(|| missing("quantity"))?,
            replenishment_date: self
                .replenishment_date
                .ok_or_else(|| missing("replenishmentDate"))?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplenishmentResponse {
    pub message: String,
    pub inventario: Replenishment,
    pub new_stock: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_and_quantity() {
        let product = Uuid::new_v4();
        let payload: ReplenishmentPayload = serde_json::from_str(&format!(
            r#"{{"productId":"{product}","quantity":5,"replenishmentDate":"2025-03-14"}}"#
        ))
        .unwrap();

        let replenishment = payload.into_new_replenishment().unwrap();
        assert_eq!(replenishment.quantity, 5);
        assert_eq!(
            replenishment.replenishment_date,
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
    }

    #[test]
    fn missing_date_is_rejected() {
        let product = Uuid::new_v4();
        let payload: ReplenishmentPayload =
            serde_json::from_str(&format!(r#"{{"productId":"{product}","quantity":5}}"#)).unwrap();
        assert!(matches!(
            payload.into_new_replenishment(),
            Err(AppError::ValidationError(_))
        ));
    }
}
