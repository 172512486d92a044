// src/models/product.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{
    error::AppError,
    validation::{field_error, missing, validate_cents, validate_not_negative},
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub price: Decimal,
    pub stock: i32,
}

// Payload de criação e de atualização (PUT substitui os quatro campos).
// Zero é um valor válido para preço e estoque; apenas a ausência é erro.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(
        required(message = "El campo 'name' es obligatorio."),
        length(min = 1, message = "El nombre no puede estar vacío.")
    )]
    pub name: Option<String>,

    #[serde(rename = "type")]
    #[validate(
        required(message = "El campo 'type' es obligatorio."),
        length(min = 1, message = "El tipo no puede estar vacío.")
    )]
    pub product_type: Option<String>,

    #[validate(required(message = "El campo 'price' es obligatorio."))]
    pub price: Option<Decimal>,

    #[validate(
        required(message = "El campo 'stock' es obligatorio."),
        range(min = 0, message = "El stock no puede ser negativo.")
    )]
    pub stock: Option<i32>,
}

/// Produto já validado, pronto para o repositório.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub product_type: String,
    pub price: Decimal,
    pub stock: i32,
}

impl ProductPayload {
    pub fn into_new_product(self) -> Result<NewProduct, AppError> {
        self.validate()?;

        let name = self.name.ok_or_else(|| missing("name"))?;
        let product_type = self.product_type.ok_or_else(|| missing("type"))?;
        let price = self.price.ok_or_else(|| missing("price"))?;
        let stock = self.stock.ok_or_else(|| missing("stock"))?;

        validate_not_negative(&price).map_err(|e| field_error("price", e))?;
        validate_cents(&price).map_err(|e| field_error("price", e))?;

        Ok(NewProduct { name, product_type, price, stock })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub message: String,
    pub producto: Product,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ProductPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn zero_price_and_stock_are_accepted() {
        let product = parse(r#"{"name":"Paleta","type":"agua","price":0,"stock":0}"#)
            .into_new_product()
            .unwrap();
        assert_eq!(product.price, Decimal::ZERO);
        assert_eq!(product.stock, 0);
    }

    #[test]
    fn missing_field_is_a_validation_error() {
        let err = parse(r#"{"name":"Paleta","type":"agua","price":12.5}"#)
            .into_new_product()
            .unwrap_err();
        match err {
            AppError::ValidationError(errors) => {
                assert!(errors.field_errors().contains_key("stock"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_values_are_rejected() {
        let err = parse(r#"{"name":"Paleta","type":"agua","price":-1,"stock":3}"#)
            .into_new_product()
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = parse(r#"{"name":"Paleta","type":"agua","price":1,"stock":-3}"#)
            .into_new_product()
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn price_with_more_than_two_decimals_is_rejected() {
        let err = parse(r#"{"name":"Paleta","type":"agua","price":12.345,"stock":3}"#)
            .into_new_product()
            .unwrap_err();
        match err {
            AppError::ValidationError(errors) => {
                assert!(errors.field_errors().contains_key("price"))
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let product = parse(r#"{"name":"Paleta","type":"agua","price":12.35,"stock":3}"#)
            .into_new_product()
            .unwrap();
        assert_eq!(product.price, Decimal::new(1235, 2));
    }

    #[test]
    fn product_serializes_type_field() {
        let product = Product {
            id: Uuid::nil(),
            name: "Cono".into(),
            product_type: "crema".into(),
            price: Decimal::new(1050, 2),
            stock: 4,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["type"], "crema");
        assert_eq!(json["stock"], 4);
    }
}
