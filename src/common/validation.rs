// src/common/validation.rs

use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("El valor no puede ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// A coluna é NUMERIC(12, 2): mais casas seriam arredondadas em silêncio
pub fn validate_cents(val: &Decimal) -> Result<(), ValidationError> {
    if val.normalize().scale() > 2 {
        let mut err = ValidationError::new("scale");
        err.add_param("max".into(), &2);
        err.message = Some("El valor admite como máximo dos decimales.".into());
        return Err(err);
    }
    Ok(())
}

/// Monta um `ValidationErrors` com um único campo, mantendo o formato de resposta.
pub fn field_error(field: &'static str, error: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}

pub fn missing(field: &'static str) -> ValidationErrors {
    let mut err = ValidationError::new("required");
    err.message = Some(format!("El campo '{field}' es obligatorio.").into());
    field_error(field, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_negative() {
        assert!(validate_not_negative(&Decimal::ZERO).is_ok());
        assert!(validate_not_negative(&Decimal::new(-0, 2)).is_ok());
        assert!(validate_not_negative(&Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn cents_allow_two_decimals_at_most() {
        assert!(validate_cents(&Decimal::new(1250, 2)).is_ok());
        assert!(validate_cents(&Decimal::new(12500, 3)).is_ok());
        assert!(validate_cents(&Decimal::from(12)).is_ok());
        assert!(validate_cents(&Decimal::new(12345, 3)).is_err());
    }

    #[test]
    fn missing_names_the_field() {
        let errors = missing("price");
        let field = &errors.field_errors()["price"];
        assert_eq!(field[0].code, "required");
    }
}
