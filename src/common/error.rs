use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    // Corpo JSON ou parâmetro de rota que nem chegou a ser desserializado
    #[error("Requisição malformada: {0}")]
    MalformedRequest(String),

    #[error("Nome de usuário já existe")]
    UserNameAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token ausente")]
    MissingToken,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Papel sem permissão")]
    Forbidden,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Estoque insuficiente para o produto {product_id}")]
    InsufficientStock {
        product_id: uuid::Uuid,
        available: i32,
        requested: i32,
    },

    #[error("Estoque resultante excede o limite")]
    StockOverflow,

    #[error("Registro referenciado por outras tabelas")]
    ReferencedRecord,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::MalformedRequest(rejection.body_text())
    }
}

impl AppError {
    /// Converte violações de FK/UNIQUE do Postgres nas variantes de domínio.
    pub fn from_constraint(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_foreign_key_violation() {
                return AppError::ReferencedRecord;
            }
        }
        e.into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = BTreeMap::new();
                collect_messages("", &errors, &mut details);
                let body = Json(json!({
                    "error": "Todos los campos son obligatorios y deben ser válidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::MalformedRequest(reason) => {
                let body = Json(json!({
                    "error": "Solicitud malformada.",
                    "details": reason,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InsufficientStock { product_id, available, requested } => {
                let body = Json(json!({
                    "error": "Stock insuficiente.",
                    "details": {
                        "productId": product_id,
                        "available": available,
                        "requested": requested,
                    },
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::UserNameAlreadyExists => (StatusCode::CONFLICT, "El nombre de usuario ya está en uso."),
            // Mesma mensagem para usuário inexistente e senha errada
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Nombre o contraseña incorrectos."),
            AppError::MissingToken => (StatusCode::FORBIDDEN, "Acceso denegado, token requerido."),
            AppError::InvalidToken => (StatusCode::FORBIDDEN, "Token inválido o expirado."),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Acceso denegado, rol no autorizado."),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuario no encontrado."),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, "Producto no encontrado."),
            AppError::StockOverflow => (
                StatusCode::CONFLICT,
                "El stock resultante excede el máximo permitido.",
            ),
            AppError::ReferencedRecord => (
                StatusCode::CONFLICT,
                "El registro está referenciado por otros datos.",
            ),

            // Todos os outros erros (DatabaseError, InternalServerError, ...) viram 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Error en el servidor.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

// Achata os erros aninhados em chaves como `lineItems[0].quantity`
fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut BTreeMap<String, Vec<String>>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            camel_case(field)
        } else {
            format!("{prefix}.{}", camel_case(field))
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(m) => m.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                out.insert(path, messages);
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}

// Os campos chegam com o nome Rust; a API expõe camelCase
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn credentials_error_is_401_with_error_key() {
        let response = AppError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Nombre o contraseña incorrectos.");
    }

    #[tokio::test]
    async fn token_errors_are_403() {
        for err in [AppError::MissingToken, AppError::InvalidToken, AppError::Forbidden] {
            assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
        }
    }

    #[tokio::test]
    async fn database_errors_hide_details() {
        let response = AppError::DatabaseError(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Error en el servidor.");
    }

    #[tokio::test]
    async fn insufficient_stock_reports_quantities() {
        let product_id = uuid::Uuid::new_v4();
        let response = AppError::InsufficientStock {
            product_id,
            available: 1,
            requested: 3,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["details"]["available"], 1);
        assert_eq!(body["details"]["requested"], 3);
    }

    #[tokio::test]
    async fn stock_overflow_is_409() {
        let response = AppError::StockOverflow.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn nested_line_errors_are_reported_by_position() {
        let payload: crate::models::sale::RecordSalePayload = serde_json::from_value(json!({
            "userId": uuid::Uuid::new_v4(),
            "lineItems": [
                { "productId": uuid::Uuid::new_v4(), "quantity": 2 },
                { "productId": uuid::Uuid::new_v4(), "quantity": 0 },
            ],
        }))
        .unwrap();
        let response = payload.into_sale_request().unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(
            body["details"]["lineItems[1].quantity"][0],
            "La cantidad debe ser mayor que cero."
        );
        assert!(body["details"].get("lineItems[0].quantity").is_none());
    }

    #[test]
    fn field_names_are_camel_cased() {
        assert_eq!(camel_case("line_items"), "lineItems");
        assert_eq!(camel_case("userId"), "userId");
        assert_eq!(camel_case("price"), "price");
    }
}
