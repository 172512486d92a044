// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{error::AppError, validation::missing};

/// Nível de acesso atribuído a todo usuário recém-registrado.
pub const DEFAULT_ACCESS_LEVEL: i32 = 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum Role {
    Admin,
    Vendedor,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub role: Role,
    pub access_level: i32,
    pub created_at: DateTime<Utc>,
}

// Corpo de /register e /login.
// Campos como Option: ausência vira 400 do validator, não 422 do serde
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CredentialsPayload {
    #[validate(
        required(message = "El campo 'name' es obligatorio."),
        length(min = 1, message = "El nombre no puede estar vacío.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "El campo 'password' es obligatorio."),
        length(min = 1, message = "La contraseña no puede estar vacía.")
    )]
    pub password: Option<String>,
}

impl CredentialsPayload {
    /// Valida e devolve `(name, password)`.
    pub fn into_credentials(self) -> Result<(String, String), AppError> {
        self.validate()?;
        let name = self.name.ok_or_else(|| missing("name"))?;
        let password = self.password.ok_or_else(|| missing("password"))?;
        Ok((name, password))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// Resposta de login com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub access_level: i32,
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

// PATCH /usuarios/{id}
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRolePayload {
    #[serde(alias = "rol")]
    pub role: Role,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub message: String,
    pub usuario: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_both_fields() {
        let payload: CredentialsPayload = serde_json::from_str(r#"{"name":"ana"}"#).unwrap();
        match payload.into_credentials() {
            Err(AppError::ValidationError(errors)) => {
                assert!(errors.field_errors().contains_key("password"))
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let payload: CredentialsPayload =
            serde_json::from_str(r#"{"name":"","password":"x"}"#).unwrap();
        assert!(matches!(payload.into_credentials(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn credentials_are_returned_in_order() {
        let payload: CredentialsPayload =
            serde_json::from_str(r#"{"name":"ana","password":"fresa"}"#).unwrap();
        assert_eq!(
            payload.into_credentials().unwrap(),
            ("ana".to_string(), "fresa".to_string())
        );
    }

    #[test]
    fn role_patch_accepts_spanish_field_name() {
        let payload: UpdateRolePayload = serde_json::from_str(r#"{"rol":"admin"}"#).unwrap();
        assert_eq!(payload.role, Role::Admin);
    }

    #[test]
    fn user_serialization_hides_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "ana".into(),
            password_hash: "$2b$10$secret".into(),
            role: Role::Vendedor,
            access_level: DEFAULT_ACCESS_LEVEL,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["role"], "vendedor");
        assert_eq!(json["accessLevel"], 1);
    }
}
