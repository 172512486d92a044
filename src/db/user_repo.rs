// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Role, User, DEFAULT_ACCESS_LEVEL},
};

const USER_COLUMNS: &str = "id, name, password_hash, role, access_level, created_at";

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca exata pelo nome (UNIQUE no banco, então no máximo uma linha)
    pub async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    // Cria um novo usuário com o papel padrão 'vendedor'
    pub async fn create_user(&self, name: &str, password_hash: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, password_hash, role, access_level)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(password_hash)
        .bind(Role::Vendedor)
        .bind(DEFAULT_ACCESS_LEVEL)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UserNameAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn update_role(&self, id: Uuid, role: Role) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET role = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Usuários com vendas registradas não podem ser removidos (FK RESTRICT)
    pub async fn delete(&self, id: Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_constraint)
    }
}
