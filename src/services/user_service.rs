// src/services/user_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Role, User},
};

// Administração de usuários (rotas exclusivas de admin)
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list().await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<User, AppError> {
        let deleted = self
            .user_repo
            .delete(id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        tracing::info!(user_id = %deleted.id, "usuário removido");
        Ok(deleted)
    }

    pub async fn change_role(&self, id: Uuid, role: Role) -> Result<User, AppError> {
        let updated = self
            .user_repo
            .update_role(id, role)
            .await?
            .ok_or(AppError::UserNotFound)?;
        tracing::info!(user_id = %updated.id, role = ?updated.role, "papel alterado");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[sqlx::test]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn admin_can_promote_seller(pool: PgPool) {
        let repo = UserRepository::new(pool);
        let seller = repo.create_user("rosa", "$2b$10$hash").await.unwrap();
        assert_eq!(seller.role, Role::Vendedor);

        let service = UserService::new(repo);
        let promoted = service.change_role(seller.id, Role::Admin).await.unwrap();
        assert_eq!(promoted.role, Role::Admin);
        assert_eq!(promoted.access_level, seller.access_level);
    }

    #[sqlx::test]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn duplicate_name_conflicts(pool: PgPool) {
        let repo = UserRepository::new(pool);
        repo.create_user("rosa", "$2b$10$hash").await.unwrap();
        assert!(matches!(
            repo.create_user("rosa", "$2b$10$other").await,
            Err(AppError::UserNameAlreadyExists)
        ));
    }

    #[sqlx::test]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn deleting_missing_user_is_not_found(pool: PgPool) {
        let service = UserService::new(UserRepository::new(pool));
        assert!(matches!(
            service.delete_user(Uuid::new_v4()).await,
            Err(AppError::UserNotFound)
        ));
    }
}
