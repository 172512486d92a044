// src/db/inventory_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::inventory::{NewReplenishment, Replenishment, ReplenishmentEntry},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Produtos removidos aparecem como "Desconocido"
    pub async fn list_with_product_names(&self) -> Result<Vec<ReplenishmentEntry>, AppError> {
        let entries = sqlx::query_as::<_, ReplenishmentEntry>(
            r#"
            SELECT r.id, r.product_id, r.quantity, r.replenishment_date,
                   COALESCE(p.name, 'Desconocido') AS name
            FROM replenishments r
            LEFT JOIN products p ON p.id = r.product_id
            ORDER BY r.replenishment_date DESC, r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    /// Registra a reposição no livro (append-only).
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        replenishment: &NewReplenishment,
    ) -> Result<Replenishment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, Replenishment>(
            r#"
            INSERT INTO replenishments (product_id, quantity, replenishment_date)
            VALUES ($1, $2, $3)
            RETURNING id, product_id, quantity, replenishment_date, created_at
            "#,
        )
        .bind(replenishment.product_id)
        .bind(replenishment.quantity)
        .bind(replenishment.replenishment_date)
        .fetch_one(executor)
        .await?;
        Ok(record)
    }
}
