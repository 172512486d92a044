// src/services/inventory_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, ProductRepository},
    models::inventory::{NewReplenishment, Replenishment, ReplenishmentEntry},
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    product_repo: ProductRepository,
    pool: PgPool,
}

impl InventoryService {
    pub fn new(
        inventory_repo: InventoryRepository,
        product_repo: ProductRepository,
        pool: PgPool,
    ) -> Self {
        Self { inventory_repo, product_repo, pool }
    }

    pub async fn list_replenishments(&self) -> Result<Vec<ReplenishmentEntry>, AppError> {
        self.inventory_repo.list_with_product_names().await
    }

    // --- REPOSIÇÃO (ENTRADA) ---
    // Retorna o registro gravado e o novo saldo do produto.
    pub async fn record_replenishment(
        &self,
        replenishment: &NewReplenishment,
    ) -> Result<(Replenishment, i32), AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Trava o produto
        self.product_repo
            .find_for_update(&mut *tx, replenishment.product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        // 2. Grava histórico
        let record = self.inventory_repo.insert(&mut *tx, replenishment).await?;

        // 3. Incremento atômico do saldo
        let new_stock = self
            .product_repo
            .adjust_stock(&mut *tx, replenishment.product_id, replenishment.quantity)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        tx.commit().await?;

        tracing::info!(
            product_id = %replenishment.product_id,
            quantity = replenishment.quantity,
            new_stock,
            "estoque reposto"
        );
        Ok((record, new_stock))
    }
}
