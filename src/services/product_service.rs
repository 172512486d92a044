// src/services/product_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ProductRepository,
    models::product::{NewProduct, Product},
};

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, AppError> {
        let created = self.repo.create(product).await?;
        tracing::info!(product_id = %created.id, "produto criado");
        Ok(created)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.repo.list().await
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn update_product(&self, id: Uuid, product: &NewProduct) -> Result<Product, AppError> {
        self.repo
            .update(id, product)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<Product, AppError> {
        let deleted = self
            .repo
            .delete(id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        tracing::info!(product_id = %deleted.id, "produto removido");
        Ok(deleted)
    }
}
