// src/db/product_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::product::{NewProduct, Product},
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura e CRUD simples (pool principal)
    // ---

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, product_type, price, stock FROM products ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, product_type, price, stock FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn create(&self, product: &NewProduct) -> Result<Product, AppError> {
        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, product_type, price, stock)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, product_type, price, stock
            "#,
        )
        .bind(&product.name)
        .bind(&product.product_type)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    // Substitui os quatro campos (PUT)
    pub async fn update(&self, id: Uuid, product: &NewProduct) -> Result<Option<Product>, AppError> {
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, product_type = $3, price = $4, stock = $5
            WHERE id = $1
            RETURNING id, name, product_type, price, stock
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.product_type)
        .bind(product.price)
        .bind(product.stock)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        sqlx::query_as::<_, Product>(
            "DELETE FROM products WHERE id = $1 RETURNING id, name, product_type, price, stock",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_constraint)
    }

    // ---
    // Funções transacionais (recebem o executor da transação)
    // ---

    /// Lê o produto travando a linha até o fim da transação.
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, product_type, price, stock FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    /// Trava vários produtos de uma vez, sempre na ordem do id, para que
    /// transações concorrentes peguem os locks na mesma sequência.
    pub async fn lock_many<'e, E>(&self, executor: E, ids: &[Uuid]) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, product_type, price, stock
            FROM products
            WHERE id = ANY($1)
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(ids)
        .fetch_all(executor)
        .await?;
        Ok(products)
    }

    /// Soma `delta` ao estoque de forma atômica. Retorna `None` se o produto
    /// não existe ou se o estoque ficaria negativo.
    pub async fn adjust_stock<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        delta: i32,
    ) -> Result<Option<i32>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let new_stock = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE products
            SET stock = stock + $2
            WHERE id = $1 AND stock + $2 >= 0
            RETURNING stock
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            // 22003: numeric_value_out_of_range, o saldo não cabe em INTEGER
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("22003") {
                    return AppError::StockOverflow;
                }
            }
            e.into()
        })?;
        Ok(new_stock)
    }
}
