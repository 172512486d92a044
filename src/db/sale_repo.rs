// src/db/sale_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sale::{PricedLine, Sale, SaleItem},
};

// Só escreve dentro da transação da venda, por isso não guarda a pool
#[derive(Clone, Default)]
pub struct SaleRepository;

impl SaleRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert_sale<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        total: Decimal,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (user_id, date, total)
            VALUES ($1, NOW(), $2)
            RETURNING id, user_id, date, total
            "#,
        )
        .bind(user_id)
        .bind(total)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // A única FK do cabeçalho é o usuário
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::UserNotFound;
                }
            }
            e.into()
        })
    }

    /// Grava todos os itens da venda num único INSERT.
    pub async fn insert_items<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
        lines: &[PricedLine],
    ) -> Result<Vec<SaleItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO sale_items (sale_id, line_no, product_id, quantity, subtotal) ",
        );
        builder.push_values(lines.iter().enumerate(), |mut row, (line_no, line)| {
            row.push_bind(sale_id)
                .push_bind(line_no as i32)
                .push_bind(line.product_id)
                .push_bind(line.quantity)
                .push_bind(line.subtotal());
        });
        builder.push(" RETURNING id, sale_id, product_id, quantity, subtotal");

        let items = builder
            .build_query_as::<SaleItem>()
            .fetch_all(executor)
            .await?;
        Ok(items)
    }
}
