// src/db/report_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{
        report::{SaleLineRow, SaleSummary},
        sale::Sale,
    },
};

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_sale_summaries(&self) -> Result<Vec<SaleSummary>, AppError> {
        let rows = sqlx::query_as::<_, SaleSummary>(
            "SELECT date, total, user_id FROM sales ORDER BY date DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // As duas leituras abaixo rodam na transação do relatório detalhado

    pub async fn list_sales<'e, E>(&self, executor: E) -> Result<Vec<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT id, user_id, date, total FROM sales ORDER BY date DESC",
        )
        .fetch_all(executor)
        .await?;
        Ok(sales)
    }

    pub async fn list_sale_lines<'e, E>(&self, executor: E) -> Result<Vec<SaleLineRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, SaleLineRow>(
            r#"
            SELECT si.sale_id, si.product_id, si.quantity, si.subtotal,
                   p.name AS product_name, p.price AS product_price
            FROM sale_items si
            JOIN products p ON p.id = si.product_id
            ORDER BY si.sale_id, si.line_no
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }
}
