// src/services/report_service.rs

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ReportRepository,
    models::{
        report::{SaleDetail, SaleDetailLine, SaleLineRow, SaleSummary},
        sale::Sale,
    },
};

#[derive(Clone)]
pub struct ReportService {
    repo: ReportRepository,
    pool: PgPool,
}

impl ReportService {
    pub fn new(repo: ReportRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn sales_summary(&self) -> Result<Vec<SaleSummary>, AppError> {
        self.repo.list_sale_summaries().await
    }

    /// Vendas e itens lidos no mesmo snapshot, para que uma venda gravada
    /// entre as duas consultas não apareça pela metade.
    pub async fn sales_detail(&self) -> Result<Vec<SaleDetail>, AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let sales = self.repo.list_sales(&mut *tx).await?;
        let lines = self.repo.list_sale_lines(&mut *tx).await?;
        tx.commit().await?;

        Ok(nest_sale_lines(sales, lines))
    }
}

// Mantém a ordem das vendas (data desc) e pendura os itens em cada uma
fn nest_sale_lines(sales: Vec<Sale>, lines: Vec<SaleLineRow>) -> Vec<SaleDetail> {
    let mut by_sale: HashMap<Uuid, Vec<SaleDetailLine>> = HashMap::new();
    for row in lines {
        by_sale.entry(row.sale_id).or_default().push(row.into());
    }

    sales
        .into_iter()
        .map(|sale| SaleDetail {
            line_items: by_sale.remove(&sale.id).unwrap_or_default(),
            id: sale.id,
            date: sale.date,
            total: sale.total,
            user_id: sale.user_id,
        })
        .collect()
}
