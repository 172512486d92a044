// src/services/sale_service.rs

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProductRepository, SaleRepository},
    models::{
        product::Product,
        sale::{sale_total, LineItem, PricedLine, Sale, SaleItem, SaleRequest},
    },
};

#[derive(Clone)]
pub struct SaleService {
    product_repo: ProductRepository,
    sale_repo: SaleRepository,
    pool: PgPool,
}

impl SaleService {
    pub fn new(product_repo: ProductRepository, sale_repo: SaleRepository, pool: PgPool) -> Self {
        Self { product_repo, sale_repo, pool }
    }

    /// Registra a venda inteira numa única transação: baixa de estoque,
    /// cabeçalho e itens. Qualquer erro desfaz tudo.
    pub async fn record_sale(
        &self,
        request: &SaleRequest,
    ) -> Result<(Sale, Vec<SaleItem>), AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Trava todos os produtos de uma vez, em ordem de id: duas vendas
        //    com os mesmos produtos em ordens diferentes não entram em deadlock
        let locked = self
            .product_repo
            .lock_many(&mut *tx, &lock_order(&request.line_items))
            .await?;
        let mut products: HashMap<Uuid, Product> =
            locked.into_iter().map(|p| (p.id, p)).collect();

        // 2. Itens na ordem do pedido, com o saldo corrente de cada produto
        let mut priced = Vec::with_capacity(request.line_items.len());
        for line in &request.line_items {
            let product = products
                .get_mut(&line.product_id)
                .ok_or(AppError::ProductNotFound)?;

            ensure_available(product, line.quantity)?;

            product.stock = self
                .product_repo
                .adjust_stock(&mut *tx, product.id, -line.quantity)
                .await?
                .ok_or(AppError::InsufficientStock {
                    product_id: product.id,
                    available: product.stock,
                    requested: line.quantity,
                })?;

            priced.push(PricedLine {
                product_id: product.id,
                quantity: line.quantity,
                unit_price: product.price,
            });
        }

        // 3. Cabeçalho
        let sale = self
            .sale_repo
            .insert_sale(&mut *tx, request.user_id, sale_total(&priced))
            .await?;

        // 4. Itens, com os preços lidos sob lock
        let items = self.sale_repo.insert_items(&mut *tx, sale.id, &priced).await?;

        tx.commit().await?;

        tracing::info!(sale_id = %sale.id, total = %sale.total, items = items.len(), "venda registrada");
        Ok((sale, items))
    }
}

// Ids distintos e ordenados, a ordem em que os locks são adquiridos
fn lock_order(lines: &[LineItem]) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = lines.iter().map(|line| line.product_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn ensure_available(product: &Product, requested: i32) -> Result<(), AppError> {
    if requested > product.stock {
        return Err(AppError::InsufficientStock {
            product_id: product.id,
            available: product.stock,
            requested,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::UserRepository, models::product::NewProduct};
    use rust_decimal::Decimal;

    fn product(stock: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Helado de fresa".into(),
            product_type: "crema".into(),
            price: Decimal::from(10),
            stock,
        }
    }

    #[test]
    fn exact_stock_is_available() {
        assert!(ensure_available(&product(2), 2).is_ok());
        assert!(ensure_available(&product(0), 0).is_ok());
    }

    #[test]
    fn over_request_is_rejected() {
        match ensure_available(&product(1), 3) {
            Err(AppError::InsufficientStock { available, requested, .. }) => {
                assert_eq!((available, requested), (1, 3));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn locks_are_taken_in_id_order_without_repeats() {
        let (a, b) = (Uuid::from_u128(1), Uuid::from_u128(2));
        let lines = [
            LineItem { product_id: b, quantity: 1 },
            LineItem { product_id: a, quantity: 2 },
            LineItem { product_id: b, quantity: 3 },
        ];
        assert_eq!(lock_order(&lines), vec![a, b]);
    }

    async fn seed(pool: &PgPool, stock: i32) -> (Uuid, Product) {
        let user = UserRepository::new(pool.clone())
            .create_user("vendedora", "$2b$10$hash")
            .await
            .unwrap();
        let product = ProductRepository::new(pool.clone())
            .create(&NewProduct {
                name: "Helado de fresa".into(),
                product_type: "crema".into(),
                price: Decimal::from(10),
                stock,
            })
            .await
            .unwrap();
        (user.id, product)
    }

    fn service(pool: &PgPool) -> SaleService {
        SaleService::new(
            ProductRepository::new(pool.clone()),
            SaleRepository::new(),
            pool.clone(),
        )
    }

    #[sqlx::test]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn sale_decrements_stock_and_totals(pool: PgPool) {
        let (user_id, product) = seed(&pool, 5).await;

        let request = SaleRequest {
            user_id,
            line_items: vec![LineItem { product_id: product.id, quantity: 2 }],
        };
        let (sale, items) = service(&pool).record_sale(&request).await.unwrap();

        assert_eq!(sale.total, Decimal::from(20));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].subtotal, Decimal::from(20));

        let stock = ProductRepository::new(pool.clone())
            .find_by_id(product.id)
            .await
            .unwrap()
            .unwrap()
            .stock;
        assert_eq!(stock, 3);
    }

    #[sqlx::test]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn failed_sale_leaves_no_trace(pool: PgPool) {
        let (user_id, product) = seed(&pool, 5).await;

        // A primeira linha cabe no estoque, a segunda não
        let request = SaleRequest {
            user_id,
            line_items: vec![
                LineItem { product_id: product.id, quantity: 4 },
                LineItem { product_id: product.id, quantity: 4 },
            ],
        };
        let result = service(&pool).record_sale(&request).await;
        assert!(matches!(result, Err(AppError::InsufficientStock { available: 1, .. })));

        let stock = ProductRepository::new(pool.clone())
            .find_by_id(product.id)
            .await
            .unwrap()
            .unwrap()
            .stock;
        assert_eq!(stock, 5);

        let sales: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(sales, 0);
    }

    #[sqlx::test]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn unknown_product_aborts_sale(pool: PgPool) {
        let (user_id, _) = seed(&pool, 5).await;

        let request = SaleRequest {
            user_id,
            line_items: vec![LineItem { product_id: Uuid::new_v4(), quantity: 1 }],
        };
        assert!(matches!(
            service(&pool).record_sale(&request).await,
            Err(AppError::ProductNotFound)
        ));
    }

    #[sqlx::test]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn opposite_order_sales_run_concurrently(pool: PgPool) {
        let (user_id, first) = seed(&pool, 100).await;
        let second = ProductRepository::new(pool.clone())
            .create(&NewProduct {
                name: "Paleta de mango".into(),
                product_type: "agua".into(),
                price: Decimal::from(8),
                stock: 100,
            })
            .await
            .unwrap();

        let forward = SaleRequest {
            user_id,
            line_items: vec![
                LineItem { product_id: first.id, quantity: 1 },
                LineItem { product_id: second.id, quantity: 1 },
            ],
        };
        let backward = SaleRequest {
            user_id,
            line_items: vec![
                LineItem { product_id: second.id, quantity: 1 },
                LineItem { product_id: first.id, quantity: 1 },
            ],
        };

        let service = service(&pool);
        for _ in 0..20 {
            let (a, b) = tokio::join!(service.record_sale(&forward), service.record_sale(&backward));
            a.unwrap();
            b.unwrap();
        }

        let products = ProductRepository::new(pool.clone());
        for id in [first.id, second.id] {
            let stock = products.find_by_id(id).await.unwrap().unwrap().stock;
            assert_eq!(stock, 60);
        }
    }
}
