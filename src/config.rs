// src/config.rs

use std::{env, fmt::Display, str::FromStr, time::Duration};

use anyhow::Context;
use axum::http::HeaderValue;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{InventoryRepository, ProductRepository, ReportRepository, SaleRepository, UserRepository},
    services::{
        auth::AuthService, inventory_service::InventoryService, product_service::ProductService,
        report_service::ReportService, sale_service::SaleService, user_service::UserService,
    },
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub cors_origin: Option<HeaderValue>,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let cors_origin = match env::var("CORS_ORIGIN") {
            Ok(origin) => Some(
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("CORS_ORIGIN inválido: {origin}"))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            port: try_load("PORT", "3000")?,
            cors_origin,
            db_max_connections: try_load("DB_MAX_CONNECTIONS", "5")?,
        })
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{key} deve ser definida"))
}

fn try_load<T: FromStr>(key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        tracing::info!("{key} não definida, usando padrão: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| anyhow::anyhow!("Valor inválido para {key}: {e}"))
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub product_service: ProductService,
    pub sale_service: SaleService,
    pub inventory_service: InventoryService,
    pub report_service: ReportService,
    pub user_service: UserService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config.jwt_secret.clone()))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, jwt_secret: String) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());

        Self {
            auth_service: AuthService::new(user_repo.clone(), jwt_secret),
            product_service: ProductService::new(product_repo.clone()),
            sale_service: SaleService::new(
                product_repo.clone(),
                SaleRepository::new(),
                db_pool.clone(),
            ),
            inventory_service: InventoryService::new(
                InventoryRepository::new(db_pool.clone()),
                product_repo,
                db_pool.clone(),
            ),
            report_service: ReportService::new(
                ReportRepository::new(db_pool.clone()),
                db_pool.clone(),
            ),
            user_service: UserService::new(user_repo),
            db_pool,
        }
    }
}
