// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Productos ---
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Ventas ---
        handlers::sales::record_sale,

        // --- Inventarios ---
        handlers::inventory::list_replenishments,
        handlers::inventory::record_replenishment,

        // --- Reportes ---
        handlers::reports::sales_summary,
        handlers::reports::sales_detail,

        // --- Usuarios ---
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::delete_user,
        handlers::users::update_user_role,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::CredentialsPayload,
            models::auth::MessageResponse,
            models::auth::LoginResponse,
            models::auth::UpdateRolePayload,
            models::auth::UserResponse,

            // --- Productos ---
            models::product::Product,
            models::product::ProductPayload,
            models::product::ProductResponse,

            // --- Ventas ---
            models::sale::Sale,
            models::sale::SaleItem,
            models::sale::LineItemPayload,
            models::sale::RecordSalePayload,
            models::sale::RecordSaleResponse,

            // --- Inventarios ---
            models::inventory::Replenishment,
            models::inventory::ReplenishmentEntry,
            models::inventory::ReplenishmentPayload,
            models::inventory::ReplenishmentResponse,

            // --- Reportes ---
            models::report::SaleSummary,
            models::report::SaleDetail,
            models::report::SaleDetailLine,
            models::report::ProductRef,
        )
    ),
    tags(
        (name = "Auth", description = "Registro e login"),
        (name = "Productos", description = "Catálogo de produtos"),
        (name = "Ventas", description = "Registro de vendas"),
        (name = "Inventarios", description = "Reposição de estoque (admin)"),
        (name = "Reportes", description = "Relatórios de vendas"),
        (name = "Usuarios", description = "Administração de usuários (admin)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
