// src/app.rs

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::{
        auth::verify_token,
        rbac::{require_role, AllowedRoles, ADMIN_ONLY, STAFF},
    },
};

/// Monta o router completo. O mesmo é usado em produção e nos testes.
pub fn build_router(app_state: AppState, cors_origin: Option<HeaderValue>) -> Router {
    // Rotas públicas
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // admin | vendedor
    let staff_routes = Router::new()
        .route(
            "/productos",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        .route(
            "/productos/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route("/ventas", post(handlers::sales::record_sale))
        .route("/reportes", get(handlers::reports::sales_summary))
        .route("/reportes/detalle", get(handlers::reports::sales_detail));

    // Somente admin
    let admin_routes = Router::new()
        .route(
            "/inventarios",
            get(handlers::inventory::list_replenishments)
                .post(handlers::inventory::record_replenishment),
        )
        .route("/usuarios", get(handlers::users::list_users))
        .route(
            "/usuarios/{id}",
            get(handlers::users::get_user)
                .delete(handlers::users::delete_user)
                .patch(handlers::users::update_user_role),
        );

    let api = Router::new()
        .merge(auth_routes)
        .merge(guarded(staff_routes, &app_state, STAFF))
        .merge(guarded(admin_routes, &app_state, ADMIN_ONLY))
        .route("/health", get(|| async { "OK" }));

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(cors_origin))
        .with_state(app_state)
}

// O último layer adicionado roda primeiro: token, depois papel
fn guarded(
    routes: Router<AppState>,
    app_state: &AppState,
    allowed: AllowedRoles,
) -> Router<AppState> {
    routes
        .route_layer(axum_middleware::from_fn_with_state(allowed, require_role))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            verify_token,
        ))
}

fn cors_layer(origin: Option<HeaderValue>) -> CorsLayer {
    match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION]),
        None => {
            tracing::warn!("CORS_ORIGIN não definida, aceitando qualquer origem");
            CorsLayer::permissive()
        }
    }
}
