pub mod auth;
pub mod inventory_service;
pub mod product_service;
pub mod report_service;
pub mod sale_service;
pub mod user_service;
