pub mod auth;
pub mod inventory;
pub mod product;
pub mod report;
pub mod sale;
