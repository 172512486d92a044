pub mod auth;
pub mod inventory;
pub mod products;
pub mod reports;
pub mod sales;
pub mod users;
