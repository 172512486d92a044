pub mod user_repo;
pub use user_repo::UserRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod report_repo;
pub use report_repo::ReportRepository;
