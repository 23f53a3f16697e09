pub mod dashboard_service;
pub mod order_service;
pub mod product_service;
pub mod supplier_service;
pub mod user_service;
