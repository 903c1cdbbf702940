// Product deletion endpoint
pub mod delete;

pub use delete::delete_products;
