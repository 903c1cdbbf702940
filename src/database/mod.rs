pub mod manager;
pub mod options;
pub mod products;

pub use manager::{DatabaseError, DatabaseManager};
