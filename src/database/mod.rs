pub mod gateway;
pub mod manager;
pub mod models;

pub use gateway::{AdminMigrator, PersistenceGateway, PgGateway};
pub use manager::{DatabaseError, DatabaseManager};
