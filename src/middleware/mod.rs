pub mod admin_key;
pub mod auth;
pub mod response;

pub use admin_key::{admin_key_middleware, ADMIN_KEY_HEADER};
pub use auth::CurrentSession;
pub use response::{ApiResponse, ApiResult};
