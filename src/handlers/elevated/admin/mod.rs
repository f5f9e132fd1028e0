// handlers/elevated/admin/mod.rs - Maintenance fixes

pub mod fixes; // GET /api/admin/fixes, POST /api/admin/fixes/:fix

pub use fixes::{fix_list, fix_run};
