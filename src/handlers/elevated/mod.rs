// handlers/elevated/mod.rs - Elevated handlers (admin key required)
//
// Administrative endpoints that run raw maintenance SQL. Every route here is
// mounted behind middleware::admin_key_middleware, which checks the
// x-admin-key header against ADMIN_MAINT_KEY before the handler runs.
//
// Route Prefix: /api/admin/*

pub mod admin;
