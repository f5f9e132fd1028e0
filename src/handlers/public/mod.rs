// handlers/public/mod.rs - Public handlers (no credentials required)
//
// Security Level: None
// Route Prefix: /api/auth/*

pub mod auth;
