// handlers/mod.rs - Handlers grouped by security tier
//
// Public (no credentials) → Elevated (x-admin-key gate)
// Session-gated HTML pages live in crate::pages.

pub mod elevated; // /api/admin/* behind the admin key gate
pub mod public;   // /api/auth/*
