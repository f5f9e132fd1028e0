// handlers/public/auth/mod.rs - Public authentication handlers
//
// Account creation and the browser session lifecycle. None of these
// require an existing session.

pub mod register; // POST /api/auth/register
pub mod session;  // POST /api/auth/login, POST /api/auth/signout, GET /api/auth/session
pub mod utils;

pub use register::register;
pub use session::{login, session, sign_out};
