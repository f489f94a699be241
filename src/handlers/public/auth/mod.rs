// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints that do not require authentication.

pub mod login;    // POST /login - authenticate and get JWT
pub mod register; // POST /register - create new account

pub use login::login_post;
pub use register::register_post;
