// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind `jwt_auth_middleware`, which places an
// `AuthUser` in the request extensions. Handlers scope all reads and writes
// to that user.

pub mod dashboard; // GET /dashboard
pub mod goals;     // /goals[/:id]
pub mod tasks;     // /tasks[/:id]
