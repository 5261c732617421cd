// Public routes need no token; protected routes sit behind the JWT middleware.
pub mod protected;
pub mod public;
