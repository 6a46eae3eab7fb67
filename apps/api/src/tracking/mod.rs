// Internship and application tracking: thin CRUD over PostgreSQL.

pub mod handlers;
pub mod store;
