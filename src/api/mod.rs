/*
 * Responsibility
 * - public surface of the API layer (routes() re-export)
 */
pub mod dto;
pub mod handlers;
mod routes;

pub use routes::routes;
