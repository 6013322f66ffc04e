pub mod handlers;
pub mod image;
pub mod render;
pub mod routes;
pub mod services;
pub mod session;
