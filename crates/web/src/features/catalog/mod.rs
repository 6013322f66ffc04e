pub mod handlers;
pub mod modal;
pub mod render;
pub mod routes;
pub mod services;
pub mod view;
