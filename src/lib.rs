pub mod api;
pub mod commands;
pub mod error;
pub mod helpers;
pub mod models;
pub mod render;
pub mod state;
