pub mod chatbot;
pub mod clima;
pub mod client;
pub mod filtros;
pub mod geografia;
pub mod models;
pub mod predicciones;
pub mod temporal;
pub mod victimas;

pub use client::{ApiClient, ApiError, QueryParams};
