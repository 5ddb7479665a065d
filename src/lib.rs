pub mod beta_form;
pub mod config;
pub mod models;
pub mod notifications;
pub mod responses;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;
