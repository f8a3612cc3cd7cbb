pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod forecast;
pub mod form;
pub mod handlers;
pub mod models;
pub mod report;
pub mod series;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
