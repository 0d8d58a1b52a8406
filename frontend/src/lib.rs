pub mod app;
pub mod components;
pub mod config;
pub mod styles;

pub use app::App;
