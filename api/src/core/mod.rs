pub mod app_config;
pub mod app_state;
pub mod render;
pub mod session;
