pub mod commands;
pub mod config;
pub mod logging;
pub mod render;
pub mod session;

pub use config::AppConfig;
pub use session::{Reply, Session, run};
