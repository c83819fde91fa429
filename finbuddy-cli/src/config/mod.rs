//! FinBuddy configuration: BaseConfig (logging, index paths, search) + AppConfig (providers).

mod app_config;
mod base;


pub use app_config::AppConfig;
pub use base::BaseConfig;
