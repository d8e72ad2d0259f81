pub mod admin;
pub mod auth;
pub mod bet;
pub mod clue;
pub mod config;
pub mod symptom;

pub use admin::admin_config;
pub use auth::auth_config;
pub use bet::bet_config;
pub use clue::clue_config;
pub use config::config_config;
pub use symptom::symptom_config;
