pub mod auth_service;
pub mod bet_service;
pub mod clue_service;
pub mod reveal_service;
pub mod symptom_service;

pub use auth_service::*;
pub use bet_service::*;
pub use clue_service::*;
pub use reveal_service::*;
pub use symptom_service::*;
