pub mod bets;
pub mod clues;
pub mod reveal_configs;
pub mod symptoms;
pub mod users;

pub use bets as bet_entity;
pub use clues as clue_entity;
pub use reveal_configs as reveal_config_entity;
pub use symptoms as symptom_entity;
pub use users as user_entity;
