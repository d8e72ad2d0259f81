pub mod bet;
pub mod clue;
pub mod gender;
pub mod reveal;
pub mod symptom;
pub mod user;

pub use bet::*;
pub use clue::*;
pub use gender::*;
pub use reveal::*;
pub use symptom::*;
pub use user::*;
