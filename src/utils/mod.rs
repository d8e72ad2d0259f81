pub mod draw;

pub use draw::{draw_index, prize_split, FEE_RATE};
