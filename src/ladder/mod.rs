pub mod elo;
pub use elo::*;

pub mod ladder;
pub use ladder::*;
