pub mod mechanical;
pub use mechanical::*;

pub mod uniform;
pub use uniform::*;
