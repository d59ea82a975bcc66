pub mod phase;
pub mod pool;

pub use phase::*;
pub use pool::*;
