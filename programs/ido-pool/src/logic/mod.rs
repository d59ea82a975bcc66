//! Pool business logic, independent of how accounts reach the program
pub mod distribution;
pub mod engine;

pub use distribution::*;
pub use engine::*;
