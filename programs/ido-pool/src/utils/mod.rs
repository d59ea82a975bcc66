/// Low-level helpers shared by the engine and the distribution math.
pub mod math_safe; // Overflow-safe arithmetic traits

pub use math_safe::*;
