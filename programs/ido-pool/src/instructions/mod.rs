pub mod deposit;
pub mod initialize_pool;
pub mod redeem_for_base;
pub mod sweep_quote;
pub mod undo_deposit;

pub use deposit::*;
pub use initialize_pool::*;
pub use redeem_for_base::*;
pub use sweep_quote::*;
pub use undo_deposit::*;
