//! Error definitions

use anchor_lang::prelude::*;

#[error_code]
pub enum IdoPoolError {
    // Phase gate
    #[msg("Operation is not permitted in the current pool phase")]
    PhaseViolation,

    // Balances
    #[msg("Insufficient funds in source account or vault")]
    InsufficientFunds,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    // Authority
    #[msg("Caller is not authorized for this operation")]
    Unauthorized,

    #[msg("Pool signer does not derive from its seeds")]
    InvalidPoolSigner,

    // Configuration
    #[msg("Invalid pool configuration: allocation must be positive and timestamps strictly increasing")]
    InvalidConfiguration,

    #[msg("Token account or mint does not match the pool")]
    AccountMismatch,

    #[msg("Account is not known to the token ledger")]
    UnknownAccount,

    // Math
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
