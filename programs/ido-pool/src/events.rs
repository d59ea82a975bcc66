//! Event definitions

use anchor_lang::prelude::*;

/// Event emitted when a pool is created and its base vault funded
#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub distribution_authority: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub claim_mint: Pubkey,
    pub base_allocation: u64,
    pub start_ts: i64,
    pub end_deposits_ts: i64,
    pub end_ido_ts: i64,
    pub version: u8,
}

/// Event emitted when quote tokens are exchanged for claims
#[event]
pub struct QuoteDeposited {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub quote_vault_balance: u64,
    pub timestamp: i64,
    pub version: u8,
}

/// Event emitted when claims are exchanged back for quote tokens
#[event]
pub struct DepositUndone {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub quote_vault_balance: u64,
    pub timestamp: i64,
    pub version: u8,
}

/// Event emitted when claims are redeemed for the base allocation
#[event]
pub struct BaseRedeemed {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub claim_burned: u64,
    pub base_paid: u64,
    pub base_vault_balance: u64,
    pub timestamp: i64,
    pub version: u8,
}

/// Event emitted when the distribution authority sweeps the quote vault
#[event]
pub struct QuoteSwept {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
    pub version: u8,
}
