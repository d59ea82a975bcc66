#![allow(unexpected_cfgs)]
//! IDO pool program
//!
//! A time-gated escrow: participants deposit a quote token for claim tokens
//! 1:1, may withdraw while deposits are open, and after the sale burn their
//! claims for a pro-rata share of a fixed base allocation. The distribution
//! authority sweeps the raised quote once the sale has closed.

use anchor_lang::prelude::*;

pub mod clock;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod logic;
pub mod signer;
pub mod state;
pub mod utils;

use instructions::*;
pub use state::*;

#[cfg(test)]
mod tests;

declare_id!("ido1Poo111111111111111111111111111111111111");

#[program]
pub mod ido_pool {
    use super::*;

    /// Create the pool, its claim mint and vaults, and fund the base vault
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        params: InitializePoolParams,
    ) -> Result<()> {
        instructions::initialize_pool::handler(ctx, params)
    }

    /// Exchange quote for claims 1:1 (Deposit phase)
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Exchange claims back for quote 1:1 (Deposit phase)
    pub fn undo_deposit(ctx: Context<UndoDeposit>, amount: u64) -> Result<()> {
        instructions::undo_deposit::handler(ctx, amount)
    }

    /// Burn claims for a pro-rata share of the base vault (Distribution phase)
    pub fn redeem_for_base(ctx: Context<RedeemForBase>, amount: u64) -> Result<()> {
        instructions::redeem_for_base::handler(ctx, amount)
    }

    /// Move the quote vault to the distribution authority
    pub fn sweep_quote(ctx: Context<SweepQuote>) -> Result<()> {
        instructions::sweep_quote::handler(ctx)
    }
}
