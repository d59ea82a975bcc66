//! Sweep quote instruction: the distribution authority collects the raise

use crate::{
    clock::SysvarClock,
    constants::POOL_SIGNER_SEED,
    error::IdoPoolError,
    ledger::SplTokenLedger,
    logic::engine::ExchangeEngine,
    state::PoolAccount,
};
use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

#[derive(Accounts)]
pub struct SweepQuote<'info> {
    #[account(
        has_one = distribution_authority @ IdoPoolError::Unauthorized,
        has_one = quote_vault @ IdoPoolError::AccountMismatch,
    )]
    pub pool: Account<'info, PoolAccount>,

    /// CHECK: PDA signer, validated by seeds
    #[account(
        seeds = [POOL_SIGNER_SEED, pool.key().as_ref()],
        bump = pool.pool_signer_bump,
    )]
    pub pool_signer: UncheckedAccount<'info>,

    #[account(mut)]
    pub quote_vault: Account<'info, TokenAccount>,

    pub distribution_authority: Signer<'info>,

    /// Authority's quote account receiving the sweep
    #[account(mut)]
    pub authority_quote: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<SweepQuote>) -> Result<()> {
    let engine = ExchangeEngine::new(ctx.accounts.pool.key(), &ctx.accounts.pool, ctx.program_id)?;

    let mut ledger = SplTokenLedger::new(
        ctx.accounts.token_program.to_account_info(),
        vec![
            ctx.accounts.pool_signer.to_account_info(),
            ctx.accounts.quote_vault.to_account_info(),
            ctx.accounts.authority_quote.to_account_info(),
        ],
    );

    engine
        .sweep_quote(
            &mut ledger,
            &SysvarClock,
            &ctx.accounts.distribution_authority.key(),
            &ctx.accounts.authority_quote.key(),
        )
        .map(|_| ())
}
