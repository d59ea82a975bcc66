//! Deposit instruction: quote in, claims out 1:1

use crate::{
    clock::SysvarClock,
    constants::POOL_SIGNER_SEED,
    error::IdoPoolError,
    ledger::SplTokenLedger,
    logic::engine::{ExchangeEngine, Participant},
    state::PoolAccount,
};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(
        has_one = claim_mint @ IdoPoolError::AccountMismatch,
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
    pub claim_mint: Account<'info, Mint>,

    #[account(mut)]
    pub quote_vault: Account<'info, TokenAccount>,

    pub user_authority: Signer<'info>,

    /// Quote source, owned by `user_authority`
    #[account(mut)]
    pub user_quote: Account<'info, TokenAccount>,

    /// Claim destination
    #[account(mut)]
    pub user_claim: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let engine = ExchangeEngine::new(ctx.accounts.pool.key(), &ctx.accounts.pool, ctx.program_id)?;
    let participant = Participant {
        authority: ctx.accounts.user_authority.key(),
        source: ctx.accounts.user_quote.key(),
        destination: ctx.accounts.user_claim.key(),
    };

    let mut ledger = SplTokenLedger::new(
        ctx.accounts.token_program.to_account_info(),
        vec![
            ctx.accounts.pool_signer.to_account_info(),
            ctx.accounts.claim_mint.to_account_info(),
            ctx.accounts.quote_vault.to_account_info(),
            ctx.accounts.user_authority.to_account_info(),
            ctx.accounts.user_quote.to_account_info(),
            ctx.accounts.user_claim.to_account_info(),
        ],
    );

    engine.deposit(&mut ledger, &SysvarClock, &participant, amount)
}
