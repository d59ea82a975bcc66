//! Initialize pool instruction
//!
//! Creates the pool record, the claim mint and both vaults, then moves the
//! base allocation from the creator into the base vault.

use crate::{
    clock::SysvarClock,
    constants::{
        BASE_VAULT_SEED, CLAIM_MINT_SEED, DISCRIMINATOR_LENGTH, POOL_SIGNER_SEED, QUOTE_VAULT_SEED,
    },
    error::IdoPoolError,
    ledger::SplTokenLedger,
    logic::engine::{self, PoolKeys},
    state::{InitializePoolParams, PoolAccount},
};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// Pool record, a fresh keypair account
    #[account(
        init,
        payer = distribution_authority,
        space = DISCRIMINATOR_LENGTH + PoolAccount::INIT_SPACE,
    )]
    pub pool: Account<'info, PoolAccount>,

    /// CHECK: PDA signer for vaults and claim issuance, holds no data
    #[account(
        seeds = [POOL_SIGNER_SEED, pool.key().as_ref()],
        bump,
    )]
    pub pool_signer: UncheckedAccount<'info>,

    /// Token being distributed
    pub base_mint: Account<'info, Mint>,

    /// Token being raised
    pub quote_mint: Account<'info, Mint>,

    /// Claim token, issued only by the pool signer
    #[account(
        init,
        payer = distribution_authority,
        mint::decimals = quote_mint.decimals,
        mint::authority = pool_signer,
        seeds = [CLAIM_MINT_SEED, pool.key().as_ref()],
        bump,
    )]
    pub claim_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = distribution_authority,
        token::mint = quote_mint,
        token::authority = pool_signer,
        seeds = [QUOTE_VAULT_SEED, pool.key().as_ref()],
        bump,
    )]
    pub quote_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = distribution_authority,
        token::mint = base_mint,
        token::authority = pool_signer,
        seeds = [BASE_VAULT_SEED, pool.key().as_ref()],
        bump,
    )]
    pub base_vault: Account<'info, TokenAccount>,

    /// Creator's base account funding the allocation
    #[account(
        mut,
        constraint = creator_base.owner == distribution_authority.key() @ IdoPoolError::Unauthorized,
        constraint = creator_base.mint == base_mint.key() @ IdoPoolError::AccountMismatch,
    )]
    pub creator_base: Account<'info, TokenAccount>,

    /// Pool creator, pays rent and may later sweep the quote vault
    #[account(mut)]
    pub distribution_authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<InitializePool>, params: InitializePoolParams) -> Result<()> {
    let keys = PoolKeys {
        pool: ctx.accounts.pool.key(),
        distribution_authority: ctx.accounts.distribution_authority.key(),
        creator_base: ctx.accounts.creator_base.key(),
        base_mint: ctx.accounts.base_mint.key(),
        quote_mint: ctx.accounts.quote_mint.key(),
        claim_mint: ctx.accounts.claim_mint.key(),
        base_vault: ctx.accounts.base_vault.key(),
        quote_vault: ctx.accounts.quote_vault.key(),
    };

    let mut ledger = SplTokenLedger::new(
        ctx.accounts.token_program.to_account_info(),
        vec![
            ctx.accounts.base_mint.to_account_info(),
            ctx.accounts.quote_mint.to_account_info(),
            ctx.accounts.claim_mint.to_account_info(),
            ctx.accounts.quote_vault.to_account_info(),
            ctx.accounts.base_vault.to_account_info(),
            ctx.accounts.creator_base.to_account_info(),
            ctx.accounts.distribution_authority.to_account_info(),
        ],
    );

    let record = engine::initialize_pool(&mut ledger, &SysvarClock, ctx.program_id, &keys, &params)?;
    require_eq!(
        record.pool_signer_bump,
        ctx.bumps.pool_signer,
        IdoPoolError::InvalidPoolSigner
    );

    ctx.accounts.pool.set_inner(record);
    Ok(())
}
