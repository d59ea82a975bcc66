
use crate::{
    constants::{BASE_VAULT_SEED, CLAIM_MINT_SEED, POOL_SIGNER_SEED, QUOTE_VAULT_SEED},
    state::InitializePoolParams,
};
use anchor_lang::{
    prelude::*, solana_program::instruction::Instruction, system_program, InstructionData,
};
use anchor_spl::token::spl_token;

/// Program-derived addresses of one pool
pub struct PoolAddresses {
    pub pool_signer: Pubkey,
    pub claim_mint: Pubkey,
    pub quote_vault: Pubkey,
    pub base_vault: Pubkey,
}

impl PoolAddresses {
    pub fn derive(pool: &Pubkey) -> Self {
        let program_id = crate::id();
        let pda = |seed: &[u8]| Pubkey::find_program_address(&[seed, pool.as_ref()], &program_id).0;
        Self {
            pool_signer: pda(POOL_SIGNER_SEED),
            claim_mint: pda(CLAIM_MINT_SEED),
            quote_vault: pda(QUOTE_VAULT_SEED),
            base_vault: pda(BASE_VAULT_SEED),
        }
    }
}

pub struct InstructionBuilder;

impl InstructionBuilder {
    pub fn initialize_pool(
        pool: &Pubkey,
        authority: &Pubkey,
        base_mint: &Pubkey,
        quote_mint: &Pubkey,
        creator_base: &Pubkey,
        params: InitializePoolParams,
    ) -> Instruction {
        let pdas = PoolAddresses::derive(pool);
        let accounts = crate::accounts::InitializePool {
            pool: *pool,
            pool_signer: pdas.pool_signer,
            base_mint: *base_mint,
            quote_mint: *quote_mint,
            claim_mint: pdas.claim_mint,
            quote_vault: pdas.quote_vault,
            base_vault: pdas.base_vault,
            creator_base: *creator_base,
            distribution_authority: *authority,
            token_program: spl_token::ID,
            system_program: system_program::ID,
            rent: anchor_lang::solana_program::sysvar::rent::ID,
        };

        Instruction {
            program_id: crate::id(),
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::InitializePool { params }.data(),
        }
    }

    pub fn deposit(
        pool: &Pubkey,
        user: &Pubkey,
        user_quote: &Pubkey,
        user_claim: &Pubkey,
        amount: u64,
    ) -> Instruction {
        let pdas = PoolAddresses::derive(pool);
        let accounts = crate::accounts::Deposit {
            pool: *pool,
            pool_signer: pdas.pool_signer,
            claim_mint: pdas.claim_mint,
            quote_vault: pdas.quote_vault,
            user_authority: *user,
            user_quote: *user_quote,
            user_claim: *user_claim,
            token_program: spl_token::ID,
        };

        Instruction {
            program_id: crate::id(),
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::Deposit { amount }.data(),
        }
    }

    pub fn undo_deposit(
        pool: &Pubkey,
        user: &Pubkey,
        user_claim: &Pubkey,
        user_quote: &Pubkey,
        amount: u64,
    ) -> Instruction {
        let pdas = PoolAddresses::derive(pool);
        let accounts = crate::accounts::UndoDeposit {
            pool: *pool,
            pool_signer: pdas.pool_signer,
            claim_mint: pdas.claim_mint,
            quote_vault: pdas.quote_vault,
            user_authority: *user,
            user_claim: *user_claim,
            user_quote: *user_quote,
            token_program: spl_token::ID,
        };

        Instruction {
            program_id: crate::id(),
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::UndoDeposit { amount }.data(),
        }
    }

    pub fn redeem_for_base(
        pool: &Pubkey,
        user: &Pubkey,
        user_claim: &Pubkey,
        user_base: &Pubkey,
        amount: u64,
    ) -> Instruction {
        let pdas = PoolAddresses::derive(pool);
        let accounts = crate::accounts::RedeemForBase {
            pool: *pool,
            pool_signer: pdas.pool_signer,
            claim_mint: pdas.claim_mint,
            base_vault: pdas.base_vault,
            user_authority: *user,
            user_claim: *user_claim,
            user_base: *user_base,
            token_program: spl_token::ID,
        };

        Instruction {
            program_id: crate::id(),
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::RedeemForBase { amount }.data(),
        }
    }

    pub fn sweep_quote(pool: &Pubkey, authority: &Pubkey, authority_quote: &Pubkey) -> Instruction {
        let pdas = PoolAddresses::derive(pool);
        let accounts = crate::accounts::SweepQuote {
            pool: *pool,
            pool_signer: pdas.pool_signer,
            quote_vault: pdas.quote_vault,
            distribution_authority: *authority,
            authority_quote: *authority_quote,
            token_program: spl_token::ID,
        };

        Instruction {
            program_id: crate::id(),
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::SweepQuote {}.data(),
        }
    }
}
