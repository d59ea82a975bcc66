//! Exchange engine
//!
//! Pool creation and the four exchange operations, written once against
//! `TokenLedger` and `ClockSource` so the same code runs on-chain over SPL
//! CPIs and on the host over the in-memory ledger.
//!
//! Every operation validates all of its preconditions before the first
//! ledger mutation. A failure therefore never leaves a transfer applied
//! without its matching mint or burn.

use crate::{
    clock::ClockSource,
    constants::EVENT_VERSION,
    error::IdoPoolError,
    events::{BaseRedeemed, DepositUndone, PoolInitialized, QuoteDeposited, QuoteSwept},
    ledger::{Authority, TokenAccountView, TokenLedger},
    logic::distribution::base_payout,
    signer::PoolSigner,
    state::{InitializePoolParams, PoolAccount, PoolOperation, PoolPhase},
    utils::math_safe::SafeMath,
};
use anchor_lang::prelude::*;

/// Addresses fixed at pool creation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolKeys {
    pub pool: Pubkey,
    pub distribution_authority: Pubkey,
    /// Creator's base account funding the allocation
    pub creator_base: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub claim_mint: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
}

/// The caller's side of an exchange: tokens leave `source` and arrive in `destination`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Participant {
    pub authority: Pubkey,
    pub source: Pubkey,
    pub destination: Pubkey,
}

/// Validate the pool accounts, fund the base vault and build the pool record
pub fn initialize_pool<L: TokenLedger, C: ClockSource>(
    ledger: &mut L,
    clock: &C,
    program_id: &Pubkey,
    keys: &PoolKeys,
    params: &InitializePoolParams,
) -> Result<PoolAccount> {
    let now = clock.unix_timestamp()?;
    params.validate(now)?;

    require!(
        keys.base_mint != keys.quote_mint
            && keys.claim_mint != keys.base_mint
            && keys.claim_mint != keys.quote_mint,
        IdoPoolError::InvalidConfiguration
    );

    let signer = PoolSigner::derive(&keys.pool, program_id);

    // Claims are issued only by the pool signer and start from nothing
    let claim = ledger.mint(&keys.claim_mint)?;
    let quote = ledger.mint(&keys.quote_mint)?;
    ledger.mint(&keys.base_mint)?;
    if claim.mint_authority != Some(signer.address()) || claim.supply != 0 {
        msg!(
            "Claim mint must be issued by {} with zero supply (supply={})",
            signer.address(),
            claim.supply
        );
        return err!(IdoPoolError::InvalidConfiguration);
    }
    require!(
        claim.decimals == quote.decimals,
        IdoPoolError::InvalidConfiguration
    );

    require_empty_vault(ledger, &keys.quote_vault, &keys.quote_mint, &signer)?;
    require_empty_vault(ledger, &keys.base_vault, &keys.base_mint, &signer)?;

    let creator = ledger.token_account(&keys.creator_base)?;
    require_keys_eq!(creator.mint, keys.base_mint, IdoPoolError::AccountMismatch);
    require_keys_eq!(
        creator.owner,
        keys.distribution_authority,
        IdoPoolError::Unauthorized
    );
    if creator.amount < params.base_allocation {
        msg!(
            "Creator holds {} base, allocation needs {}",
            creator.amount,
            params.base_allocation
        );
        return err!(IdoPoolError::InsufficientFunds);
    }

    ledger.transfer(
        &keys.creator_base,
        &keys.base_vault,
        Authority::Holder(keys.distribution_authority),
        params.base_allocation,
    )?;

    let record = PoolAccount {
        distribution_authority: keys.distribution_authority,
        base_mint: keys.base_mint,
        quote_mint: keys.quote_mint,
        claim_mint: keys.claim_mint,
        base_vault: keys.base_vault,
        quote_vault: keys.quote_vault,
        pool_signer: signer.address(),
        pool_signer_bump: signer.bump(),
        base_allocation: params.base_allocation,
        start_ts: params.start_ts,
        end_deposits_ts: params.end_deposits_ts,
        end_ido_ts: params.end_ido_ts,
        sweep_policy: params.sweep_policy,
    };

    msg!(
        "Pool {} initialized with {} base, schedule {}/{}/{}",
        keys.pool,
        params.base_allocation,
        params.start_ts,
        params.end_deposits_ts,
        params.end_ido_ts
    );
    emit!(PoolInitialized {
        pool: keys.pool,
        distribution_authority: keys.distribution_authority,
        base_mint: keys.base_mint,
        quote_mint: keys.quote_mint,
        claim_mint: keys.claim_mint,
        base_allocation: params.base_allocation,
        start_ts: params.start_ts,
        end_deposits_ts: params.end_deposits_ts,
        end_ido_ts: params.end_ido_ts,
        version: EVENT_VERSION,
    });

    Ok(record)
}

fn require_empty_vault<L: TokenLedger>(
    ledger: &L,
    vault: &Pubkey,
    mint: &Pubkey,
    signer: &PoolSigner,
) -> Result<()> {
    let view = ledger.token_account(vault)?;
    require_keys_eq!(view.mint, *mint, IdoPoolError::AccountMismatch);
    require_keys_eq!(
        view.owner,
        signer.address(),
        IdoPoolError::InvalidConfiguration
    );
    require!(view.amount == 0, IdoPoolError::InvalidConfiguration);
    Ok(())
}

/// Account of `mint` owned by `authority`, the only kind a caller may spend from
fn require_holding(view: &TokenAccountView, mint: &Pubkey, authority: &Pubkey) -> Result<()> {
    require_keys_eq!(view.mint, *mint, IdoPoolError::AccountMismatch);
    require_keys_eq!(view.owner, *authority, IdoPoolError::Unauthorized);
    Ok(())
}

fn require_balance(view: &TokenAccountView, amount: u64) -> Result<()> {
    if view.amount < amount {
        msg!("Balance {} is below requested {}", view.amount, amount);
        return err!(IdoPoolError::InsufficientFunds);
    }
    Ok(())
}

/// The four exchange operations of an initialized pool
pub struct ExchangeEngine<'a> {
    pool_key: Pubkey,
    pool: &'a PoolAccount,
    signer: PoolSigner,
}

impl<'a> ExchangeEngine<'a> {
    pub fn new(pool_key: Pubkey, pool: &'a PoolAccount, program_id: &Pubkey) -> Result<Self> {
        let signer = PoolSigner::from_record(&pool_key, pool);
        signer.verify(program_id)?;
        Ok(Self {
            pool_key,
            pool,
            signer,
        })
    }

    pub fn pool(&self) -> &PoolAccount {
        self.pool
    }

    pub fn signer(&self) -> &PoolSigner {
        &self.signer
    }

    pub fn phase<C: ClockSource>(&self, clock: &C) -> Result<PoolPhase> {
        Ok(self.pool.phase_at(clock.unix_timestamp()?))
    }

    /// Exchange quote for claims 1:1
    pub fn deposit<L: TokenLedger, C: ClockSource>(
        &self,
        ledger: &mut L,
        clock: &C,
        participant: &Participant,
        amount: u64,
    ) -> Result<()> {
        require!(amount > 0, IdoPoolError::ZeroAmount);
        let now = clock.unix_timestamp()?;
        self.pool.require_phase(now, PoolOperation::Deposit)?;

        let source = ledger.token_account(&participant.source)?;
        require_holding(&source, &self.pool.quote_mint, &participant.authority)?;
        let destination = ledger.token_account(&participant.destination)?;
        require_keys_eq!(
            destination.mint,
            self.pool.claim_mint,
            IdoPoolError::AccountMismatch
        );
        require_balance(&source, amount)?;

        let vault = ledger.token_account(&self.pool.quote_vault)?;
        let claim = ledger.mint(&self.pool.claim_mint)?;
        let vault_after = vault.amount.safe_add(amount)?;
        claim.supply.safe_add(amount)?;
        destination.amount.safe_add(amount)?;

        ledger.transfer(
            &participant.source,
            &self.pool.quote_vault,
            Authority::Holder(participant.authority),
            amount,
        )?;
        ledger.mint_to(
            &self.pool.claim_mint,
            &participant.destination,
            Authority::Pool(&self.signer),
            amount,
        )?;

        msg!("Deposited {} quote, vault holds {}", amount, vault_after);
        emit!(QuoteDeposited {
            pool: self.pool_key,
            user: participant.authority,
            amount,
            quote_vault_balance: vault_after,
            timestamp: now,
            version: EVENT_VERSION,
        });
        Ok(())
    }

    /// Exchange claims back for quote 1:1 while deposits are open
    pub fn undo_deposit<L: TokenLedger, C: ClockSource>(
        &self,
        ledger: &mut L,
        clock: &C,
        participant: &Participant,
        amount: u64,
    ) -> Result<()> {
        require!(amount > 0, IdoPoolError::ZeroAmount);
        let now = clock.unix_timestamp()?;
        self.pool.require_phase(now, PoolOperation::UndoDeposit)?;

        let source = ledger.token_account(&participant.source)?;
        require_holding(&source, &self.pool.claim_mint, &participant.authority)?;
        let destination = ledger.token_account(&participant.destination)?;
        require_keys_eq!(
            destination.mint,
            self.pool.quote_mint,
            IdoPoolError::AccountMismatch
        );
        // Paying out into the vault itself would burn claims for nothing
        require_keys_neq!(
            participant.destination,
            self.pool.quote_vault,
            IdoPoolError::AccountMismatch
        );
        require_balance(&source, amount)?;

        // Pegged to the claim supply, so this only trips on a broken invariant
        let vault = ledger.token_account(&self.pool.quote_vault)?;
        require_balance(&vault, amount)?;
        let vault_after = vault.amount.safe_sub(amount)?;
        destination.amount.safe_add(amount)?;

        ledger.burn(
            &self.pool.claim_mint,
            &participant.source,
            Authority::Holder(participant.authority),
            amount,
        )?;
        ledger.transfer(
            &self.pool.quote_vault,
            &participant.destination,
            Authority::Pool(&self.signer),
            amount,
        )?;

        msg!("Withdrew {} quote, vault holds {}", amount, vault_after);
        emit!(DepositUndone {
            pool: self.pool_key,
            user: participant.authority,
            amount,
            quote_vault_balance: vault_after,
            timestamp: now,
            version: EVENT_VERSION,
        });
        Ok(())
    }

    /// Burn claims for a pro-rata share of the remaining base. Returns the base paid.
    pub fn redeem_for_base<L: TokenLedger, C: ClockSource>(
        &self,
        ledger: &mut L,
        clock: &C,
        participant: &Participant,
        amount: u64,
    ) -> Result<u64> {
        require!(amount > 0, IdoPoolError::ZeroAmount);
        let now = clock.unix_timestamp()?;
        self.pool.require_phase(now, PoolOperation::RedeemForBase)?;

        let source = ledger.token_account(&participant.source)?;
        require_holding(&source, &self.pool.claim_mint, &participant.authority)?;
        let destination = ledger.token_account(&participant.destination)?;
        require_keys_eq!(
            destination.mint,
            self.pool.base_mint,
            IdoPoolError::AccountMismatch
        );
        // Paying out into the vault itself would burn claims for nothing
        require_keys_neq!(
            participant.destination,
            self.pool.base_vault,
            IdoPoolError::AccountMismatch
        );
        require_balance(&source, amount)?;

        let claim_supply = ledger.mint(&self.pool.claim_mint)?.supply;
        let vault = ledger.token_account(&self.pool.base_vault)?;
        let payout = base_payout(amount, vault.amount, claim_supply)?;
        require_balance(&vault, payout)?;
        let vault_after = vault.amount.safe_sub(payout)?;
        destination.amount.safe_add(payout)?;

        ledger.burn(
            &self.pool.claim_mint,
            &participant.source,
            Authority::Holder(participant.authority),
            amount,
        )?;
        ledger.transfer(
            &self.pool.base_vault,
            &participant.destination,
            Authority::Pool(&self.signer),
            payout,
        )?;

        msg!(
            "Redeemed {} claims of {} for {} base, vault holds {}",
            amount,
            claim_supply,
            payout,
            vault_after
        );
        emit!(BaseRedeemed {
            pool: self.pool_key,
            user: participant.authority,
            claim_burned: amount,
            base_paid: payout,
            base_vault_balance: vault_after,
            timestamp: now,
            version: EVENT_VERSION,
        });
        Ok(payout)
    }

    /// Move the whole quote vault to the distribution authority. Returns the amount swept.
    pub fn sweep_quote<L: TokenLedger, C: ClockSource>(
        &self,
        ledger: &mut L,
        clock: &C,
        authority: &Pubkey,
        destination: &Pubkey,
    ) -> Result<u64> {
        require_keys_eq!(
            *authority,
            self.pool.distribution_authority,
            IdoPoolError::Unauthorized
        );
        let now = clock.unix_timestamp()?;
        self.pool.require_phase(now, PoolOperation::SweepQuote)?;

        let target = ledger.token_account(destination)?;
        require_holding(&target, &self.pool.quote_mint, authority)?;

        let amount = ledger.token_account(&self.pool.quote_vault)?.amount;
        target.amount.safe_add(amount)?;

        ledger.transfer(
            &self.pool.quote_vault,
            destination,
            Authority::Pool(&self.signer),
            amount,
        )?;

        msg!("Swept {} quote to {}", amount, destination);
        emit!(QuoteSwept {
            pool: self.pool_key,
            authority: *authority,
            amount,
            timestamp: now,
            version: EVENT_VERSION,
        });
        Ok(amount)
    }
}
