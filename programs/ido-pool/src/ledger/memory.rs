//! In-memory token ledger
//!
//! Host-side backend with SPL token semantics: balances never go negative,
//! transfers require matching mints, the owner authorizes transfers and
//! burns, and only the mint authority can issue. `atomically` gives the
//! all-or-nothing behavior the Solana runtime gives a failed instruction.

use crate::{
    error::IdoPoolError,
    ledger::{Authority, MintView, TokenAccountView, TokenLedger},
};
use anchor_lang::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, trace};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    mints: BTreeMap<Pubkey, MintView>,
    accounts: BTreeMap<Pubkey, TokenAccountView>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mint at a fresh address
    pub fn create_mint(&mut self, mint_authority: Pubkey, decimals: u8) -> Pubkey {
        let address = Pubkey::new_unique();
        self.mints.insert(
            address,
            MintView {
                mint_authority: Some(mint_authority),
                supply: 0,
                decimals,
            },
        );
        debug!(%address, %mint_authority, decimals, "created mint");
        address
    }

    /// Create a mint at a predetermined (e.g. program-derived) address
    pub fn create_mint_at(
        &mut self,
        address: Pubkey,
        mint_authority: Pubkey,
        decimals: u8,
    ) -> Result<()> {
        require!(
            !self.mints.contains_key(&address) && !self.accounts.contains_key(&address),
            IdoPoolError::InvalidConfiguration
        );
        self.mints.insert(
            address,
            MintView {
                mint_authority: Some(mint_authority),
                supply: 0,
                decimals,
            },
        );
        debug!(%address, %mint_authority, decimals, "created mint");
        Ok(())
    }

    /// Create an empty token account at a fresh address
    pub fn create_token_account(&mut self, mint: &Pubkey, owner: &Pubkey) -> Result<Pubkey> {
        let address = Pubkey::new_unique();
        self.create_token_account_at(address, mint, owner)?;
        Ok(address)
    }

    pub fn create_token_account_at(
        &mut self,
        address: Pubkey,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<()> {
        require!(self.mints.contains_key(mint), IdoPoolError::UnknownAccount);
        require!(
            !self.mints.contains_key(&address) && !self.accounts.contains_key(&address),
            IdoPoolError::InvalidConfiguration
        );
        self.accounts.insert(
            address,
            TokenAccountView {
                mint: *mint,
                owner: *owner,
                amount: 0,
            },
        );
        debug!(%address, %mint, %owner, "created token account");
        Ok(())
    }

    pub fn balance(&self, address: &Pubkey) -> Result<u64> {
        Ok(self.token_account(address)?.amount)
    }

    pub fn supply(&self, mint: &Pubkey) -> Result<u64> {
        Ok(self.mint(mint)?.supply)
    }

    /// Run `operation` as one transaction: on error every mutation it made is undone
    pub fn atomically<T>(&mut self, operation: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let snapshot = self.clone();
        let result = operation(self);
        if let Err(error) = &result {
            debug!(%error, "operation failed, ledger rolled back");
            *self = snapshot;
        }
        result
    }

    fn account_mut(&mut self, address: &Pubkey) -> Result<&mut TokenAccountView> {
        self.accounts
            .get_mut(address)
            .ok_or_else(|| error!(IdoPoolError::UnknownAccount))
    }

    fn mint_mut(&mut self, address: &Pubkey) -> Result<&mut MintView> {
        self.mints
            .get_mut(address)
            .ok_or_else(|| error!(IdoPoolError::UnknownAccount))
    }

    fn require_owner(account: &TokenAccountView, authority: &Authority<'_>) -> Result<()> {
        require_keys_eq!(account.owner, authority.key(), IdoPoolError::Unauthorized);
        Ok(())
    }
}

impl TokenLedger for InMemoryLedger {
    fn token_account(&self, address: &Pubkey) -> Result<TokenAccountView> {
        self.accounts
            .get(address)
            .copied()
            .ok_or_else(|| error!(IdoPoolError::UnknownAccount))
    }

    fn mint(&self, address: &Pubkey) -> Result<MintView> {
        self.mints
            .get(address)
            .copied()
            .ok_or_else(|| error!(IdoPoolError::UnknownAccount))
    }

    fn transfer(
        &mut self,
        from: &Pubkey,
        to: &Pubkey,
        authority: Authority<'_>,
        amount: u64,
    ) -> Result<()> {
        let source = self.token_account(from)?;
        let destination = self.token_account(to)?;
        Self::require_owner(&source, &authority)?;
        require_keys_eq!(source.mint, destination.mint, IdoPoolError::AccountMismatch);
        require!(source.amount >= amount, IdoPoolError::InsufficientFunds);
        if from != to {
            destination
                .amount
                .checked_add(amount)
                .ok_or_else(|| error!(IdoPoolError::ArithmeticOverflow))?;
        }

        self.account_mut(from)?.amount -= amount;
        self.account_mut(to)?.amount += amount;
        trace!(%from, %to, amount, "transfer");
        Ok(())
    }

    fn mint_to(
        &mut self,
        mint: &Pubkey,
        to: &Pubkey,
        authority: Authority<'_>,
        amount: u64,
    ) -> Result<()> {
        let issuer = self.mint(mint)?;
        let destination = self.token_account(to)?;
        require!(
            issuer.mint_authority == Some(authority.key()),
            IdoPoolError::Unauthorized
        );
        require_keys_eq!(destination.mint, *mint, IdoPoolError::AccountMismatch);
        let supply = issuer
            .supply
            .checked_add(amount)
            .ok_or_else(|| error!(IdoPoolError::ArithmeticOverflow))?;
        let balance = destination
            .amount
            .checked_add(amount)
            .ok_or_else(|| error!(IdoPoolError::ArithmeticOverflow))?;

        self.mint_mut(mint)?.supply = supply;
        self.account_mut(to)?.amount = balance;
        trace!(%mint, %to, amount, "mint_to");
        Ok(())
    }

    fn burn(
        &mut self,
        mint: &Pubkey,
        from: &Pubkey,
        authority: Authority<'_>,
        amount: u64,
    ) -> Result<()> {
        let issuer = self.mint(mint)?;
        let source = self.token_account(from)?;
        Self::require_owner(&source, &authority)?;
        require_keys_eq!(source.mint, *mint, IdoPoolError::AccountMismatch);
        require!(source.amount >= amount, IdoPoolError::InsufficientFunds);
        // supply >= any single balance
        let supply = issuer
            .supply
            .checked_sub(amount)
            .ok_or_else(|| error!(IdoPoolError::ArithmeticOverflow))?;

        self.mint_mut(mint)?.supply = supply;
        self.account_mut(from)?.amount -= amount;
        trace!(%mint, %from, amount, "burn");
        Ok(())
    }
}
