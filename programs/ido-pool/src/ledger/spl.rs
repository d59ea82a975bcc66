//! SPL token backend
//!
//! Serves the ledger primitives with token program CPIs. Accounts are
//! looked up by key among the infos handed over by the instruction, and
//! balances are always read from account data, never from cached wrappers.
#![allow(deprecated)]

use crate::{
    error::IdoPoolError,
    ledger::{Authority, MintView, TokenAccountView, TokenLedger},
};
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, MintTo, TokenAccount, Transfer};

pub struct SplTokenLedger<'info> {
    token_program: AccountInfo<'info>,
    accounts: Vec<AccountInfo<'info>>,
}

impl<'info> SplTokenLedger<'info> {
    pub fn new(token_program: AccountInfo<'info>, accounts: Vec<AccountInfo<'info>>) -> Self {
        Self {
            token_program,
            accounts,
        }
    }

    fn account_info(&self, address: &Pubkey) -> Result<AccountInfo<'info>> {
        self.accounts
            .iter()
            .find(|info| info.key == address)
            .cloned()
            .ok_or_else(|| {
                msg!("Account {} was not supplied to the ledger", address);
                error!(IdoPoolError::UnknownAccount)
            })
    }

    fn token_owned(&self, address: &Pubkey) -> Result<AccountInfo<'info>> {
        let info = self.account_info(address)?;
        require_keys_eq!(*info.owner, token::ID, IdoPoolError::AccountMismatch);
        Ok(info)
    }
}

impl<'info> TokenLedger for SplTokenLedger<'info> {
    fn token_account(&self, address: &Pubkey) -> Result<TokenAccountView> {
        let info = self.token_owned(address)?;
        let data = info.try_borrow_data()?;
        let account = TokenAccount::try_deserialize(&mut &data[..])?;
        Ok(TokenAccountView {
            mint: account.mint,
            owner: account.owner,
            amount: account.amount,
        })
    }

    fn mint(&self, address: &Pubkey) -> Result<MintView> {
        let info = self.token_owned(address)?;
        let data = info.try_borrow_data()?;
        let mint = Mint::try_deserialize(&mut &data[..])?;
        Ok(MintView {
            mint_authority: mint.mint_authority.into(),
            supply: mint.supply,
            decimals: mint.decimals,
        })
    }

    fn transfer(
        &mut self,
        from: &Pubkey,
        to: &Pubkey,
        authority: Authority<'_>,
        amount: u64,
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }

        let cpi_accounts = Transfer {
            from: self.account_info(from)?,
            to: self.account_info(to)?,
            authority: self.account_info(&authority.key())?,
        };
        match authority {
            Authority::Holder(_) => token::transfer(
                CpiContext::new(self.token_program.clone(), cpi_accounts),
                amount,
            ),
            Authority::Pool(signer) => {
                let seeds = signer.seeds();
                let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];
                token::transfer(
                    CpiContext::new_with_signer(
                        self.token_program.clone(),
                        cpi_accounts,
                        signer_seeds,
                    ),
                    amount,
                )
            }
        }
    }

    fn mint_to(
        &mut self,
        mint: &Pubkey,
        to: &Pubkey,
        authority: Authority<'_>,
        amount: u64,
    ) -> Result<()> {
        let cpi_accounts = MintTo {
            mint: self.account_info(mint)?,
            to: self.account_info(to)?,
            authority: self.account_info(&authority.key())?,
        };
        match authority {
            Authority::Holder(_) => token::mint_to(
                CpiContext::new(self.token_program.clone(), cpi_accounts),
                amount,
            ),
            Authority::Pool(signer) => {
                let seeds = signer.seeds();
                let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];
                token::mint_to(
                    CpiContext::new_with_signer(
                        self.token_program.clone(),
                        cpi_accounts,
                        signer_seeds,
                    ),
                    amount,
                )
            }
        }
    }

    fn burn(
        &mut self,
        mint: &Pubkey,
        from: &Pubkey,
        authority: Authority<'_>,
        amount: u64,
    ) -> Result<()> {
        let cpi_accounts = Burn {
            mint: self.account_info(mint)?,
            from: self.account_info(from)?,
            authority: self.account_info(&authority.key())?,
        };
        match authority {
            Authority::Holder(_) => token::burn(
                CpiContext::new(self.token_program.clone(), cpi_accounts),
                amount,
            ),
            Authority::Pool(signer) => {
                let seeds = signer.seeds();
                let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];
                token::burn(
                    CpiContext::new_with_signer(
                        self.token_program.clone(),
                        cpi_accounts,
                        signer_seeds,
                    ),
                    amount,
                )
            }
        }
    }
}
