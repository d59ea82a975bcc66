//! Token ledger abstraction
//!
//! The exchange engine only needs four primitives from the token layer:
//! read an account or mint, `transfer`, `mint_to` and `burn`. Each call is
//! atomic and fails with `InsufficientFunds` when the source is short.
//! On-chain the primitives are SPL token CPIs; on the host they are served
//! by an in-memory ledger.

use crate::signer::PoolSigner;
use anchor_lang::prelude::*;

pub mod spl;
pub use spl::SplTokenLedger;

#[cfg(not(target_os = "solana"))]
pub mod memory;
#[cfg(not(target_os = "solana"))]
pub use memory::InMemoryLedger;

/// Snapshot of a token account
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenAccountView {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

/// Snapshot of a mint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintView {
    pub mint_authority: Option<Pubkey>,
    pub supply: u64,
    pub decimals: u8,
}

/// Who authorizes a ledger mutation
#[derive(Clone, Copy, Debug)]
pub enum Authority<'a> {
    /// A transaction signer acting on its own accounts
    Holder(Pubkey),
    /// The program-derived pool signer
    Pool(&'a PoolSigner),
}

impl Authority<'_> {
    pub fn key(&self) -> Pubkey {
        match self {
            Authority::Holder(key) => *key,
            Authority::Pool(signer) => signer.address(),
        }
    }
}

pub trait TokenLedger {
    fn token_account(&self, address: &Pubkey) -> Result<TokenAccountView>;

    fn mint(&self, address: &Pubkey) -> Result<MintView>;

    fn transfer(
        &mut self,
        from: &Pubkey,
        to: &Pubkey,
        authority: Authority<'_>,
        amount: u64,
    ) -> Result<()>;

    fn mint_to(
        &mut self,
        mint: &Pubkey,
        to: &Pubkey,
        authority: Authority<'_>,
        amount: u64,
    ) -> Result<()>;

    fn burn(
        &mut self,
        mint: &Pubkey,
        from: &Pubkey,
        authority: Authority<'_>,
        amount: u64,
    ) -> Result<()>;
}
