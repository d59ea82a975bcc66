//! Program-derived pool signer
//!
//! A capability rather than a key: the address has no private key and can
//! only authorize CPIs issued by this program with the seeds below. It owns
//! the vaults and the claim mint authority and never holds funds itself.

use crate::{constants::POOL_SIGNER_SEED, error::IdoPoolError, state::PoolAccount};
use anchor_lang::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolSigner {
    pool: Pubkey,
    bump: u8,
    address: Pubkey,
}

impl PoolSigner {
    /// Derive the canonical signer for `pool`
    pub fn derive(pool: &Pubkey, program_id: &Pubkey) -> Self {
        let (address, bump) =
            Pubkey::find_program_address(&[POOL_SIGNER_SEED, pool.as_ref()], program_id);
        Self {
            pool: *pool,
            bump,
            address,
        }
    }

    /// Rebuild the signer recorded on an initialized pool
    pub fn from_record(pool: &Pubkey, record: &PoolAccount) -> Self {
        Self {
            pool: *pool,
            bump: record.pool_signer_bump,
            address: record.pool_signer,
        }
    }

    /// Re-derive the address from the seeds and compare
    pub fn verify(&self, program_id: &Pubkey) -> Result<()> {
        let derived = Pubkey::create_program_address(&self.seeds(), program_id)
            .map_err(|_| error!(IdoPoolError::InvalidPoolSigner))?;
        require_keys_eq!(derived, self.address, IdoPoolError::InvalidPoolSigner);
        Ok(())
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn pool(&self) -> Pubkey {
        self.pool
    }

    pub fn bump(&self) -> u8 {
        self.bump
    }

    /// Seeds for `invoke_signed`, borrowed from the signer
    pub fn seeds(&self) -> [&[u8]; 3] {
        [
            POOL_SIGNER_SEED,
            self.pool.as_ref(),
            std::slice::from_ref(&self.bump),
        ]
    }
}
