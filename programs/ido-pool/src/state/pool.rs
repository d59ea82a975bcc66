use crate::{
    error::IdoPoolError,
    state::phase::{PhaseSchedule, PoolOperation, PoolPhase, SweepPolicy},
};
use anchor_lang::prelude::*;

/// Pool record, written once by `initialize_pool` and never mutated.
///
/// Running totals are deliberately absent: the quote raised, the base left
/// and the claims outstanding are the vault balances and the claim supply.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct PoolAccount {
    /// Identity permitted to sweep the quote vault
    pub distribution_authority: Pubkey,

    /// Token being distributed
    pub base_mint: Pubkey,
    /// Token being raised
    pub quote_mint: Pubkey,
    /// Claim token minted 1:1 against deposits
    pub claim_mint: Pubkey,

    /// Program-owned base vault
    pub base_vault: Pubkey,
    /// Program-owned quote vault
    pub quote_vault: Pubkey,

    /// PDA owning both vaults and the claim mint authority
    pub pool_signer: Pubkey,
    /// Canonical bump for `pool_signer`
    pub pool_signer_bump: u8,

    /// Base tokens deposited at initialization
    pub base_allocation: u64,

    pub start_ts: i64,
    pub end_deposits_ts: i64,
    pub end_ido_ts: i64,

    pub sweep_policy: SweepPolicy,
}

/// Caller supplied configuration for `initialize_pool`
#[derive(Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct InitializePoolParams {
    pub base_allocation: u64,
    pub start_ts: i64,
    pub end_deposits_ts: i64,
    pub end_ido_ts: i64,
    pub sweep_policy: SweepPolicy,
}

impl InitializePoolParams {
    pub fn schedule(&self) -> PhaseSchedule {
        PhaseSchedule {
            start_ts: self.start_ts,
            end_deposits_ts: self.end_deposits_ts,
            end_ido_ts: self.end_ido_ts,
        }
    }

    pub fn validate(&self, now: i64) -> Result<()> {
        if self.base_allocation == 0 {
            msg!("Base allocation must be positive");
            return err!(IdoPoolError::InvalidConfiguration);
        }
        self.schedule().validate(now)
    }
}

impl PoolAccount {
    pub fn schedule(&self) -> PhaseSchedule {
        PhaseSchedule {
            start_ts: self.start_ts,
            end_deposits_ts: self.end_deposits_ts,
            end_ido_ts: self.end_ido_ts,
        }
    }

    pub fn phase_at(&self, now: i64) -> PoolPhase {
        self.schedule().phase_at(now)
    }

    /// Gate `operation` on the phase at `now`
    pub fn require_phase(&self, now: i64, operation: PoolOperation) -> Result<PoolPhase> {
        let phase = self.phase_at(now);
        if !phase.permits(operation, self.sweep_policy) {
            msg!("{:?} rejected in phase {:?} at {}", operation, phase, now);
            return err!(IdoPoolError::PhaseViolation);
        }
        Ok(phase)
    }
}
