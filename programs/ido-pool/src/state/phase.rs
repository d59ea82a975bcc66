//! Pool phase tracking
//!
//! The phase is never stored. It is derived from the clock and the pool's
//! three timestamps every time an operation is gated, so there is no flag
//! that can be left unflipped.

use crate::error::IdoPoolError;
use anchor_lang::prelude::*;

/// Pool lifecycle phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
#[repr(u8)]
pub enum PoolPhase {
    /// Before `start_ts` - nothing is permitted
    Pending,

    /// `start_ts <= t < end_deposits_ts` - deposits and undo-deposits
    Deposit,

    /// `end_deposits_ts <= t < end_ido_ts` - quiet window, quote total is frozen
    Locked,

    /// `t >= end_ido_ts` - base redemption and quote sweep
    Distribution,
}

/// The exchange operations subject to the phase gate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolOperation {
    Deposit,
    UndoDeposit,
    RedeemForBase,
    SweepQuote,
}

/// When the distribution authority may sweep the quote vault
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace)]
#[repr(u8)]
pub enum SweepPolicy {
    /// Only once distribution has begun
    #[default]
    Distribution,

    /// As soon as deposits close (Locked or Distribution)
    AfterDeposits,
}

impl SweepPolicy {
    pub fn permits(&self, phase: PoolPhase) -> bool {
        match self {
            SweepPolicy::Distribution => phase == PoolPhase::Distribution,
            SweepPolicy::AfterDeposits => {
                matches!(phase, PoolPhase::Locked | PoolPhase::Distribution)
            }
        }
    }
}

impl PoolPhase {
    /// Check if phase allows deposit and undo-deposit
    pub fn allows_deposits(&self) -> bool {
        matches!(self, PoolPhase::Deposit)
    }

    /// Check if phase allows claims to be redeemed for base
    pub fn allows_redemption(&self) -> bool {
        matches!(self, PoolPhase::Distribution)
    }

    pub fn permits(&self, operation: PoolOperation, sweep_policy: SweepPolicy) -> bool {
        match operation {
            PoolOperation::Deposit | PoolOperation::UndoDeposit => self.allows_deposits(),
            PoolOperation::RedeemForBase => self.allows_redemption(),
            PoolOperation::SweepQuote => sweep_policy.permits(*self),
        }
    }
}

/// Phase boundaries, inclusive at start and exclusive at end
#[derive(Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct PhaseSchedule {
    pub start_ts: i64,
    pub end_deposits_ts: i64,
    pub end_ido_ts: i64,
}

impl PhaseSchedule {
    pub fn phase_at(&self, now: i64) -> PoolPhase {
        if now < self.start_ts {
            PoolPhase::Pending
        } else if now < self.end_deposits_ts {
            PoolPhase::Deposit
        } else if now < self.end_ido_ts {
            PoolPhase::Locked
        } else {
            PoolPhase::Distribution
        }
    }

    /// Boundaries must be strictly increasing and the pool must open in the future
    pub fn validate(&self, now: i64) -> Result<()> {
        if !(self.start_ts < self.end_deposits_ts && self.end_deposits_ts < self.end_ido_ts) {
            msg!(
                "Schedule out of order: start={} end_deposits={} end_ido={}",
                self.start_ts,
                self.end_deposits_ts,
                self.end_ido_ts
            );
            return err!(IdoPoolError::InvalidConfiguration);
        }
        if self.start_ts <= now {
            msg!("Pool must open in the future: start={} now={}", self.start_ts, now);
            return err!(IdoPoolError::InvalidConfiguration);
        }
        Ok(())
    }
}
