/// Clock sources for phase gating
use anchor_lang::prelude::*;

/// Anything that can report the current unix timestamp.
///
/// Implementations must be monotonically non-decreasing.
pub trait ClockSource {
    fn unix_timestamp(&self) -> Result<i64>;
}

/// Reads the Solana clock sysvar
#[derive(Clone, Copy, Debug, Default)]
pub struct SysvarClock;

impl ClockSource for SysvarClock {
    fn unix_timestamp(&self) -> Result<i64> {
        let clock = Clock::get()?;
        Ok(clock.unix_timestamp)
    }
}

/// A clock frozen at a timestamp already read by the caller
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub i64);

impl ClockSource for FixedClock {
    fn unix_timestamp(&self) -> Result<i64> {
        Ok(self.0)
    }
}
