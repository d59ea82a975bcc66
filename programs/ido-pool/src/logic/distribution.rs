//! Pro-rata base distribution
//!
//! A redemption burns `claim_amount` claims and pays
//!
//! ```text
//! payout = floor(claim_amount * base_remaining / claim_supply)
//! ```
//!
//! with the product taken in `u128`. Before the first redemption
//! `base_remaining` is the full allocation and `claim_supply` equals the
//! quote raised, so the first payout is `claim_amount * allocation / raised`.
//! Each later redemption divides what is left by the claims that are left,
//! which keeps the per-unit rate stable up to floor rounding and hands the
//! last redeemer exactly the remaining base.

use crate::utils::math_safe::{to_u64, SafeMath};
use anchor_lang::prelude::*;

pub fn base_payout(claim_amount: u64, base_remaining: u64, claim_supply: u64) -> Result<u64> {
    let payout = (claim_amount as u128)
        .safe_mul(base_remaining as u128)?
        .safe_div(claim_supply as u128)?;
    to_u64(payout)
}
