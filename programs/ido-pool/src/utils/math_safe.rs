/// Overflow-safe arithmetic for balance and payout calculations.
/// Every failure is logged with its operands and surfaces as
/// `ArithmeticOverflow` instead of wrapping or panicking.
use crate::error::IdoPoolError;
use anchor_lang::prelude::*;

pub trait SafeMath<T> {
    fn safe_add(self, v: T) -> Result<T>;
    fn safe_sub(self, v: T) -> Result<T>;
    fn safe_mul(self, v: T) -> Result<T>;
    fn safe_div(self, v: T) -> Result<T>;
}

macro_rules! impl_safe_math {
    ($type:ty) => {
        impl SafeMath<$type> for $type {
            fn safe_add(self, v: $type) -> Result<$type> {
                self.checked_add(v).ok_or_else(|| {
                    msg!("Math overflow in safe_add: {} + {}", self, v);
                    IdoPoolError::ArithmeticOverflow.into()
                })
            }

            fn safe_sub(self, v: $type) -> Result<$type> {
                self.checked_sub(v).ok_or_else(|| {
                    msg!("Math underflow in safe_sub: {} - {}", self, v);
                    IdoPoolError::ArithmeticOverflow.into()
                })
            }

            fn safe_mul(self, v: $type) -> Result<$type> {
                self.checked_mul(v).ok_or_else(|| {
                    msg!("Math overflow in safe_mul: {} * {}", self, v);
                    IdoPoolError::ArithmeticOverflow.into()
                })
            }

            fn safe_div(self, v: $type) -> Result<$type> {
                if v == 0 {
                    msg!("Division by zero in safe_div: {} / {}", self, v);
                    return Err(IdoPoolError::ArithmeticOverflow.into());
                }
                self.checked_div(v).ok_or_else(|| {
                    msg!("Math error in safe_div: {} / {}", self, v);
                    IdoPoolError::ArithmeticOverflow.into()
                })
            }
        }
    };
}

impl_safe_math!(u64);
impl_safe_math!(u128);

/// Narrow a wide intermediate back to a token amount
pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        msg!("Value {} does not fit in u64", value);
        IdoPoolError::ArithmeticOverflow.into()
    })
}
