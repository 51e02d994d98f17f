//! Interest strategies
//!
//! A closed set of strategy variants dispatched through one method. Swapping
//! the strategy on an account is a field assignment; it never recomputes past
//! accrual.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, Rate};

use crate::account::AccountType;

/// One band of a tiered rate: `rate` applies to the slice of balance up to
/// `up_to` (exclusive upper bound); `None` marks the open-ended top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBand {
    pub up_to: Option<Decimal>,
    pub rate: Rate,
}

/// How annual interest is computed for a balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterestStrategy {
    /// Balance times a constant annual rate
    FixedRate { rate: Rate },
    /// Progressive bands, each rate applying only to its slice of the balance
    Tiered { bands: Vec<TierBand> },
}

impl InterestStrategy {
    /// Type-based default assigned at account opening
    pub fn default_for(account_type: AccountType) -> Self {
        match account_type {
            AccountType::Savings => InterestStrategy::FixedRate {
                rate: Rate::new(dec!(0.02)),
            },
            AccountType::Checking => InterestStrategy::FixedRate {
                rate: Rate::new(dec!(0.005)),
            },
        }
    }

    /// The standard tiered schedule: 1% on the first 1000, 2% above
    pub fn standard_tiered() -> Self {
        InterestStrategy::Tiered {
            bands: vec![
                TierBand {
                    up_to: Some(dec!(1000)),
                    rate: Rate::new(dec!(0.01)),
                },
                TierBand {
                    up_to: None,
                    rate: Rate::new(dec!(0.02)),
                },
            ],
        }
    }

    /// Annual interest earned by `balance` under this strategy
    ///
    /// Negative balances earn nothing.
    pub fn annual_interest(&self, balance: Money) -> Money {
        let currency = balance.currency();
        if !balance.is_positive() {
            return Money::zero(currency);
        }

        match self {
            InterestStrategy::FixedRate { rate } => rate.apply(&balance),
            InterestStrategy::Tiered { bands } => {
                let mut remaining = balance.amount();
                let mut floor = Decimal::ZERO;
                let mut interest = Money::zero(currency);

                for band in bands {
                    let slice = match band.up_to {
                        Some(cap) => (cap - floor).min(remaining),
                        None => remaining,
                    };
                    if slice <= Decimal::ZERO {
                        break;
                    }
                    interest = interest + band.rate.apply(&Money::new(slice, currency));
                    remaining -= slice;
                    if let Some(cap) = band.up_to {
                        floor = cap;
                    }
                    if remaining.is_zero() {
                        break;
                    }
                }

                interest
            }
        }
    }
}
