//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the ledger.
//! These fixtures are designed to be consistent and predictable for unit
//! tests.

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{AccountId, Currency, Money, Rate};
use domain_account::{InterestStrategy, TransactionLimits};

/// Stable owner names for tests that assert on specific accounts
pub static OWNER_NAMES: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["Alice Auma", "Brian Okello", "Clare Nankya", "David Ssewanyana"]);

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Creates a standard USD amount for testing
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// Creates the savings minimum opening deposit
    pub fn usd_opening_deposit() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// Creates a large balance for limit tests
    pub fn usd_large_balance() -> Money {
        Money::new(dec!(10000.00), Currency::USD)
    }

    /// Creates a zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// Creates a EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }

    /// Creates a UGX amount (zero decimal places)
    pub fn ugx_10000() -> Money {
        Money::new(dec!(10000), Currency::UGX)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard account opening instant (Jan 1, 2025)
    pub fn account_opened() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    /// Ten days after opening, a round accrual horizon
    pub fn ten_days_later() -> DateTime<Utc> {
        Self::account_opened() + chrono::Duration::days(10)
    }

    /// One year after opening, a full annual accrual horizon
    pub fn one_year_later() -> DateTime<Utc> {
        Self::account_opened() + chrono::Duration::days(365)
    }

    /// Mid-month timestamp for statement period containment tests
    pub fn mid_june() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic account ID for testing
    pub fn account_id() -> AccountId {
        AccountId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a second deterministic account ID for transfer tests
    pub fn counterparty_id() -> AccountId {
        AccountId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }
}

/// Fixture for interest configuration
pub struct InterestFixtures;

impl InterestFixtures {
    /// 3.65% annual rate; accrues exactly 0.01% of balance per day
    pub fn daily_penny_rate() -> InterestStrategy {
        InterestStrategy::FixedRate {
            rate: Rate::new(dec!(0.0365)),
        }
    }

    /// Rate that accrues nothing, for tests isolating non-interest behavior
    pub fn zero_rate() -> InterestStrategy {
        InterestStrategy::FixedRate {
            rate: Rate::new(dec!(0)),
        }
    }

    /// The standard two-band tiered strategy
    pub fn tiered() -> InterestStrategy {
        InterestStrategy::standard_tiered()
    }
}

/// Fixture for limit configuration
pub struct LimitFixtures;

impl LimitFixtures {
    /// Tight limits for breach tests
    pub fn tight() -> TransactionLimits {
        TransactionLimits {
            daily_withdrawal_limit: dec!(100),
            daily_transfer_limit: dec!(200),
            monthly_withdrawal_count: 3,
            minimum_balance: dec!(0),
        }
    }

    /// Limits with a balance floor
    pub fn with_floor(minimum_balance: rust_decimal::Decimal) -> TransactionLimits {
        TransactionLimits {
            minimum_balance,
            ..TransactionLimits::default()
        }
    }
}
