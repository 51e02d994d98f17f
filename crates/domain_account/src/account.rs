//! The account aggregate
//!
//! An account carries its balance, pending interest, and embedded limit
//! tracker. Only the ledger core mutates the balance; the methods here cover
//! opening rules and the interest accrual/capitalization cycle.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, Money, Timezone};

use crate::error::AccountError;
use crate::interest::InterestStrategy;
use crate::limits::{LimitTracker, TransactionLimits};

/// Minimum opening deposit for savings accounts
pub const SAVINGS_MINIMUM_OPENING_DEPOSIT: Decimal = dec!(100);

/// Days used to prorate annual interest
const DAYS_PER_YEAR: Decimal = dec!(365);

/// Account product type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Checking,
    Savings,
}

/// Account lifecycle status
///
/// Read by the core but not yet gated on; account-management operations that
/// freeze or close accounts live outside this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    Active,
    Frozen,
    Closed,
}

/// A customer account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Display name of the owner
    pub owner_name: String,
    /// Product type
    pub account_type: AccountType,
    /// Lifecycle status
    pub status: AccountStatus,
    /// Current balance; mutated only by the ledger core
    pub balance: Money,
    /// Interest computed but not yet capitalized
    pub accrued_interest: Money,
    /// Assigned interest strategy
    pub interest_strategy: InterestStrategy,
    /// Rolling limit counters and thresholds
    pub limits: LimitTracker,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// High-water mark of interest accrual
    pub last_accrual: Option<DateTime<Utc>>,
}

impl Account {
    /// Opens a new account with a validated initial deposit
    ///
    /// # Errors
    ///
    /// - `NegativeInitialDeposit` if the deposit is below zero
    /// - `MinimumOpeningDeposit` if a savings account is opened with less
    ///   than the required minimum
    pub fn open(
        account_type: AccountType,
        owner_name: impl Into<String>,
        initial_deposit: Money,
    ) -> Result<Self, AccountError> {
        if initial_deposit.is_negative() {
            return Err(AccountError::NegativeInitialDeposit {
                offered: initial_deposit.amount(),
            });
        }

        if account_type == AccountType::Savings
            && initial_deposit.amount() < SAVINGS_MINIMUM_OPENING_DEPOSIT
        {
            return Err(AccountError::MinimumOpeningDeposit {
                required: SAVINGS_MINIMUM_OPENING_DEPOSIT,
                offered: initial_deposit.amount(),
            });
        }

        let currency = initial_deposit.currency();

        Ok(Self {
            id: AccountId::new(),
            owner_name: owner_name.into(),
            account_type,
            status: AccountStatus::Active,
            balance: initial_deposit,
            accrued_interest: Money::zero(currency),
            interest_strategy: InterestStrategy::default_for(account_type),
            limits: LimitTracker::default(),
            created_at: Utc::now(),
            last_accrual: None,
        })
    }

    /// Replaces the limit thresholds
    pub fn with_limits(mut self, limits: TransactionLimits) -> Self {
        self.limits = LimitTracker::new(limits, Timezone::default());
        self
    }

    /// Replaces the interest strategy
    pub fn with_strategy(mut self, strategy: InterestStrategy) -> Self {
        self.interest_strategy = strategy;
        self
    }

    /// Accrues interest up to `as_of` and returns the newly accrued amount
    ///
    /// Interest is the strategy's annual figure prorated by whole days
    /// elapsed since the last accrual (or creation). Calling again with the
    /// same `as_of` accrues nothing; calling with an advancing date keeps
    /// accumulating.
    pub fn accrue_interest(&mut self, as_of: DateTime<Utc>) -> Result<Money, AccountError> {
        let basis = self.last_accrual.unwrap_or(self.created_at);
        let days = (as_of - basis).num_days();
        if days <= 0 {
            return Ok(Money::zero(self.balance.currency()));
        }

        let annual = self.interest_strategy.annual_interest(self.balance);
        let accrued = annual.multiply(Decimal::from(days) / DAYS_PER_YEAR);

        self.accrued_interest = self.accrued_interest.checked_add(&accrued)?;
        self.last_accrual = Some(as_of);

        Ok(accrued)
    }

    /// Moves accrued interest into the balance and returns the amount applied
    ///
    /// Idempotent once the accrual is zero: a second call without an
    /// intervening accrual applies nothing.
    pub fn capitalize_interest(&mut self) -> Result<Money, AccountError> {
        let applied = self.accrued_interest;
        self.balance = self.balance.checked_add(&applied)?;
        self.accrued_interest = Money::zero(self.balance.currency());
        Ok(applied)
    }
}
