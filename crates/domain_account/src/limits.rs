//! Per-account transaction limits with rolling windows
//!
//! Daily totals reset at the local-day boundary and the monthly withdrawal
//! count resets at the local-month boundary. Resets are evaluated lazily on
//! first access in a new window; there is no background timer.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::Timezone;

/// Configured thresholds for one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLimits {
    /// Maximum total withdrawn per local day
    pub daily_withdrawal_limit: Decimal,
    /// Maximum total transferred out per local day
    pub daily_transfer_limit: Decimal,
    /// Maximum number of withdrawals per local month
    pub monthly_withdrawal_count: u32,
    /// Balance floor a withdrawal or transfer may not breach
    pub minimum_balance: Decimal,
}

impl Default for TransactionLimits {
    fn default() -> Self {
        Self {
            daily_withdrawal_limit: dec!(1000),
            daily_transfer_limit: dec!(2000),
            monthly_withdrawal_count: 30,
            minimum_balance: Decimal::ZERO,
        }
    }
}

/// A limit check that failed
///
/// Carries the threshold, prior usage, and attempted amount so callers can
/// build a message without re-querying the account.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LimitBreach {
    #[error("daily withdrawal limit exceeded: limit {limit}, used {used}, attempted {attempted}")]
    DailyWithdrawal {
        limit: Decimal,
        used: Decimal,
        attempted: Decimal,
    },

    #[error("daily transfer limit exceeded: limit {limit}, used {used}, attempted {attempted}")]
    DailyTransfer {
        limit: Decimal,
        used: Decimal,
        attempted: Decimal,
    },

    #[error("monthly withdrawal count exceeded: limit {limit}, used {used}")]
    MonthlyWithdrawalCount { limit: u32, used: u32 },
}

impl LimitBreach {
    /// Short name of the breached limit, for log fields and API payloads
    pub fn limit_name(&self) -> &'static str {
        match self {
            LimitBreach::DailyWithdrawal { .. } => "daily_withdrawal_limit",
            LimitBreach::DailyTransfer { .. } => "daily_transfer_limit",
            LimitBreach::MonthlyWithdrawalCount { .. } => "monthly_withdrawal_count",
        }
    }
}

/// Usage snapshot for one window, derived as `limit - used`
///
/// `remaining` may be negative after a limit is lowered below current usage;
/// gating checks reject before totals exceed the configured limit, so a
/// negative value is introspection-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLine {
    pub limit: Decimal,
    pub used: Decimal,
    pub remaining: Decimal,
}

/// Full limit usage report for one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitUsage {
    pub daily_withdrawal: UsageLine,
    pub daily_transfer: UsageLine,
    pub monthly_withdrawal_count: UsageLine,
    pub minimum_balance: Decimal,
}

/// Rolling usage counters for one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitTracker {
    limits: TransactionLimits,
    timezone: Timezone,
    daily_withdrawal_total: Decimal,
    daily_transfer_total: Decimal,
    monthly_withdrawals_used: u32,
    /// Local day the daily totals belong to
    day_window: Option<NaiveDate>,
    /// Local (year, month) the monthly count belongs to
    month_window: Option<(i32, u32)>,
}

impl LimitTracker {
    pub fn new(limits: TransactionLimits, timezone: Timezone) -> Self {
        Self {
            limits,
            timezone,
            daily_withdrawal_total: Decimal::ZERO,
            daily_transfer_total: Decimal::ZERO,
            monthly_withdrawals_used: 0,
            day_window: None,
            month_window: None,
        }
    }

    pub fn limits(&self) -> &TransactionLimits {
        &self.limits
    }

    /// Replaces the configured thresholds; usage counters are unaffected
    pub fn set_limits(&mut self, limits: TransactionLimits) {
        self.limits = limits;
    }

    /// Resets any counter whose window has rolled over
    ///
    /// Called on every check/record/query so resets happen on first access in
    /// a new window.
    fn roll_windows(&mut self, now: DateTime<Utc>) {
        let today = self.timezone.local_date(now);
        if self.day_window != Some(today) {
            self.daily_withdrawal_total = Decimal::ZERO;
            self.daily_transfer_total = Decimal::ZERO;
            self.day_window = Some(today);
        }

        let this_month = self.timezone.local_month(now);
        if self.month_window != Some(this_month) {
            self.monthly_withdrawals_used = 0;
            self.month_window = Some(this_month);
        }
    }

    /// Checks whether a withdrawal of `amount` is allowed right now
    pub fn check_withdrawal(
        &mut self,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), LimitBreach> {
        self.roll_windows(now);

        if self.daily_withdrawal_total + amount > self.limits.daily_withdrawal_limit {
            return Err(LimitBreach::DailyWithdrawal {
                limit: self.limits.daily_withdrawal_limit,
                used: self.daily_withdrawal_total,
                attempted: amount,
            });
        }

        if self.monthly_withdrawals_used + 1 > self.limits.monthly_withdrawal_count {
            return Err(LimitBreach::MonthlyWithdrawalCount {
                limit: self.limits.monthly_withdrawal_count,
                used: self.monthly_withdrawals_used,
            });
        }

        Ok(())
    }

    /// Records usage after a withdrawal succeeds
    pub fn record_withdrawal(&mut self, amount: Decimal, now: DateTime<Utc>) {
        self.roll_windows(now);
        self.daily_withdrawal_total += amount;
        self.monthly_withdrawals_used += 1;
    }

    /// Checks whether an outbound transfer of `amount` is allowed right now
    pub fn check_transfer(
        &mut self,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), LimitBreach> {
        self.roll_windows(now);

        if self.daily_transfer_total + amount > self.limits.daily_transfer_limit {
            return Err(LimitBreach::DailyTransfer {
                limit: self.limits.daily_transfer_limit,
                used: self.daily_transfer_total,
                attempted: amount,
            });
        }

        Ok(())
    }

    /// Records usage after a transfer succeeds
    pub fn record_transfer(&mut self, amount: Decimal, now: DateTime<Utc>) {
        self.roll_windows(now);
        self.daily_transfer_total += amount;
    }

    /// Remaining daily withdrawal capacity (`limit - used`, may be negative)
    pub fn remaining_daily_withdrawal(&mut self, now: DateTime<Utc>) -> Decimal {
        self.roll_windows(now);
        self.limits.daily_withdrawal_limit - self.daily_withdrawal_total
    }

    /// Remaining daily transfer capacity (`limit - used`, may be negative)
    pub fn remaining_daily_transfer(&mut self, now: DateTime<Utc>) -> Decimal {
        self.roll_windows(now);
        self.limits.daily_transfer_limit - self.daily_transfer_total
    }

    /// Remaining monthly withdrawal count (`limit - used`, may be negative)
    pub fn remaining_monthly_withdrawals(&mut self, now: DateTime<Utc>) -> i64 {
        self.roll_windows(now);
        i64::from(self.limits.monthly_withdrawal_count) - i64::from(self.monthly_withdrawals_used)
    }

    /// Full usage report for introspection endpoints
    pub fn usage(&mut self, now: DateTime<Utc>) -> LimitUsage {
        self.roll_windows(now);
        LimitUsage {
            daily_withdrawal: UsageLine {
                limit: self.limits.daily_withdrawal_limit,
                used: self.daily_withdrawal_total,
                remaining: self.limits.daily_withdrawal_limit - self.daily_withdrawal_total,
            },
            daily_transfer: UsageLine {
                limit: self.limits.daily_transfer_limit,
                used: self.daily_transfer_total,
                remaining: self.limits.daily_transfer_limit - self.daily_transfer_total,
            },
            monthly_withdrawal_count: UsageLine {
                limit: Decimal::from(self.limits.monthly_withdrawal_count),
                used: Decimal::from(self.monthly_withdrawals_used),
                remaining: Decimal::from(self.limits.monthly_withdrawal_count)
                    - Decimal::from(self.monthly_withdrawals_used),
            },
            minimum_balance: self.limits.minimum_balance,
        }
    }
}

impl Default for LimitTracker {
    fn default() -> Self {
        Self::new(TransactionLimits::default(), Timezone::default())
    }
}
