//! The ledger core
//!
//! Orchestrates deposits, withdrawals, transfers, limit management, and the
//! interest cycle over the two store ports. Each operation is a critical
//! section scoped to the account(s) it touches.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use core_kernel::{AccountId, Money};
use domain_account::{
    Account, AccountType, InterestStrategy, LimitUsage, TransactionLimits,
};

use crate::error::LedgerError;
use crate::store::{AccountStore, StoreError, TransactionLog};
use crate::transaction::Transaction;

/// The authoritative ledger instance
///
/// Designed for a single-process, multi-threaded caller. Operations on the
/// same account are serialized through a per-account lock registry;
/// operations on different accounts proceed in parallel. Transfers take both
/// account sections in ascending account-id order so two opposing transfers
/// can never deadlock.
pub struct Ledger {
    accounts: Arc<dyn AccountStore>,
    transactions: Arc<dyn TransactionLog>,
    locks: Mutex<HashMap<AccountId, Arc<Mutex<()>>>>,
}

impl Ledger {
    /// Creates a ledger over the given store implementations
    pub fn new(accounts: Arc<dyn AccountStore>, transactions: Arc<dyn TransactionLog>) -> Self {
        Self {
            accounts,
            transactions,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the shared lock handle for an account id
    ///
    /// Handles nobody currently holds are evicted on the way through, so the
    /// registry tracks live contention rather than every id ever seen.
    fn lock_handle(&self, id: AccountId) -> Arc<Mutex<()>> {
        let mut registry = self.locks.lock().expect("lock registry poisoned");
        registry.retain(|_, handle| Arc::strong_count(handle) > 1);
        registry.entry(id).or_default().clone()
    }

    fn load(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.accounts
            .get(id)?
            .ok_or(LedgerError::AccountNotFound(id))
    }

    /// Opens a new account and persists it
    ///
    /// Account-opening rules (non-negative deposit, savings minimum) are
    /// enforced by `Account::open`. The opening balance is set directly; no
    /// transaction record is written for it.
    pub fn open_account(
        &self,
        account_type: AccountType,
        owner_name: impl Into<String>,
        initial_deposit: Money,
    ) -> Result<Account, LedgerError> {
        let account = Account::open(account_type, owner_name, initial_deposit)?;
        self.accounts.put(account.clone())?;

        tracing::info!(
            account = %account.id,
            account_type = ?account.account_type,
            balance = %account.balance,
            "account opened"
        );
        Ok(account)
    }

    /// Deposits a positive amount into an account
    ///
    /// On success the balance increases by exactly `amount` and one deposit
    /// record is appended. Validation failures leave no trace.
    pub fn deposit(
        &self,
        account_id: AccountId,
        amount: Money,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount {
                amount: amount.amount(),
            });
        }

        let handle = self.lock_handle(account_id);
        let _guard = handle.lock().expect("account lock poisoned");

        let mut account = self.load(account_id)?;
        account.balance = account.balance.checked_add(&amount)?;

        let tx = Transaction::deposit(account_id, amount).with_description(description);
        self.accounts.put(account)?;
        self.transactions.append(tx.clone())?;

        tracing::info!(account = %account_id, amount = %amount, "deposit recorded");
        Ok(tx)
    }

    /// Withdraws a positive amount from an account
    ///
    /// Checks run in order before any mutation: sufficient funds, minimum
    /// balance after withdrawal, daily withdrawal limit, monthly withdrawal
    /// count. Any failing check aborts with the specific error and leaves
    /// balance, log, and limit counters untouched.
    pub fn withdraw(
        &self,
        account_id: AccountId,
        amount: Money,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount {
                amount: amount.amount(),
            });
        }

        let handle = self.lock_handle(account_id);
        let _guard = handle.lock().expect("account lock poisoned");

        let mut account = self.load(account_id)?;

        let resulting = account.balance.checked_sub(&amount)?;
        if resulting.is_negative() {
            return Err(LedgerError::InsufficientFunds {
                account_id,
                balance: account.balance.amount(),
                attempted: amount.amount(),
            });
        }

        let minimum = account.limits.limits().minimum_balance;
        if resulting.amount() < minimum {
            return Err(LedgerError::MinimumBalanceBreached {
                account_id,
                minimum,
                resulting: resulting.amount(),
            });
        }

        let now = Utc::now();
        account
            .limits
            .check_withdrawal(amount.amount(), now)
            .map_err(|breach| LedgerError::LimitExceeded { account_id, breach })?;

        account.balance = resulting;
        account.limits.record_withdrawal(amount.amount(), now);

        let tx = Transaction::withdrawal(account_id, amount).with_description(description);
        self.accounts.put(account)?;
        self.transactions.append(tx.clone())?;

        tracing::info!(account = %account_id, amount = %amount, "withdrawal recorded");
        Ok(tx)
    }

    /// Transfers a positive amount between two accounts
    ///
    /// Both balance changes are computed in memory before anything is
    /// persisted; the two account writes and two log appends then run as one
    /// logical unit. A store failure inside that sequence surfaces as
    /// `TransferFailed` naming the stage reached - recovery is the caller's
    /// responsibility.
    ///
    /// A same-account transfer is permitted: it is a net no-op on the balance
    /// but still produces both transfer records.
    pub fn transfer(
        &self,
        source_id: AccountId,
        destination_id: AccountId,
        amount: Money,
        description: Option<String>,
    ) -> Result<(Transaction, Transaction), LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount {
                amount: amount.amount(),
            });
        }

        // Deterministic acquisition order prevents deadlock between two
        // opposing transfers.
        let (lo, hi) = if source_id <= destination_id {
            (source_id, destination_id)
        } else {
            (destination_id, source_id)
        };
        let lo_handle = self.lock_handle(lo);
        let hi_handle = (lo != hi).then(|| self.lock_handle(hi));
        let _lo_guard = lo_handle.lock().expect("account lock poisoned");
        let _hi_guard: Option<MutexGuard<'_, ()>> = hi_handle
            .as_ref()
            .map(|h| h.lock().expect("account lock poisoned"));

        // Source resolved first, then destination, before any other check
        let mut source = self.load(source_id)?;
        let mut destination = if source_id == destination_id {
            None
        } else {
            Some(self.load(destination_id)?)
        };

        let debited = source.balance.checked_sub(&amount)?;
        if debited.is_negative() {
            return Err(LedgerError::InsufficientFunds {
                account_id: source_id,
                balance: source.balance.amount(),
                attempted: amount.amount(),
            });
        }

        let now = Utc::now();
        source
            .limits
            .check_transfer(amount.amount(), now)
            .map_err(|breach| LedgerError::LimitExceeded {
                account_id: source_id,
                breach,
            })?;

        let failed = |stage: &'static str| {
            let amount = amount.amount();
            move |source: StoreError| LedgerError::TransferFailed {
                source_id,
                destination_id,
                amount,
                stage,
                source,
            }
        };

        let out_tx = Transaction::transfer_out(source_id, destination_id, amount)
            .with_description(description.clone());
        let in_tx = Transaction::transfer_in(source_id, destination_id, amount)
            .with_description(description);

        match destination.take() {
            // Same-account transfer: debit and credit cancel; only limit
            // usage and the record pair are observable.
            None => {
                source.limits.record_transfer(amount.amount(), now);
                self.accounts
                    .put(source)
                    .map_err(failed("persist-source"))?;
            }
            Some(mut destination) => {
                let credited = destination.balance.checked_add(&amount)?;

                source.balance = debited;
                destination.balance = credited;
                source.limits.record_transfer(amount.amount(), now);

                self.accounts
                    .put(source)
                    .map_err(failed("persist-source"))?;
                self.accounts
                    .put(destination)
                    .map_err(failed("persist-destination"))?;
            }
        }

        self.transactions
            .append(out_tx.clone())
            .map_err(failed("append-outgoing"))?;
        self.transactions
            .append(in_tx.clone())
            .map_err(failed("append-incoming"))?;

        tracing::info!(
            source = %source_id,
            destination = %destination_id,
            amount = %amount,
            "transfer recorded"
        );
        Ok((out_tx, in_tx))
    }

    /// Accrues interest on an account up to `as_of`
    ///
    /// Returns the newly accrued amount. Repeated calls with a stable
    /// `as_of` accrue nothing further; advancing dates keep accumulating.
    pub fn accrue_interest(
        &self,
        account_id: AccountId,
        as_of: DateTime<Utc>,
    ) -> Result<Money, LedgerError> {
        let handle = self.lock_handle(account_id);
        let _guard = handle.lock().expect("account lock poisoned");

        let mut account = self.load(account_id)?;
        let accrued = account.accrue_interest(as_of)?;
        self.accounts.put(account)?;

        tracing::debug!(account = %account_id, accrued = %accrued, "interest accrued");
        Ok(accrued)
    }

    /// Capitalizes accrued interest into the balance
    ///
    /// Returns the amount applied. Idempotent once the accrual is zero. No
    /// transaction record is written; statement derivation accounts for
    /// interest separately.
    pub fn capitalize_interest(&self, account_id: AccountId) -> Result<Money, LedgerError> {
        let handle = self.lock_handle(account_id);
        let _guard = handle.lock().expect("account lock poisoned");

        let mut account = self.load(account_id)?;
        let applied = account.capitalize_interest()?;
        self.accounts.put(account)?;

        tracing::info!(account = %account_id, applied = %applied, "interest capitalized");
        Ok(applied)
    }

    /// Assigns a new interest strategy to an account
    ///
    /// A field assignment only; past accrual is never recomputed.
    pub fn set_interest_strategy(
        &self,
        account_id: AccountId,
        strategy: InterestStrategy,
    ) -> Result<(), LedgerError> {
        let handle = self.lock_handle(account_id);
        let _guard = handle.lock().expect("account lock poisoned");

        let mut account = self.load(account_id)?;
        account.interest_strategy = strategy;
        self.accounts.put(account)?;
        Ok(())
    }

    /// Replaces an account's limit thresholds
    pub fn update_limits(
        &self,
        account_id: AccountId,
        limits: TransactionLimits,
    ) -> Result<TransactionLimits, LedgerError> {
        let handle = self.lock_handle(account_id);
        let _guard = handle.lock().expect("account lock poisoned");

        let mut account = self.load(account_id)?;
        account.limits.set_limits(limits.clone());
        self.accounts.put(account)?;
        Ok(limits)
    }

    /// Reports limit/used/remaining figures for each rolling window
    pub fn limit_usage(&self, account_id: AccountId) -> Result<LimitUsage, LedgerError> {
        let handle = self.lock_handle(account_id);
        let _guard = handle.lock().expect("account lock poisoned");

        let mut account = self.load(account_id)?;
        let usage = account.limits.usage(Utc::now());
        // Persist any lazy window rollover the query triggered
        self.accounts.put(account)?;
        Ok(usage)
    }

    /// Fetches an account by id
    pub fn account(&self, account_id: AccountId) -> Result<Account, LedgerError> {
        let handle = self.lock_handle(account_id);
        let _guard = handle.lock().expect("account lock poisoned");
        self.load(account_id)
    }

    /// Lists all accounts
    pub fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        Ok(self.accounts.list()?)
    }

    /// All transaction records filed under an account
    pub fn transactions(&self, account_id: AccountId) -> Result<Vec<Transaction>, LedgerError> {
        // Resolve the id first so an unknown account is an error, not an
        // empty history
        self.load(account_id)?;
        Ok(self.transactions.by_account(account_id)?)
    }

    /// Transaction records filed under an account within `[start, end)`
    pub fn transactions_in_range(
        &self,
        account_id: AccountId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, LedgerError> {
        self.load(account_id)?;
        Ok(self.transactions.by_account_in_range(account_id, start, end)?)
    }
}
