//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant fields
//! while using defaults for everything else.

use std::sync::Arc;

use fake::faker::name::en::Name;
use fake::Fake;

use core_kernel::Money;
use domain_account::{Account, AccountType, InterestStrategy, TransactionLimits};
use domain_ledger::Ledger;
use infra_mem::{InMemoryAccountStore, InMemoryTransactionLog};

use crate::fixtures::MoneyFixtures;

/// Builder for constructing test accounts
pub struct TestAccountBuilder {
    owner_name: String,
    account_type: AccountType,
    initial_deposit: Money,
    limits: Option<TransactionLimits>,
    strategy: Option<InterestStrategy>,
}

impl Default for TestAccountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAccountBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            owner_name: Name().fake(),
            account_type: AccountType::Checking,
            initial_deposit: MoneyFixtures::usd_100(),
            limits: None,
            strategy: None,
        }
    }

    /// Sets the owner name
    pub fn with_owner(mut self, name: impl Into<String>) -> Self {
        self.owner_name = name.into();
        self
    }

    /// Sets the account type
    pub fn with_type(mut self, account_type: AccountType) -> Self {
        self.account_type = account_type;
        self
    }

    /// Sets the initial deposit
    pub fn with_initial_deposit(mut self, deposit: Money) -> Self {
        self.initial_deposit = deposit;
        self
    }

    /// Sets the transaction limits
    pub fn with_limits(mut self, limits: TransactionLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Sets the interest strategy
    pub fn with_strategy(mut self, strategy: InterestStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Builds the account directly, bypassing the ledger
    pub fn build(self) -> Account {
        let mut account = Account::open(self.account_type, self.owner_name, self.initial_deposit)
            .expect("test account should satisfy opening rules");
        if let Some(limits) = self.limits {
            account = account.with_limits(limits);
        }
        if let Some(strategy) = self.strategy {
            account = account.with_strategy(strategy);
        }
        account
    }

    /// Opens the account through a ledger so it is persisted
    pub fn open_in(self, ledger: &Ledger) -> Account {
        let account = ledger
            .open_account(self.account_type, self.owner_name, self.initial_deposit)
            .expect("test account should satisfy opening rules");
        if let Some(limits) = self.limits {
            ledger
                .update_limits(account.id, limits)
                .expect("account was just opened");
        }
        if let Some(strategy) = self.strategy {
            ledger
                .set_interest_strategy(account.id, strategy)
                .expect("account was just opened");
        }
        ledger.account(account.id).expect("account was just opened")
    }
}

/// In-memory ledger wired for tests
pub struct LedgerHarness {
    pub ledger: Ledger,
    pub accounts: Arc<InMemoryAccountStore>,
    pub transactions: Arc<InMemoryTransactionLog>,
}

impl Default for LedgerHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerHarness {
    pub fn new() -> Self {
        let accounts = Arc::new(InMemoryAccountStore::new());
        let transactions = Arc::new(InMemoryTransactionLog::new());
        let ledger = Ledger::new(accounts.clone(), transactions.clone());
        Self {
            ledger,
            accounts,
            transactions,
        }
    }
}
