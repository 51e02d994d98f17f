//! In-memory account store

use std::collections::HashMap;
use std::sync::RwLock;

use core_kernel::AccountId;
use domain_account::Account;
use domain_ledger::{AccountStore, StoreError};

/// Account store backed by a `RwLock<HashMap>`
///
/// `put` replaces the stored account wholesale, matching the port's
/// insert-or-replace contract.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub fn len(&self) -> usize {
        self.accounts.read().expect("account store poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().expect("account store poisoned");
        Ok(accounts.get(&id).cloned())
    }

    fn put(&self, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().expect("account store poisoned");
        accounts.insert(account.id, account);
        Ok(())
    }

    fn list(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.read().expect("account store poisoned");
        Ok(accounts.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, Money};
    use domain_account::AccountType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_read_after_write() {
        let store = InMemoryAccountStore::new();
        let account = Account::open(
            AccountType::Checking,
            "Grace",
            Money::new(dec!(10), Currency::USD),
        )
        .unwrap();
        let id = account.id;

        store.put(account).unwrap();
        let fetched = store.get(id).unwrap().expect("account should be present");
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.balance.amount(), dec!(10));
    }

    #[test]
    fn test_get_absent_returns_none() {
        let store = InMemoryAccountStore::new();
        assert!(store.get(AccountId::new()).unwrap().is_none());
    }

    #[test]
    fn test_put_replaces() {
        let store = InMemoryAccountStore::new();
        let mut account = Account::open(
            AccountType::Checking,
            "Grace",
            Money::new(dec!(10), Currency::USD),
        )
        .unwrap();
        let id = account.id;
        store.put(account.clone()).unwrap();

        account.balance = Money::new(dec!(25), Currency::USD);
        store.put(account).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).unwrap().unwrap().balance.amount(), dec!(25));
    }
}
