//! Custom Assertion Helpers
//!
//! Domain-aware assertions that produce readable failure messages.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_ledger::{Transaction, TransactionKind};

/// Asserts a money value has the expected decimal amount
pub fn assert_amount(money: &Money, expected: Decimal) {
    assert_eq!(
        money.amount(),
        expected,
        "expected {} {}, got {}",
        expected,
        money.currency(),
        money
    );
}

/// Asserts the combined balance of a set of money values
///
/// Used for conservation checks after transfers.
pub fn assert_total(monies: &[Money], expected: Decimal) {
    let total: Decimal = monies.iter().map(|m| m.amount()).sum();
    assert_eq!(total, expected, "combined balance drifted");
}

/// Asserts a transfer record pair is consistent
///
/// Checks kinds, equal amounts, and that each record references the other
/// side's account.
pub fn assert_transfer_pair(outgoing: &Transaction, incoming: &Transaction) {
    assert_eq!(outgoing.kind, TransactionKind::TransferOut);
    assert_eq!(incoming.kind, TransactionKind::TransferIn);
    assert_eq!(outgoing.amount, incoming.amount, "amounts must match");
    assert_eq!(
        outgoing.destination_account_id,
        Some(incoming.account_id),
        "outgoing record must reference the receiving account"
    );
    assert_eq!(
        incoming.source_account_id,
        Some(outgoing.account_id),
        "incoming record must reference the sending account"
    );
}
