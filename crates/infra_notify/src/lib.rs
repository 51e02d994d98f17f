//! Transaction Notifications
//!
//! A delivery port plus a formatter that turns completed transaction records
//! into owner-facing messages. Notification is strictly downstream of the
//! ledger: a delivery failure is logged and swallowed, never surfaced to the
//! operation that produced the record.

pub mod notifier;
pub mod sender;

pub use notifier::TransactionNotifier;
pub use sender::{Notification, NotificationSender, NotifyError, RecordingSender};
