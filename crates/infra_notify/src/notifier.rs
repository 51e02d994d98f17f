//! Transaction message formatting

use std::sync::Arc;

use core_kernel::AccountId;
use domain_ledger::{Transaction, TransactionKind};

use crate::sender::{Notification, NotificationSender};

/// Formats completed transactions into owner notifications
///
/// `notify` never fails: a channel error is logged at warn level and
/// dropped, because the ledger operation the record describes has already
/// completed and must not appear rolled back.
pub struct TransactionNotifier {
    sender: Arc<dyn NotificationSender>,
}

impl TransactionNotifier {
    pub fn new(sender: Arc<dyn NotificationSender>) -> Self {
        Self { sender }
    }

    /// Formats and dispatches a notification for a completed transaction
    pub fn notify(&self, transaction: &Transaction, owner_contact: &str) {
        let subject = subject_for(transaction.kind).to_string();
        let body = body_for(transaction);
        let notification = Notification {
            recipient: owner_contact.to_string(),
            subject,
            body,
        };

        if let Err(error) = self.sender.send(notification) {
            tracing::warn!(
                transaction = %transaction.id,
                recipient = %owner_contact,
                %error,
                "notification delivery failed"
            );
        }
    }
}

fn subject_for(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Deposit => "Deposit Notification",
        TransactionKind::Withdrawal => "Withdrawal Notification",
        TransactionKind::TransferOut => "Transfer Notification - Funds Sent",
        TransactionKind::TransferIn => "Transfer Notification - Funds Received",
    }
}

fn body_for(transaction: &Transaction) -> String {
    let mut body = match transaction.kind {
        TransactionKind::Deposit => format!(
            "A deposit of {} has been made to your account.",
            transaction.amount
        ),
        TransactionKind::Withdrawal => format!(
            "A withdrawal of {} has been made from your account.",
            transaction.amount
        ),
        TransactionKind::TransferOut => {
            let mut message = format!("You have sent {} from your account.", transaction.amount);
            if let Some(destination) = transaction.destination_account_id {
                message.push_str(&format!(" Recipient account {}.", masked(destination)));
            }
            message
        }
        TransactionKind::TransferIn => {
            let mut message = format!("You have received {} to your account.", transaction.amount);
            if let Some(source) = transaction.source_account_id {
                message.push_str(&format!(" Sender account {}.", masked(source)));
            }
            message
        }
    };

    body.push_str(&format!(
        "\n\nTransaction ID: {}\nTimestamp: {}\n\nIf you did not authorize this transaction, \
         please contact support immediately.",
        transaction.id, transaction.timestamp
    ));
    body
}

/// Masks an account id down to its last four characters
fn masked(id: AccountId) -> String {
    let rendered = id.to_string();
    let tail: String = rendered
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, Money};
    use rust_decimal_macros::dec;

    use crate::sender::RecordingSender;

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    #[test]
    fn test_deposit_notification_content() {
        let sender = Arc::new(RecordingSender::new());
        let notifier = TransactionNotifier::new(sender.clone());

        let tx = Transaction::deposit(AccountId::new(), usd(dec!(250)));
        notifier.notify(&tx, "owner@example.com");

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "owner@example.com");
        assert_eq!(sent[0].subject, "Deposit Notification");
        assert!(sent[0].body.contains("A deposit of"));
        assert!(sent[0].body.contains(&tx.id.to_string()));
    }

    #[test]
    fn test_transfer_out_masks_counterparty() {
        let sender = Arc::new(RecordingSender::new());
        let notifier = TransactionNotifier::new(sender.clone());

        let source = AccountId::new();
        let destination = AccountId::new();
        let tx = Transaction::transfer_out(source, destination, usd(dec!(75)));
        notifier.notify(&tx, "owner@example.com");

        let body = &sender.sent()[0].body;
        assert!(body.contains("You have sent"));
        assert!(body.contains("****"));
        // The full counterparty id never appears
        assert!(!body.contains(&destination.to_string()));
    }

    #[test]
    fn test_delivery_failure_is_swallowed() {
        struct FailingSender;
        impl NotificationSender for FailingSender {
            fn send(&self, notification: Notification) -> Result<(), crate::NotifyError> {
                Err(crate::NotifyError::DeliveryFailed {
                    recipient: notification.recipient,
                    reason: "channel offline".to_string(),
                })
            }
        }

        let notifier = TransactionNotifier::new(Arc::new(FailingSender));
        let tx = Transaction::withdrawal(AccountId::new(), usd(dec!(10)));
        // Must not panic or propagate
        notifier.notify(&tx, "owner@example.com");
    }
}
