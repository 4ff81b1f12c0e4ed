use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{FeeLedgerError, Result};
use crate::types::Payment;

/// aggregate view over a student's payment history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub total_paid: Money,
    pub last_payment: Option<Payment>,
}

/// validate a payment before it is recorded.
///
/// payments are strictly positive and must carry a receipt number;
/// there is no update path, so nothing is validated after insert.
pub fn validate_payment(payment: &Payment) -> Result<()> {
    if !payment.amount_paid.is_positive() {
        return Err(FeeLedgerError::InvalidAmount {
            amount: payment.amount_paid,
        });
    }
    if payment.receipt_number.trim().is_empty() {
        return Err(FeeLedgerError::MissingReceiptNumber {
            amount: payment.amount_paid,
        });
    }
    Ok(())
}

/// total paid and last payment over a chronological payment list.
///
/// the last payment is the one with the maximum date; on equal dates
/// the later insertion wins, so the result is deterministic for a
/// given list order. does not mutate its input.
pub fn aggregate_payments(payments: &[Payment]) -> PaymentSummary {
    let mut total_paid = Money::ZERO;
    let mut last_payment: Option<&Payment> = None;

    for payment in payments {
        total_paid += payment.amount_paid;
        match last_payment {
            Some(current) if payment.date < current.date => {}
            _ => last_payment = Some(payment),
        }
    }

    PaymentSummary {
        total_paid,
        last_payment: last_payment.cloned(),
    }
}
