use crate::decimal::Money;
use crate::types::PaymentStatus;

/// classify a student's payment standing against a basis amount
/// (total assigned or currently due, per the caller's view).
///
/// comparisons tolerate one minor unit (`Money::EPSILON`, 0.01) so a
/// rounded balance of a fraction of a paisa still counts as settled.
/// total for all finite inputs; never fails.
pub fn classify(basis: Money, total_paid: Money) -> PaymentStatus {
    let epsilon = Money::EPSILON;

    if basis <= epsilon {
        if total_paid > Money::ZERO {
            PaymentStatus::Paid
        } else {
            PaymentStatus::NoFeesDue
        }
    } else if total_paid >= basis - epsilon {
        PaymentStatus::Paid
    } else if total_paid > epsilon {
        PaymentStatus::PartiallyPaid
    } else {
        PaymentStatus::Unpaid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fees_due() {
        assert_eq!(classify(Money::ZERO, Money::ZERO), PaymentStatus::NoFeesDue);
    }

    #[test]
    fn test_paid_with_zero_basis() {
        // overpayment against nothing assigned still reads as paid
        assert_eq!(
            classify(Money::ZERO, Money::from_major(50)),
            PaymentStatus::Paid
        );
    }

    #[test]
    fn test_exact_payment_is_paid() {
        assert_eq!(
            classify(Money::from_major(1_000), Money::from_major(1_000)),
            PaymentStatus::Paid
        );
    }

    #[test]
    fn test_partial_payment() {
        assert_eq!(
            classify(Money::from_major(1_000), Money::from_major(400)),
            PaymentStatus::PartiallyPaid
        );
    }

    #[test]
    fn test_unpaid() {
        assert_eq!(
            classify(Money::from_major(1_000), Money::ZERO),
            PaymentStatus::Unpaid
        );
    }

    #[test]
    fn test_rounding_tolerance() {
        // one paisa short still counts as paid
        let basis = Money::from_str_exact("1000.00").unwrap();
        let paid = Money::from_str_exact("999.99").unwrap();
        assert_eq!(classify(basis, paid), PaymentStatus::Paid);

        // two paise short does not
        let paid = Money::from_str_exact("999.98").unwrap();
        assert_eq!(classify(basis, paid), PaymentStatus::PartiallyPaid);
    }

    #[test]
    fn test_tiny_payment_below_epsilon_is_unpaid() {
        let basis = Money::from_major(1_000);
        assert_eq!(classify(basis, Money::EPSILON), PaymentStatus::Unpaid);
    }
}
