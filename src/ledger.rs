use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{AssignedFee, Payment, StudentId};

/// kind of ledger movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    /// a fee assigned to the student (debit)
    FeeAssigned,
    /// a payment received (credit)
    Payment,
    /// a correction from replacing the assignment set
    Adjustment,
}

/// one row of the running-balance audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub kind: LedgerKind,
    pub description: String,
    pub debit: Option<Money>,
    pub credit: Option<Money>,
    /// balance after this entry (debits minus credits so far)
    pub balance: Money,
    pub receipt_number: Option<String>,
}

/// append-only in-memory ledger for one student.
///
/// the running balance is maintained by the book itself so an entry
/// can never be inserted with a balance that disagrees with history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerBook {
    entries: Vec<LedgerEntry>,
    balance: Money,
}

impl LedgerBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_debit(
        &mut self,
        student_id: StudentId,
        date: NaiveDate,
        kind: LedgerKind,
        description: String,
        amount: Money,
    ) {
        self.balance += amount;
        self.entries.push(LedgerEntry {
            id: Uuid::new_v4(),
            student_id,
            date,
            kind,
            description,
            debit: Some(amount),
            credit: None,
            balance: self.balance,
            receipt_number: None,
        });
    }

    pub fn append_credit(
        &mut self,
        student_id: StudentId,
        date: NaiveDate,
        kind: LedgerKind,
        description: String,
        amount: Money,
        receipt_number: Option<String>,
    ) {
        self.balance -= amount;
        self.entries.push(LedgerEntry {
            id: Uuid::new_v4(),
            student_id,
            date,
            kind,
            description,
            debit: None,
            credit: Some(amount),
            balance: self.balance,
            receipt_number,
        });
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn take_entries(&mut self) -> Vec<LedgerEntry> {
        std::mem::take(&mut self.entries)
    }

    pub fn current_balance(&self) -> Money {
        self.balance
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// derive a student's full ledger from assignments and payments.
///
/// fee debits land on their scheduled date (or the registration date
/// for unscheduled fees); payment credits on their payment date.
/// entries are chronological; on the same date debits precede credits.
pub fn derive_ledger(
    student_id: StudentId,
    registered_on: NaiveDate,
    assigned: &[AssignedFee],
    payments: &[Payment],
) -> Vec<LedgerEntry> {
    // (date, debits-first rank, original position) keeps the order deterministic
    let mut movements: Vec<(NaiveDate, u8, usize)> = Vec::new();
    for (i, fee) in assigned.iter().enumerate() {
        movements.push((fee.scheduled_date.unwrap_or(registered_on), 0, i));
    }
    for (i, payment) in payments.iter().enumerate() {
        movements.push((payment.date, 1, i));
    }
    movements.sort_by_key(|&(date, rank, position)| (date, rank, position));

    let mut book = LedgerBook::new();
    for (date, rank, position) in movements {
        if rank == 0 {
            let fee = &assigned[position];
            book.append_debit(
                student_id,
                date,
                LedgerKind::FeeAssigned,
                fee.fee_type_name.clone(),
                fee.net_amount(),
            );
        } else {
            let payment = &payments[position];
            book.append_credit(
                student_id,
                date,
                LedgerKind::Payment,
                format!("Payment ({})", payment.mode_of_payment),
                payment.amount_paid,
                Some(payment.receipt_number.clone()),
            );
        }
    }
    book.take_entries()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentMode, StudentFeeAssignment};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assigned_fee(name: &str, amount: i64, scheduled: Option<NaiveDate>) -> AssignedFee {
        AssignedFee {
            assignment: StudentFeeAssignment {
                student_id: Uuid::new_v4(),
                fee_type_id: Uuid::new_v4(),
                school_id: Uuid::new_v4(),
                assigned_amount: Money::from_major(amount),
                discount: Money::ZERO,
                discount_description: None,
            },
            fee_type_name: name.to_string(),
            scheduled_date: scheduled,
            applicable_from: None,
        }
    }

    fn payment(date: NaiveDate, amount: i64, receipt: &str) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            school_id: Uuid::new_v4(),
            date,
            amount_paid: Money::from_major(amount),
            mode_of_payment: PaymentMode::Upi,
            receipt_number: receipt.to_string(),
            description: None,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_running_balance() {
        let student_id = Uuid::new_v4();
        let assigned = vec![
            assigned_fee("Tuition", 5_000, Some(date(2025, 1, 1))),
            assigned_fee("Transport", 2_000, Some(date(2025, 1, 1))),
        ];
        let payments = vec![payment(date(2025, 1, 15), 3_000, "RCPT-001")];

        let entries = derive_ledger(student_id, date(2025, 1, 1), &assigned, &payments);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].balance, Money::from_major(5_000));
        assert_eq!(entries[1].balance, Money::from_major(7_000));
        assert_eq!(entries[2].balance, Money::from_major(4_000));
        assert_eq!(entries[2].receipt_number.as_deref(), Some("RCPT-001"));
    }

    #[test]
    fn test_same_day_debits_precede_credits() {
        let student_id = Uuid::new_v4();
        let assigned = vec![assigned_fee("Tuition", 1_000, Some(date(2025, 1, 1)))];
        let payments = vec![payment(date(2025, 1, 1), 1_000, "RCPT-001")];

        let entries = derive_ledger(student_id, date(2025, 1, 1), &assigned, &payments);
        assert_eq!(entries[0].kind, LedgerKind::FeeAssigned);
        assert_eq!(entries[1].kind, LedgerKind::Payment);
        assert_eq!(entries[1].balance, Money::ZERO);
    }

    #[test]
    fn test_unscheduled_fee_lands_on_registration_date() {
        let student_id = Uuid::new_v4();
        let assigned = vec![assigned_fee("Admission", 3_000, None)];
        let entries = derive_ledger(student_id, date(2025, 4, 1), &assigned, &[]);
        assert_eq!(entries[0].date, date(2025, 4, 1));
    }

    #[test]
    fn test_book_is_append_only() {
        let student_id = Uuid::new_v4();
        let mut book = LedgerBook::new();
        book.append_debit(
            student_id,
            date(2025, 1, 1),
            LedgerKind::FeeAssigned,
            "Tuition".to_string(),
            Money::from_major(500),
        );
        book.append_credit(
            student_id,
            date(2025, 1, 2),
            LedgerKind::Payment,
            "Payment (Cash)".to_string(),
            Money::from_major(200),
            Some("RCPT-001".to_string()),
        );

        assert_eq!(book.entries().len(), 2);
        assert_eq!(book.current_balance(), Money::from_major(300));

        let taken = book.take_entries();
        assert_eq!(taken.len(), 2);
        assert!(book.is_empty());
        // balance survives taking the entries
        assert_eq!(book.current_balance(), Money::from_major(300));
    }
}
