use std::collections::HashMap;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::assignment::{resolve_assignments, total_net_amount, DiscountAdjustment, ResolvedAssignments};
use crate::catalog::FeeCatalog;
use crate::decimal::Money;
use crate::due::compute_due;
use crate::errors::{FeeLedgerError, Result};
use crate::ledger::{derive_ledger, LedgerBook, LedgerEntry, LedgerKind};
use crate::payments::{aggregate_payments, validate_payment, PaymentSummary};
use crate::status::classify;
use crate::types::{
    AssignedFee, BasisKind, ClassId, FeeTypeId, Payment, PaymentStatus, SchoolId, Student,
    StudentId, StudentStatus,
};

/// diff record from replacing a student's assignment set; the storage
/// collaborator persists the whole record in a single transaction so
/// the delete-then-reinsert flow cannot half-apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentReplacement {
    pub student_id: StudentId,
    pub removed: Vec<AssignedFee>,
    pub added: Vec<AssignedFee>,
    pub previous_total: Money,
    pub new_total: Money,
}

/// a student together with their assigned fees, payment history and
/// audit ledger. the in-memory aggregate every calculation runs on;
/// persistence of the pieces is the storage collaborator's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentAccount {
    pub student: Student,
    pub assigned: Vec<AssignedFee>,
    pub payments: Vec<Payment>,
    pub registered_on: NaiveDate,
    ledger: LedgerBook,
}

impl StudentAccount {
    /// register a new student: resolve the fee selection against the
    /// class catalog and materialize `total_fees` from the result
    #[allow(clippy::too_many_arguments)]
    pub fn register(
        student_id: StudentId,
        name: String,
        roll_no: String,
        academic_year: String,
        class_id: ClassId,
        catalog: &FeeCatalog,
        school_id: SchoolId,
        selections: &[FeeTypeId],
        adjustments: &HashMap<FeeTypeId, DiscountAdjustment>,
        registered_on: NaiveDate,
    ) -> Result<Self> {
        let class_fee_types = catalog.list_fee_types_for_class(school_id, class_id)?;
        let ResolvedAssignments {
            assignments,
            total_assigned,
        } = resolve_assignments(
            student_id,
            school_id,
            class_id,
            &class_fee_types,
            selections,
            adjustments,
        )?;

        let student = Student {
            id: student_id,
            school_id,
            name,
            roll_no,
            class_id,
            academic_year,
            total_fees: total_assigned,
            status: Some(StudentStatus::Active),
        };

        let mut ledger = LedgerBook::new();
        for fee in &assignments {
            ledger.append_debit(
                student_id,
                fee.scheduled_date.unwrap_or(registered_on),
                LedgerKind::FeeAssigned,
                fee.fee_type_name.clone(),
                fee.net_amount(),
            );
        }

        Ok(Self {
            student,
            assigned: assignments,
            payments: Vec::new(),
            registered_on,
            ledger,
        })
    }

    /// replace the full assignment set (edit flow). the old set is
    /// discarded, the new selection resolved from scratch and
    /// `total_fees` rewritten in the same step. returns the diff the
    /// storage collaborator must apply transactionally.
    pub fn replace_assignments(
        &mut self,
        catalog: &FeeCatalog,
        class_id: ClassId,
        selections: &[FeeTypeId],
        adjustments: &HashMap<FeeTypeId, DiscountAdjustment>,
        effective_on: NaiveDate,
    ) -> Result<AssignmentReplacement> {
        let class_fee_types = catalog.list_fee_types_for_class(self.student.school_id, class_id)?;
        let resolved = resolve_assignments(
            self.student.id,
            self.student.school_id,
            class_id,
            &class_fee_types,
            selections,
            adjustments,
        )?;

        // nothing mutated until the new set resolved cleanly
        let previous_total = self.student.total_fees;
        let removed = std::mem::replace(&mut self.assigned, resolved.assignments.clone());
        self.student.class_id = class_id;
        self.student.total_fees = resolved.total_assigned;

        let delta = resolved.total_assigned - previous_total;
        if !delta.is_zero() {
            if delta.is_positive() {
                self.ledger.append_debit(
                    self.student.id,
                    effective_on,
                    LedgerKind::Adjustment,
                    "Assignments replaced".to_string(),
                    delta,
                );
            } else {
                self.ledger.append_credit(
                    self.student.id,
                    effective_on,
                    LedgerKind::Adjustment,
                    "Assignments replaced".to_string(),
                    delta.abs(),
                    None,
                );
            }
        }

        Ok(AssignmentReplacement {
            student_id: self.student.id,
            removed,
            added: resolved.assignments,
            previous_total,
            new_total: resolved.total_assigned,
        })
    }

    /// record a payment: validated, appended, never edited afterwards
    pub fn record_payment(&mut self, payment: Payment) -> Result<()> {
        validate_payment(&payment)?;
        if payment.school_id != self.student.school_id {
            return Err(FeeLedgerError::SchoolNotFound {
                school_id: payment.school_id,
            });
        }
        if payment.student_id != self.student.id {
            return Err(FeeLedgerError::StudentNotFound {
                student_id: payment.student_id,
            });
        }
        if self
            .payments
            .iter()
            .any(|p| p.receipt_number == payment.receipt_number)
        {
            return Err(FeeLedgerError::DuplicateReceipt {
                receipt_number: payment.receipt_number,
            });
        }

        self.ledger.append_credit(
            self.student.id,
            payment.date,
            LedgerKind::Payment,
            format!("Payment ({})", payment.mode_of_payment),
            payment.amount_paid,
            Some(payment.receipt_number.clone()),
        );
        self.payments.push(payment);
        Ok(())
    }

    /// recompute the assigned total and compare against the cached
    /// `total_fees`; divergence is surfaced, never silently corrected
    pub fn verify_cached_total(&self) -> Result<()> {
        let computed = total_net_amount(&self.assigned);
        if computed != self.student.total_fees {
            return Err(FeeLedgerError::InconsistentState {
                student_id: self.student.id,
                cached: self.student.total_fees,
                computed,
            });
        }
        Ok(())
    }

    /// total assigned net amount, recomputed from the assignments
    pub fn total_assigned(&self) -> Money {
        total_net_amount(&self.assigned)
    }

    pub fn total_paid(&self) -> Money {
        aggregate_payments(&self.payments).total_paid
    }

    pub fn payment_summary(&self) -> PaymentSummary {
        aggregate_payments(&self.payments)
    }

    pub fn last_payment(&self) -> Option<Payment> {
        aggregate_payments(&self.payments).last_payment
    }

    /// outstanding balance against the full assigned total
    pub fn balance(&self) -> Money {
        self.total_assigned() - self.total_paid()
    }

    /// net amount currently due as of `reference`
    pub fn due_as_of(&self, reference: NaiveDate) -> Money {
        compute_due(&self.assigned, reference)
    }

    /// basis amount for a classification view
    pub fn basis(&self, kind: BasisKind, reference: NaiveDate) -> Money {
        match kind {
            BasisKind::Total => self.total_assigned(),
            BasisKind::Due => self.due_as_of(reference),
        }
    }

    /// payment status against the chosen basis
    pub fn status(&self, kind: BasisKind, reference: NaiveDate) -> PaymentStatus {
        classify(self.basis(kind, reference), self.total_paid())
    }

    /// payment status as of the provider's current date
    pub fn status_now(&self, kind: BasisKind, time_provider: &SafeTimeProvider) -> PaymentStatus {
        self.status(kind, time_provider.now().date_naive())
    }

    /// audit trail accumulated through register/replace/payment calls
    pub fn ledger(&self) -> &[LedgerEntry] {
        self.ledger.entries()
    }

    /// full ledger re-derived from scratch, chronologically ordered
    pub fn derived_ledger(&self) -> Vec<LedgerEntry> {
        derive_ledger(
            self.student.id,
            self.registered_on,
            &self.assigned,
            &self.payments,
        )
    }

    /// serializable snapshot of the account
    pub fn view(&self, reference: NaiveDate) -> StudentAccountView {
        let summary = self.payment_summary();
        StudentAccountView {
            student: self.student.clone(),
            total_assigned: self.total_assigned(),
            total_paid: summary.total_paid,
            balance: self.balance(),
            due: self.due_as_of(reference),
            status_on_total: self.status(BasisKind::Total, reference),
            status_on_due: self.status(BasisKind::Due, reference),
            last_payment: summary.last_payment,
            assignment_count: self.assigned.len(),
            payment_count: self.payments.len(),
        }
    }

    /// json rendering of the snapshot
    pub fn json(&self, reference: NaiveDate) -> String {
        serde_json::to_string_pretty(&self.view(reference)).unwrap_or_default()
    }
}

/// serializable view of an account's derived numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentAccountView {
    pub student: Student,
    pub total_assigned: Money,
    pub total_paid: Money,
    pub balance: Money,
    pub due: Money,
    pub status_on_total: PaymentStatus,
    pub status_on_due: PaymentStatus,
    pub last_payment: Option<Payment>,
    pub assignment_count: usize,
    pub payment_count: usize,
}
