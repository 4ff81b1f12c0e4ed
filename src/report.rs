use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::due::compute_due;
use crate::payments::aggregate_payments;
use crate::status::classify;
use crate::types::{AssignedFee, BasisKind, Payment, PaymentStatus, Student};

/// a student with everything the report needs already joined in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedStudent {
    pub student: Student,
    pub class_name: String,
    pub assigned: Vec<AssignedFee>,
    pub payments: Vec<Payment>,
}

/// one per-student row of the ledger report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub student_id: uuid::Uuid,
    pub name: String,
    pub roll_no: String,
    pub class_name: String,
    pub academic_year: String,
    pub basis: Money,
    pub paid: Money,
    pub balance: Money,
    pub status: PaymentStatus,
    pub last_payment_date: Option<NaiveDate>,
    pub last_payment_amount: Option<Money>,
    pub last_payment_receipt: Option<String>,
}

/// one per-class row of the aggregate report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReportRow {
    pub class_name: String,
    pub student_count: usize,
    pub basis: Money,
    pub paid: Money,
    pub balance: Money,
    pub paid_count: usize,
    pub partially_paid_count: usize,
    pub unpaid_count: usize,
    pub no_fees_due_count: usize,
}

/// per-student rows, ordered by class name, then student name, then roll no
pub fn format_rows(
    students: &[EnrichedStudent],
    basis_kind: BasisKind,
    reference: NaiveDate,
) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = students
        .iter()
        .map(|enriched| {
            let basis = match basis_kind {
                BasisKind::Total => enriched.assigned.iter().map(|a| a.net_amount()).sum(),
                BasisKind::Due => compute_due(&enriched.assigned, reference),
            };
            let summary = aggregate_payments(&enriched.payments);
            let status = classify(basis, summary.total_paid);

            ReportRow {
                student_id: enriched.student.id,
                name: enriched.student.name.clone(),
                roll_no: enriched.student.roll_no.clone(),
                class_name: enriched.class_name.clone(),
                academic_year: enriched.student.academic_year.clone(),
                basis,
                paid: summary.total_paid,
                balance: basis - summary.total_paid,
                status,
                last_payment_date: summary.last_payment.as_ref().map(|p| p.date),
                last_payment_amount: summary.last_payment.as_ref().map(|p| p.amount_paid),
                last_payment_receipt: summary.last_payment.map(|p| p.receipt_number),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.class_name
            .cmp(&b.class_name)
            .then(a.name.cmp(&b.name))
            .then(a.roll_no.cmp(&b.roll_no))
    });
    rows
}

/// class-level rows: summed basis/paid and per-status member counts
/// instead of per-student payment detail, ordered by class name
pub fn format_class_rows(
    students: &[EnrichedStudent],
    basis_kind: BasisKind,
    reference: NaiveDate,
) -> Vec<ClassReportRow> {
    let mut grouped: BTreeMap<String, ClassReportRow> = BTreeMap::new();

    for row in format_rows(students, basis_kind, reference) {
        let entry = grouped
            .entry(row.class_name.clone())
            .or_insert_with(|| ClassReportRow {
                class_name: row.class_name.clone(),
                student_count: 0,
                basis: Money::ZERO,
                paid: Money::ZERO,
                balance: Money::ZERO,
                paid_count: 0,
                partially_paid_count: 0,
                unpaid_count: 0,
                no_fees_due_count: 0,
            });
        entry.student_count += 1;
        entry.basis += row.basis;
        entry.paid += row.paid;
        entry.balance += row.balance;
        match row.status {
            PaymentStatus::Paid => entry.paid_count += 1,
            PaymentStatus::PartiallyPaid => entry.partially_paid_count += 1,
            PaymentStatus::Unpaid => entry.unpaid_count += 1,
            PaymentStatus::NoFeesDue => entry.no_fees_due_count += 1,
        }
    }

    grouped.into_values().collect()
}

/// quote a field when it contains the delimiter, a quote or a newline
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// serialize per-student rows as CSV, header included
pub fn rows_to_csv(rows: &[ReportRow]) -> String {
    let mut out = String::from(
        "name,roll_no,class,academic_year,basis,paid,balance,status,last_payment_date,last_payment_amount,last_payment_receipt\n",
    );
    for row in rows {
        let fields = [
            csv_escape(&row.name),
            csv_escape(&row.roll_no),
            csv_escape(&row.class_name),
            csv_escape(&row.academic_year),
            row.basis.to_string(),
            row.paid.to_string(),
            row.balance.to_string(),
            csv_escape(&row.status.to_string()),
            row.last_payment_date.map(|d| d.to_string()).unwrap_or_default(),
            row.last_payment_amount.map(|m| m.to_string()).unwrap_or_default(),
            csv_escape(row.last_payment_receipt.as_deref().unwrap_or("")),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// serialize per-class rows as CSV, header included
pub fn class_rows_to_csv(rows: &[ClassReportRow]) -> String {
    let mut out = String::from(
        "class,students,basis,paid,balance,paid_count,partially_paid_count,unpaid_count,no_fees_due_count\n",
    );
    for row in rows {
        let fields = [
            csv_escape(&row.class_name),
            row.student_count.to_string(),
            row.basis.to_string(),
            row.paid.to_string(),
            row.balance.to_string(),
            row.paid_count.to_string(),
            row.partially_paid_count.to_string(),
            row.unpaid_count.to_string(),
            row.no_fees_due_count.to_string(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentMode, StudentFeeAssignment, StudentStatus};
    use chrono::Utc;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assigned_fee(
        student_id: uuid::Uuid,
        name: &str,
        amount: i64,
        discount: i64,
        scheduled: Option<NaiveDate>,
    ) -> AssignedFee {
        AssignedFee {
            assignment: StudentFeeAssignment {
                student_id,
                fee_type_id: Uuid::new_v4(),
                school_id: Uuid::new_v4(),
                assigned_amount: Money::from_major(amount),
                discount: Money::from_major(discount),
                discount_description: None,
            },
            fee_type_name: name.to_string(),
            scheduled_date: scheduled,
            applicable_from: None,
        }
    }

    fn enriched(
        name: &str,
        class_name: &str,
        assigned: Vec<AssignedFee>,
        payments: Vec<Payment>,
    ) -> EnrichedStudent {
        EnrichedStudent {
            student: Student {
                id: Uuid::new_v4(),
                school_id: Uuid::new_v4(),
                name: name.to_string(),
                roll_no: "1".to_string(),
                class_id: Uuid::new_v4(),
                academic_year: "2025-26".to_string(),
                total_fees: assigned.iter().map(|a| a.net_amount()).sum(),
                status: Some(StudentStatus::Active),
            },
            class_name: class_name.to_string(),
            assigned,
            payments,
        }
    }

    fn payment(day: NaiveDate, amount: i64, receipt: &str) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            school_id: Uuid::new_v4(),
            date: day,
            amount_paid: Money::from_major(amount),
            mode_of_payment: PaymentMode::Cash,
            receipt_number: receipt.to_string(),
            description: None,
            recorded_at: Utc::now(),
        }
    }

    fn sample_students() -> Vec<EnrichedStudent> {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        vec![
            enriched(
                "Asha Verma",
                "Class 1",
                vec![
                    assigned_fee(a, "Tuition", 5_000, 500, Some(date(2025, 1, 1))),
                    assigned_fee(a, "Transport", 2_000, 0, Some(date(2025, 6, 1))),
                ],
                vec![
                    payment(date(2025, 2, 1), 3_000, "RCPT-001"),
                    payment(date(2025, 3, 1), 2_000, "RCPT-002"),
                ],
            ),
            enriched(
                "Bilal Khan",
                "Class 1",
                vec![assigned_fee(b, "Tuition", 5_000, 0, Some(date(2025, 1, 1)))],
                vec![],
            ),
            enriched("Chitra Rao", "Class 2", vec![], vec![]),
        ]
    }

    #[test]
    fn test_per_student_rows_on_total_basis() {
        let rows = format_rows(&sample_students(), BasisKind::Total, date(2025, 3, 1));
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].name, "Asha Verma");
        assert_eq!(rows[0].basis, Money::from_major(6_500));
        assert_eq!(rows[0].paid, Money::from_major(5_000));
        assert_eq!(rows[0].balance, Money::from_major(1_500));
        assert_eq!(rows[0].status, PaymentStatus::PartiallyPaid);
        assert_eq!(rows[0].last_payment_receipt.as_deref(), Some("RCPT-002"));

        assert_eq!(rows[1].status, PaymentStatus::Unpaid);
        assert_eq!(rows[2].status, PaymentStatus::NoFeesDue);
    }

    #[test]
    fn test_due_basis_excludes_unarrived_fees() {
        let rows = format_rows(&sample_students(), BasisKind::Due, date(2025, 3, 1));
        // transport fee (due 2025-06-01) excluded from Asha's basis
        assert_eq!(rows[0].basis, Money::from_major(4_500));
        assert_eq!(rows[0].status, PaymentStatus::Paid);
    }

    #[test]
    fn test_class_rows_sum_and_count() {
        let rows = format_class_rows(&sample_students(), BasisKind::Total, date(2025, 3, 1));
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].class_name, "Class 1");
        assert_eq!(rows[0].student_count, 2);
        assert_eq!(rows[0].basis, Money::from_major(11_500));
        assert_eq!(rows[0].paid, Money::from_major(5_000));
        assert_eq!(rows[0].partially_paid_count, 1);
        assert_eq!(rows[0].unpaid_count, 1);

        assert_eq!(rows[1].class_name, "Class 2");
        assert_eq!(rows[1].no_fees_due_count, 1);
    }

    #[test]
    fn test_csv_escapes_delimiters() {
        let student_id = Uuid::new_v4();
        let students = vec![enriched(
            "Rao, Chitra \"CR\"",
            "Class 2",
            vec![assigned_fee(student_id, "Tuition", 100, 0, None)],
            vec![],
        )];
        let csv = rows_to_csv(&format_rows(&students, BasisKind::Total, date(2025, 1, 1)));
        assert!(csv.contains("\"Rao, Chitra \"\"CR\"\"\""));
        // header plus one row
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_csv_round_trips_totals() {
        let rows = format_rows(&sample_students(), BasisKind::Total, date(2025, 3, 1));
        let csv = rows_to_csv(&rows);

        // none of the sample fields need quoting, so a plain split recovers them
        let mut basis_total = Money::ZERO;
        let mut paid_total = Money::ZERO;
        for line in csv.lines().skip(1) {
            let fields: Vec<&str> = line.split(',').collect();
            basis_total += Money::from_str_exact(fields[4]).unwrap();
            paid_total += Money::from_str_exact(fields[5]).unwrap();
        }
        assert_eq!(basis_total, rows.iter().map(|r| r.basis).sum());
        assert_eq!(paid_total, rows.iter().map(|r| r.paid).sum());
    }

    #[test]
    fn test_class_csv_shape() {
        let rows = format_class_rows(&sample_students(), BasisKind::Total, date(2025, 3, 1));
        let csv = class_rows_to_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("class,students,basis"));
        assert!(lines[1].starts_with("Class 1,2,11500"));
    }
}
