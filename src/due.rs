use chrono::NaiveDate;

use crate::decimal::Money;
use crate::types::AssignedFee;

/// whether a single assigned fee counts as currently due on `reference`.
///
/// a fee with no scheduled date is never due; it only becomes payable
/// once the catalog sets a date. `applicable_from` gates a fee out
/// entirely until its applicability window opens.
pub fn is_due(fee: &AssignedFee, reference: NaiveDate) -> bool {
    if let Some(from) = fee.applicable_from {
        if reference < from {
            return false;
        }
    }
    match fee.scheduled_date {
        Some(scheduled) => scheduled <= reference,
        None => false,
    }
}

/// the assigned fees currently due as of `reference`, in input order
pub fn due_assignments<'a>(assigned: &'a [AssignedFee], reference: NaiveDate) -> Vec<&'a AssignedFee> {
    assigned.iter().filter(|f| is_due(f, reference)).collect()
}

/// sum of net amounts currently due as of `reference` (date-only
/// comparison). monotone non-decreasing as `reference` advances.
pub fn compute_due(assigned: &[AssignedFee], reference: NaiveDate) -> Money {
    due_assignments(assigned, reference)
        .iter()
        .map(|f| f.net_amount())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StudentFeeAssignment;
    use uuid::Uuid;

    fn assigned_fee(
        name: &str,
        amount: i64,
        discount: i64,
        scheduled_date: Option<NaiveDate>,
        applicable_from: Option<NaiveDate>,
    ) -> AssignedFee {
        AssignedFee {
            assignment: StudentFeeAssignment {
                student_id: Uuid::new_v4(),
                fee_type_id: Uuid::new_v4(),
                school_id: Uuid::new_v4(),
                assigned_amount: Money::from_major(amount),
                discount: Money::from_major(discount),
                discount_description: None,
            },
            fee_type_name: name.to_string(),
            scheduled_date,
            applicable_from,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_only_scheduled_and_arrived_fees_due() {
        let assigned = vec![
            assigned_fee("Term 1", 5_000, 500, Some(date(2024, 1, 1)), None),
            assigned_fee("Term 2", 2_000, 0, Some(date(2099, 1, 1)), None),
        ];

        // 2099 fee not yet due; only term 1's net 4500 counts
        assert_eq!(compute_due(&assigned, date(2025, 1, 1)), Money::from_major(4_500));
        assert_eq!(due_assignments(&assigned, date(2025, 1, 1)).len(), 1);
    }

    #[test]
    fn test_due_on_the_scheduled_day_itself() {
        let assigned = vec![assigned_fee("Term 1", 1_000, 0, Some(date(2025, 4, 1)), None)];
        assert_eq!(compute_due(&assigned, date(2025, 3, 31)), Money::ZERO);
        assert_eq!(compute_due(&assigned, date(2025, 4, 1)), Money::from_major(1_000));
    }

    #[test]
    fn test_unscheduled_fee_never_due() {
        let assigned = vec![assigned_fee("Admission", 3_000, 0, None, None)];
        assert_eq!(compute_due(&assigned, date(2099, 12, 31)), Money::ZERO);
    }

    #[test]
    fn test_applicable_from_gates_due() {
        let assigned = vec![assigned_fee(
            "Exam",
            1_500,
            0,
            Some(date(2025, 1, 1)),
            Some(date(2025, 6, 1)),
        )];
        // scheduled date arrived but applicability window not open yet
        assert_eq!(compute_due(&assigned, date(2025, 3, 1)), Money::ZERO);
        assert_eq!(compute_due(&assigned, date(2025, 6, 1)), Money::from_major(1_500));
    }

    #[test]
    fn test_due_is_monotone_in_reference_date() {
        let assigned = vec![
            assigned_fee("Term 1", 5_000, 0, Some(date(2025, 1, 1)), None),
            assigned_fee("Term 2", 5_000, 0, Some(date(2025, 6, 1)), None),
            assigned_fee("Term 3", 5_000, 0, Some(date(2025, 9, 1)), None),
            assigned_fee("Misc", 800, 0, None, None),
        ];

        let mut previous = Money::ZERO;
        let mut reference = date(2024, 12, 1);
        while reference < date(2026, 1, 1) {
            let due = compute_due(&assigned, reference);
            assert!(due >= previous, "due dropped at {}", reference);
            previous = due;
            reference = reference + chrono::Duration::days(7);
        }
        assert_eq!(previous, Money::from_major(15_000));
    }

    #[test]
    fn test_empty_assignments() {
        assert_eq!(compute_due(&[], date(2025, 1, 1)), Money::ZERO);
    }
}
