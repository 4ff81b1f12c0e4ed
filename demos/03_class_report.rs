/// class report - per-student and per-class rows rendered as csv
use std::collections::HashMap;

use fee_ledger_rs::chrono::{NaiveDate, Utc};
use fee_ledger_rs::{
    class_rows_to_csv, format_class_rows, format_rows, rows_to_csv, BasisKind, Class,
    DiscountAdjustment, EnrichedStudent, FeeCatalog, FeeType, Money, Payment, PaymentMode,
    StudentAccount, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let school_id = Uuid::new_v4();
    let mut catalog = FeeCatalog::new();
    catalog.register_school(school_id);

    let class = Class {
        id: Uuid::new_v4(),
        school_id,
        name: "Class 1".to_string(),
    };
    catalog.add_class(class.clone())?;

    let tuition = FeeType {
        id: Uuid::new_v4(),
        school_id,
        name: "Tuition".to_string(),
        description: None,
        default_amount: Money::from_major(5_000),
        scheduled_date: NaiveDate::from_ymd_opt(2025, 1, 1),
        applicable_from: None,
    };
    catalog.add_fee_type(tuition.clone())?;
    catalog.link(school_id, tuition.id, class.id)?;

    let mut students = Vec::new();
    for (name, roll, discount, paid) in [
        ("Asha Verma", "1", 500, 4_500),
        ("Bilal Khan", "2", 0, 2_000),
        ("Chitra Rao", "3", 0, 0),
    ] {
        let mut adjustments = HashMap::new();
        if discount > 0 {
            adjustments.insert(tuition.id, DiscountAdjustment::flat(Money::from_major(discount)));
        }
        let mut account = StudentAccount::register(
            Uuid::new_v4(),
            name.to_string(),
            roll.to_string(),
            "2025-26".to_string(),
            class.id,
            &catalog,
            school_id,
            &[tuition.id],
            &adjustments,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )?;
        if paid > 0 {
            account.record_payment(Payment {
                id: Uuid::new_v4(),
                student_id: account.student.id,
                school_id,
                date: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
                amount_paid: Money::from_major(paid),
                mode_of_payment: PaymentMode::Cash,
                receipt_number: format!("RCPT-{}", roll),
                description: None,
                recorded_at: Utc::now(),
            })?;
        }
        students.push(EnrichedStudent {
            student: account.student.clone(),
            class_name: class.name.clone(),
            assigned: account.assigned.clone(),
            payments: account.payments.clone(),
        });
    }

    let reference = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    let rows = format_rows(&students, BasisKind::Total, reference);
    println!("{}", rows_to_csv(&rows));

    let class_rows = format_class_rows(&students, BasisKind::Total, reference);
    println!("{}", class_rows_to_csv(&class_rows));

    Ok(())
}
