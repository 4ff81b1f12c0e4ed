/// quick start - minimal example to get started
use std::collections::HashMap;

use fee_ledger_rs::chrono::{NaiveDate, Utc};
use fee_ledger_rs::{
    BasisKind, Class, FeeCatalog, FeeType, Money, Payment, PaymentMode, StudentAccount, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let school_id = Uuid::new_v4();
    let mut catalog = FeeCatalog::new();
    catalog.register_school(school_id);

    // one class with one linked fee type
    let class = Class {
        id: Uuid::new_v4(),
        school_id,
        name: "Class 5".to_string(),
    };
    catalog.add_class(class.clone())?;

    let tuition = FeeType {
        id: Uuid::new_v4(),
        school_id,
        name: "Tuition".to_string(),
        description: None,
        default_amount: Money::from_major(12_000),
        scheduled_date: NaiveDate::from_ymd_opt(2025, 4, 1),
        applicable_from: None,
    };
    catalog.add_fee_type(tuition.clone())?;
    catalog.link(school_id, tuition.id, class.id)?;

    // register a student with the tuition fee, no discount
    let mut account = StudentAccount::register(
        Uuid::new_v4(),
        "Asha Verma".to_string(),
        "23".to_string(),
        "2025-26".to_string(),
        class.id,
        &catalog,
        school_id,
        &[tuition.id],
        &HashMap::new(),
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
    )?;

    // record a payment
    account.record_payment(Payment {
        id: Uuid::new_v4(),
        student_id: account.student.id,
        school_id,
        date: NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
        amount_paid: Money::from_major(5_000),
        mode_of_payment: PaymentMode::Upi,
        receipt_number: "RCPT-0001".to_string(),
        description: None,
        recorded_at: Utc::now(),
    })?;

    let today = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
    println!("assigned: {}", account.total_assigned());
    println!("paid:     {}", account.total_paid());
    println!("balance:  {}", account.balance());
    println!("status:   {}", account.status(BasisKind::Total, today));

    Ok(())
}
