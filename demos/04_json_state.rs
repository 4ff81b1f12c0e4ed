/// json state - serializable account snapshots for the presentation layer
use std::collections::HashMap;

use fee_ledger_rs::chrono::{NaiveDate, Utc};
use fee_ledger_rs::{
    Class, FeeCatalog, FeeType, Money, Payment, PaymentMode, StudentAccount, StudentAccountView,
    Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let school_id = Uuid::new_v4();
    let mut catalog = FeeCatalog::new();
    catalog.register_school(school_id);

    let class = Class {
        id: Uuid::new_v4(),
        school_id,
        name: "Class 2".to_string(),
    };
    catalog.add_class(class.clone())?;

    let tuition = FeeType {
        id: Uuid::new_v4(),
        school_id,
        name: "Tuition".to_string(),
        description: Some("Annual tuition".to_string()),
        default_amount: Money::from_major(8_000),
        scheduled_date: NaiveDate::from_ymd_opt(2025, 4, 1),
        applicable_from: None,
    };
    catalog.add_fee_type(tuition.clone())?;
    catalog.link(school_id, tuition.id, class.id)?;

    let mut account = StudentAccount::register(
        Uuid::new_v4(),
        "Deepak Nair".to_string(),
        "4".to_string(),
        "2025-26".to_string(),
        class.id,
        &catalog,
        school_id,
        &[tuition.id],
        &HashMap::new(),
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
    )?;

    account.record_payment(Payment {
        id: Uuid::new_v4(),
        student_id: account.student.id,
        school_id,
        date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
        amount_paid: Money::from_major(8_000),
        mode_of_payment: PaymentMode::Cheque,
        receipt_number: "RCPT-0042".to_string(),
        description: Some("Full payment".to_string()),
        recorded_at: Utc::now(),
    })?;

    let reference = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
    let json = account.json(reference);
    println!("{}", json);

    // the snapshot round-trips through serde
    let view: StudentAccountView = serde_json::from_str(&json)?;
    assert_eq!(view.balance, Money::ZERO);

    // the full ledger is also serializable
    println!("{}", serde_json::to_string_pretty(account.ledger())?);

    Ok(())
}
