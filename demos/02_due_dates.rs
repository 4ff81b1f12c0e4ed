/// due dates - how the currently-due amount moves with time
use std::collections::HashMap;

use fee_ledger_rs::chrono::{NaiveDate, TimeZone, Utc};
use fee_ledger_rs::{
    BasisKind, Class, FeeCatalog, FeeType, Money, SafeTimeProvider, StudentAccount, TimeSource,
    Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let school_id = Uuid::new_v4();
    let mut catalog = FeeCatalog::new();
    catalog.register_school(school_id);

    let class = Class {
        id: Uuid::new_v4(),
        school_id,
        name: "Class 3".to_string(),
    };
    catalog.add_class(class.clone())?;

    // three term fees spread over the year, one fee with no date
    let terms = [
        ("Term 1", 5_000, Some((2025, 4, 1))),
        ("Term 2", 5_000, Some((2025, 8, 1))),
        ("Term 3", 5_000, Some((2025, 12, 1))),
        ("Library", 800, None),
    ];
    let mut selections = Vec::new();
    for (name, amount, scheduled) in terms {
        let fee = FeeType {
            id: Uuid::new_v4(),
            school_id,
            name: name.to_string(),
            description: None,
            default_amount: Money::from_major(amount),
            scheduled_date: scheduled.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            applicable_from: None,
        };
        catalog.add_fee_type(fee.clone())?;
        catalog.link(school_id, fee.id, class.id)?;
        selections.push(fee.id);
    }

    let account = StudentAccount::register(
        Uuid::new_v4(),
        "Chitra Rao".to_string(),
        "12".to_string(),
        "2025-26".to_string(),
        class.id,
        &catalog,
        school_id,
        &selections,
        &HashMap::new(),
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
    )?;

    // walk a test clock through the year; the due amount only ever grows,
    // and the library fee (no scheduled date) never becomes due
    for month in [3, 4, 8, 12] {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2025, month, 15, 9, 0, 0).unwrap(),
        ));
        let reference = time.now().date_naive();
        println!(
            "{}: due {} of {} assigned, status {}",
            reference,
            account.due_as_of(reference),
            account.total_assigned(),
            account.status_now(BasisKind::Due, &time),
        );
    }

    Ok(())
}
