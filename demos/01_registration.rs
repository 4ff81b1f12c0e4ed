/// registration flow - discounts and replacing the assignment set
use std::collections::HashMap;

use fee_ledger_rs::chrono::NaiveDate;
use fee_ledger_rs::{
    Class, DiscountAdjustment, FeeCatalog, FeeType, Money, StudentAccount, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let school_id = Uuid::new_v4();
    let mut catalog = FeeCatalog::new();
    catalog.register_school(school_id);

    let class = Class {
        id: Uuid::new_v4(),
        school_id,
        name: "Class 8".to_string(),
    };
    catalog.add_class(class.clone())?;

    let tuition = fee_type(school_id, "Tuition", 20_000, Some((2025, 4, 1)));
    let transport = fee_type(school_id, "Transport", 6_000, Some((2025, 4, 1)));
    let exam = fee_type(school_id, "Exam", 1_500, Some((2025, 9, 1)));
    for f in [&tuition, &transport, &exam] {
        catalog.add_fee_type(f.clone())?;
        catalog.link(school_id, f.id, class.id)?;
    }

    // flat discount on tuition, 50% sibling discount on transport
    let mut adjustments = HashMap::new();
    adjustments.insert(
        tuition.id,
        DiscountAdjustment::flat(Money::from_major(2_000)).with_description("scholarship"),
    );
    adjustments.insert(
        transport.id,
        DiscountAdjustment::percentage(50.into()).with_description("sibling discount"),
    );

    let mut account = StudentAccount::register(
        Uuid::new_v4(),
        "Bilal Khan".to_string(),
        "7".to_string(),
        "2025-26".to_string(),
        class.id,
        &catalog,
        school_id,
        &[tuition.id, transport.id, exam.id],
        &adjustments,
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
    )?;

    println!("registered, total fees: {}", account.student.total_fees);
    for fee in &account.assigned {
        println!(
            "  {:<10} {:>9} - {:>7} = {:>9}",
            fee.fee_type_name,
            fee.assignment.assigned_amount.to_string(),
            fee.assignment.discount.to_string(),
            fee.net_amount().to_string(),
        );
    }

    // edit flow: drop the exam fee, keep the rest
    let replacement = account.replace_assignments(
        &catalog,
        class.id,
        &[tuition.id, transport.id],
        &adjustments,
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
    )?;
    println!(
        "replaced: {} -> {} ({} removed, {} added)",
        replacement.previous_total,
        replacement.new_total,
        replacement.removed.len(),
        replacement.added.len(),
    );
    account.verify_cached_total()?;

    Ok(())
}

fn fee_type(
    school_id: Uuid,
    name: &str,
    amount: i64,
    scheduled: Option<(i32, u32, u32)>,
) -> FeeType {
    FeeType {
        id: Uuid::new_v4(),
        school_id,
        name: name.to_string(),
        description: None,
        default_amount: Money::from_major(amount),
        scheduled_date: scheduled.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        applicable_from: None,
    }
}
