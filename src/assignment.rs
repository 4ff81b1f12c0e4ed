use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{FeeLedgerError, Result};
use crate::types::{AssignedFee, ClassId, FeeType, FeeTypeId, SchoolId, StudentFeeAssignment, StudentId};

/// a discount applied to one assignment at resolution time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Discount {
    /// flat amount off the assigned amount
    Flat(Money),
    /// percentage of the assigned amount, converted to a flat
    /// amount when the assignment is resolved
    Percentage(Decimal),
}

/// per-fee-type adjustment chosen at registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountAdjustment {
    pub discount: Discount,
    pub description: Option<String>,
}

impl DiscountAdjustment {
    pub fn flat(amount: Money) -> Self {
        Self {
            discount: Discount::Flat(amount),
            description: None,
        }
    }

    pub fn percentage(rate: Decimal) -> Self {
        Self {
            discount: Discount::Percentage(rate),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// outcome of resolving a student's fee selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAssignments {
    pub assignments: Vec<AssignedFee>,
    pub total_assigned: Money,
}

/// resolve a student's selected fee types against the class catalog.
///
/// each selection must be applicable to the student's class; the assigned
/// amount snapshots the fee type's default amount; discounts are validated
/// into `[0, assigned_amount]`. output order is by fee type name then id,
/// so identical inputs always yield identical output.
pub fn resolve_assignments(
    student_id: StudentId,
    school_id: SchoolId,
    class_id: ClassId,
    class_fee_types: &[FeeType],
    selections: &[FeeTypeId],
    adjustments: &HashMap<FeeTypeId, DiscountAdjustment>,
) -> Result<ResolvedAssignments> {
    // selections are a set; duplicates collapse
    let selected: BTreeSet<FeeTypeId> = selections.iter().copied().collect();

    let mut assignments = Vec::with_capacity(selected.len());
    let mut total_assigned = Money::ZERO;

    for fee_type_id in selected {
        let fee_type = class_fee_types
            .iter()
            .find(|f| f.id == fee_type_id)
            .ok_or(FeeLedgerError::InvalidSelection {
                fee_type_id,
                class_id,
            })?;

        let assigned_amount = fee_type.default_amount;
        let (discount, discount_description) = match adjustments.get(&fee_type_id) {
            Some(adjustment) => {
                let amount = match adjustment.discount {
                    Discount::Flat(amount) => amount,
                    Discount::Percentage(rate) => {
                        if rate < Decimal::ZERO || rate > Decimal::from(100) {
                            return Err(FeeLedgerError::InvalidDiscount {
                                fee_type_id,
                                discount: assigned_amount.percentage(rate),
                                assigned_amount,
                            });
                        }
                        assigned_amount.percentage(rate)
                    }
                };
                (amount, adjustment.description.clone())
            }
            None => (Money::ZERO, None),
        };

        if discount.is_negative() || discount > assigned_amount {
            return Err(FeeLedgerError::InvalidDiscount {
                fee_type_id,
                discount,
                assigned_amount,
            });
        }

        let assignment = StudentFeeAssignment {
            student_id,
            fee_type_id,
            school_id,
            assigned_amount,
            discount,
            discount_description,
        };
        total_assigned += assignment.net_amount();

        assignments.push(AssignedFee {
            assignment,
            fee_type_name: fee_type.name.clone(),
            scheduled_date: fee_type.scheduled_date,
            applicable_from: fee_type.applicable_from,
        });
    }

    assignments.sort_by(|a, b| {
        a.fee_type_name
            .cmp(&b.fee_type_name)
            .then(a.assignment.fee_type_id.cmp(&b.assignment.fee_type_id))
    });

    Ok(ResolvedAssignments {
        assignments,
        total_assigned,
    })
}

/// recompute the total a student's cached `total_fees` must equal
pub fn total_net_amount(assignments: &[AssignedFee]) -> Money {
    assignments.iter().map(|a| a.net_amount()).sum()
}
