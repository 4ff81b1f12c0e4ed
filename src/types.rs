use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;

/// tenant identifier (one school per tenant)
pub type SchoolId = Uuid;
pub type ClassId = Uuid;
pub type FeeTypeId = Uuid;
pub type StudentId = Uuid;
pub type PaymentId = Uuid;

/// a class (grade/section) within a school
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub school_id: SchoolId,
    pub name: String,
}

/// a named category of charge with a default (undiscounted) amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeType {
    pub id: FeeTypeId,
    pub school_id: SchoolId,
    pub name: String,
    pub description: Option<String>,
    pub default_amount: Money,
    /// date on which this fee falls due; a fee with no scheduled
    /// date is never counted as currently due
    pub scheduled_date: Option<NaiveDate>,
    /// earliest date from which this fee applies at all
    pub applicable_from: Option<NaiveDate>,
}

/// many-to-many association: a fee type applies to a class only if linked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTypeClassLink {
    pub fee_type_id: FeeTypeId,
    pub class_id: ClassId,
    pub school_id: SchoolId,
}

/// enrollment status of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Active,
    Inactive,
}

/// a registered student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub school_id: SchoolId,
    pub name: String,
    pub roll_no: String,
    pub class_id: ClassId,
    pub academic_year: String,
    /// materialized sum of assigned net fee amounts; rewritten
    /// whenever the assignment set is replaced
    pub total_fees: Money,
    pub status: Option<StudentStatus>,
}

/// the association of a fee type to a student, with an optional discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentFeeAssignment {
    pub student_id: StudentId,
    pub fee_type_id: FeeTypeId,
    pub school_id: SchoolId,
    /// snapshot of the fee type's default amount at assignment time;
    /// later catalog edits do not alter existing assignments
    pub assigned_amount: Money,
    pub discount: Money,
    pub discount_description: Option<String>,
}

impl StudentFeeAssignment {
    /// net payable amount after discount
    pub fn net_amount(&self) -> Money {
        self.assigned_amount - self.discount
    }
}

/// an assignment joined with the catalog fields the calculators need,
/// normalized at the storage boundary into one fixed shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedFee {
    pub assignment: StudentFeeAssignment,
    pub fee_type_name: String,
    pub scheduled_date: Option<NaiveDate>,
    pub applicable_from: Option<NaiveDate>,
}

impl AssignedFee {
    pub fn net_amount(&self) -> Money {
        self.assignment.net_amount()
    }
}

/// mode of payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    Cash,
    Upi,
    BankTransfer,
    Cheque,
    Dd,
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Upi => "UPI",
            PaymentMode::BankTransfer => "Bank Transfer",
            PaymentMode::Cheque => "Cheque",
            PaymentMode::Dd => "DD",
        };
        write!(f, "{}", label)
    }
}

/// a recorded payment; immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub student_id: StudentId,
    pub school_id: SchoolId,
    pub date: NaiveDate,
    pub amount_paid: Money,
    pub mode_of_payment: PaymentMode,
    pub receipt_number: String,
    pub description: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// derived payment status of a student against a chosen basis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    PartiallyPaid,
    Unpaid,
    NoFeesDue,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::PartiallyPaid => "Partially Paid",
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::NoFeesDue => "No Fees Due",
        };
        write!(f, "{}", label)
    }
}

/// which denominator payments are compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasisKind {
    /// total assigned net amount
    Total,
    /// currently due net amount as of a reference date
    Due,
}
