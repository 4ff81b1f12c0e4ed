use thiserror::Error;
use uuid::Uuid;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum FeeLedgerError {
    #[error("school not found: {school_id}")]
    SchoolNotFound {
        school_id: Uuid,
    },

    #[error("class not found: {class_id}")]
    ClassNotFound {
        class_id: Uuid,
    },

    #[error("student not found: {student_id}")]
    StudentNotFound {
        student_id: Uuid,
    },

    #[error("fee type not found: {fee_type_id}")]
    FeeTypeNotFound {
        fee_type_id: Uuid,
    },

    #[error("fee type {fee_type_id} is not applicable to class {class_id}")]
    InvalidSelection {
        fee_type_id: Uuid,
        class_id: Uuid,
    },

    #[error("invalid discount for fee type {fee_type_id}: {discount} not in [0, {assigned_amount}]")]
    InvalidDiscount {
        fee_type_id: Uuid,
        discount: Money,
        assigned_amount: Money,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("missing receipt number for payment of {amount}")]
    MissingReceiptNumber {
        amount: Money,
    },

    #[error("duplicate receipt number: {receipt_number}")]
    DuplicateReceipt {
        receipt_number: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("inconsistent state for student {student_id}: cached total {cached}, recomputed {computed}")]
    InconsistentState {
        student_id: Uuid,
        cached: Money,
        computed: Money,
    },
}

pub type Result<T> = std::result::Result<T, FeeLedgerError>;
