pub mod account;
pub mod assignment;
pub mod catalog;
pub mod decimal;
pub mod due;
pub mod errors;
pub mod ledger;
pub mod payments;
pub mod report;
pub mod status;
pub mod types;

// re-export key types
pub use account::{AssignmentReplacement, StudentAccount, StudentAccountView};
pub use assignment::{resolve_assignments, Discount, DiscountAdjustment, ResolvedAssignments};
pub use catalog::FeeCatalog;
pub use decimal::Money;
pub use due::{compute_due, due_assignments, is_due};
pub use errors::{FeeLedgerError, Result};
pub use ledger::{derive_ledger, LedgerBook, LedgerEntry, LedgerKind};
pub use payments::{aggregate_payments, validate_payment, PaymentSummary};
pub use report::{
    class_rows_to_csv, format_class_rows, format_rows, rows_to_csv, ClassReportRow,
    EnrichedStudent, ReportRow,
};
pub use status::classify;
pub use types::{
    AssignedFee, BasisKind, Class, ClassId, FeeType, FeeTypeClassLink, FeeTypeId, Payment,
    PaymentId, PaymentMode, PaymentStatus, SchoolId, Student, StudentFeeAssignment, StudentId,
    StudentStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
