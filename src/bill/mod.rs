//! Stateless bill calculation over a resolved tariff schedule.

pub mod engine;
pub mod error;
pub mod report;
pub mod slabs;
pub mod surcharge;
pub mod tax;
pub mod types;
pub mod units;

pub use engine::{calculate_bill, calculate_bill_with};
pub use error::{BillError, ValidationError};
pub use types::{BillInput, BillResult, SlabBreakdown, SlabLine, Surcharges, Taxes};
