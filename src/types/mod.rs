//! Types module
//!
//! Contains the data structures shared across the generator:
//! - `money`: integer-cents amounts
//! - `period`: validated statement periods
//! - `ledger`: generated statement lines and totals
//! - `identity`: caller-supplied identity fields and request records
//! - `error`: error types for statement generation

pub mod error;
pub mod identity;
pub mod ledger;
pub mod money;
pub mod period;

pub use error::StatementError;
pub use identity::{IdentityFields, StatementRequest};
pub use ledger::{Direction, Ledger, TransactionLine};
pub use money::Money;
pub use period::StatementPeriod;
