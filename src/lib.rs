//! Statement Generator Library
//! # Overview
//!
//! This library generates synthetic account statements: a ledger of dated
//! withdrawals and deposits whose running balance always reconciles, projected
//! onto the named slots of a document template.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Money, StatementPeriod, Ledger, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Generation components:
//!   - [`core::date_sampler`] - Ordered date sampling within a period
//!   - [`core::pattern`] - Transaction archetype catalogs
//!   - [`core::ledger_generator`] - Reconciled ledger construction
//!   - [`core::field_mapper`] - Template slot mapping
//!   - [`core::batch_processor`] - Per-record orchestration with partial success
//! - [`strategy`] - Per-document-type configuration
//! - [`io`] - Request parsing, response envelopes, and renderers
//!
//! # Ledger Equation
//!
//! Every generated ledger satisfies
//! `closing_balance == opening_balance + total_in - total_out`, computed in
//! whole cents, and its last line carries the closing balance.

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{BatchProcessor, GeneratorConfig, LedgerGenerator, TemplateRenderer};
pub use io::{write_envelope, BatchEnvelope};
pub use types::{
    Direction, IdentityFields, Ledger, Money, StatementError, StatementPeriod, StatementRequest,
    TransactionLine,
};
