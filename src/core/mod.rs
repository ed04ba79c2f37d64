//! Core generation module
//!
//! This module contains the statement generation components:
//! - `traits` - The template renderer seam
//! - `date_sampler` - Ordered date sampling within a statement period
//! - `pattern` - Transaction archetype catalogs
//! - `ledger_generator` - Reconciled ledger construction
//! - `field_mapper` - Ledger and identity fields to template slots
//! - `batch_processor` - Sequential per-record orchestration

pub mod batch_processor;
pub mod date_sampler;
pub mod field_mapper;
pub mod ledger_generator;
pub mod pattern;
pub mod traits;

pub use batch_processor::{BatchProcessor, GeneratorConfig};
pub use date_sampler::{sample_dates, SamplingContract};
pub use field_mapper::{map_fields, mask_account, MappingStyle, SlotMap};
pub use ledger_generator::LedgerGenerator;
pub use pattern::{Archetype, TransactionPattern};
pub use traits::{RenderedDocument, TemplateRenderer};
