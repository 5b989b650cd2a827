//! Core data model shared by every stage of the pipeline: the canonical
//! invoice record, the error taxonomy, CFOP category tables and the pt-BR
//! display formatting helpers.

mod cfop;
mod error;
pub mod format;
mod types;

pub use cfop::{CfopRange, CfopTables};
pub use error::{ExtractError, ImportError};
pub use types::{CancellationEvent, Invoice, Issuer, LedgerDirection, Purpose, Recipient, Status};
