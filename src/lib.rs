//! # livrofiscal
//!
//! Ingestion core for Brazilian NF-e fiscal documents: parses invoice
//! authorization and cancellation-event XML into a canonical record,
//! reconciles batches against an existing collection, and aggregates the
//! result into the summaries used by the Registro de Saídas / Registro de
//! Entradas ledgers.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Rounding happens only at display time via [`core::format`].
//!
//! ## Quick Start
//!
//! ```rust
//! use livrofiscal::extract::extract;
//! use livrofiscal::reconcile::reconcile;
//! use livrofiscal::summary::Summary;
//! use livrofiscal::core::CfopTables;
//!
//! let xml = r#"<?xml version="1.0"?>
//! <nfeProc xmlns="http://www.portalfiscal.inf.br/nfe">
//!   <NFe><infNFe Id="NFe35240112345678000195550010000002011000000010">
//!     <ide><nNF>201</nNF><serie>1</serie><dhEmi>2024-05-10T09:00:00-03:00</dhEmi></ide>
//!     <emit><xNome>Comercial Horizonte Ltda</xNome></emit>
//!     <dest><xNome>Mercado Azul</xNome></dest>
//!     <det><prod><CFOP>5102</CFOP></prod></det>
//!     <total><ICMSTot><vBC>1999.99</vBC><vICMS>239.99</vICMS><vNF>1999.99</vNF></ICMSTot></total>
//!   </infNFe></NFe>
//! </nfeProc>"#;
//!
//! let parsed = extract(xml).unwrap();
//! let invoices = reconcile(Vec::new(), vec![parsed]);
//! let summary = Summary::compute(&invoices, &CfopTables::default());
//! assert_eq!(summary.authorized_count, 1);
//! ```
//!
//! Signature verification, full schema validation and PDF rendering are out
//! of scope; this crate produces the reconciled collection and the report
//! row data a layout engine consumes.

pub mod core;
pub mod extract;
pub mod filter;
pub mod reconcile;
pub mod report;
pub mod summary;

// Re-export core types at crate root for convenience
pub use crate::core::*;
