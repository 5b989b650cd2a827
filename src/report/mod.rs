//! Ledger report data: everything the Registro de Saídas / Registro de
//! Entradas layout engine needs, computed here so the numbers are shared
//! with the on-screen summaries. Pagination, fonts and file output belong
//! to the layout engine, not to this crate.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::format::{format_date, format_period};
use crate::core::{CfopTables, Invoice, LedgerDirection, Status};
use crate::summary::{CfopSection, Summary, UfTotals, grouped_cfop_summary, uf_summary};

/// Header block printed on every page of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportHeader {
    /// Ledger title, e.g. "REGISTRO DE SAÍDAS".
    pub title: String,
    /// Firm name, from the first invoice's issuer.
    pub firm: String,
    pub cnpj: String,
    pub state_registration: String,
    /// "MM/YYYY", from the first invoice's issue date.
    pub period: String,
}

/// One main-table row. Canceled invoices stay visible with zeroed amounts
/// and a "CANCELADA" observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRow {
    /// Document species; always "NFE" for the two recognized types.
    pub species: &'static str,
    pub series: u32,
    pub number: u32,
    /// DD/MM/YYYY.
    pub day: String,
    pub cfop: u16,
    pub uf: String,
    pub total_value: Decimal,
    /// Running book value: Authorized rows add, Canceled rows subtract.
    pub accumulated_value: Decimal,
    pub icms_base: Decimal,
    pub icms_value: Decimal,
    pub observation: &'static str,
}

/// The full data set behind one ledger document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerReport {
    pub header: ReportHeader,
    pub rows: Vec<LedgerRow>,
    /// CFOP summary sections in range order, each with its subtotal.
    pub cfop_sections: Vec<CfopSection>,
    /// Grand total across every CFOP section.
    pub cfop_grand_total: (Decimal, Decimal, Decimal),
    /// Per-state table (recipient state outgoing, issuer state incoming).
    pub uf_rows: Vec<UfTotals>,
    pub summary: Summary,
}

impl LedgerReport {
    /// Build the report data for `invoices` in collection order. Returns
    /// `None` on an empty collection — there is no issuer or period to head
    /// the document with.
    pub fn build(
        invoices: &[Invoice],
        direction: LedgerDirection,
        tables: &CfopTables,
    ) -> Option<Self> {
        let first = invoices.first()?;

        let header = ReportHeader {
            title: match direction {
                LedgerDirection::Outgoing => "REGISTRO DE SAÍDAS".to_string(),
                LedgerDirection::Incoming => "REGISTRO DE ENTRADAS".to_string(),
            },
            firm: first.issuer.name.clone(),
            cnpj: first.issuer.cnpj.clone(),
            state_registration: first.issuer.state_registration.clone(),
            period: format_period(first.issue_date),
        };

        let mut accumulated = Decimal::ZERO;
        let rows = invoices
            .iter()
            .map(|inv| {
                match inv.status {
                    Status::Authorized => accumulated += inv.total_value,
                    Status::Canceled => accumulated -= inv.total_value,
                }
                LedgerRow {
                    species: "NFE",
                    series: inv.series,
                    number: inv.number,
                    day: format_date(inv.issue_date),
                    cfop: inv.cfop,
                    uf: match direction {
                        LedgerDirection::Outgoing => inv.recipient.uf.clone(),
                        LedgerDirection::Incoming => inv.issuer.uf.clone(),
                    },
                    total_value: inv.total_value,
                    accumulated_value: accumulated,
                    icms_base: inv.icms_base,
                    icms_value: inv.icms_value,
                    observation: match inv.status {
                        Status::Canceled => "CANCELADA",
                        Status::Authorized => "",
                    },
                }
            })
            .collect();

        let cfop_sections = grouped_cfop_summary(invoices, direction);
        let mut grand = (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        for section in &cfop_sections {
            grand.0 += section.subtotal.total_value;
            grand.1 += section.subtotal.icms_base;
            grand.2 += section.subtotal.icms_value;
        }

        Some(Self {
            header,
            rows,
            cfop_sections,
            cfop_grand_total: grand,
            uf_rows: uf_summary(invoices, direction),
            summary: Summary::compute(invoices, tables),
        })
    }
}
