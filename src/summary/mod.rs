//! Aggregation engine: pure summary computations over a (usually filtered)
//! invoice collection. Feeds both the on-screen cards and the ledger report
//! tables; nothing here rounds — display formatting happens in
//! [`crate::core::format`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{CfopRange, CfopTables, Invoice, Purpose, Status};

pub use crate::core::LedgerDirection;

/// Headline totals and counts over one invoice collection.
///
/// Only Authorized invoices contribute to monetary totals; Canceled ones
/// are financially neutral (their amounts were zeroed at reconciliation)
/// but still show up in `canceled_count`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of total_value where the CFOP is in the sale set.
    pub sale_total: Decimal,
    /// Sum of total_value where the CFOP is in the purchase set and the
    /// purpose is not SalesReturn.
    pub purchase_total: Decimal,
    /// ICMS in the outgoing (debit) reading: returns subtract, everything
    /// else adds.
    pub tax_debit_total: Decimal,
    /// ICMS in the incoming (credit) reading: every authorized document
    /// adds.
    pub tax_credit_total: Decimal,
    pub authorized_count: usize,
    pub canceled_count: usize,
    /// Authorized and not a return.
    pub regular_count: usize,
    /// Authorized returns.
    pub return_count: usize,
}

impl Summary {
    /// Compute the summary of `invoices` under the given category tables.
    pub fn compute(invoices: &[Invoice], tables: &CfopTables) -> Self {
        let mut s = Self {
            sale_total: Decimal::ZERO,
            purchase_total: Decimal::ZERO,
            tax_debit_total: Decimal::ZERO,
            tax_credit_total: Decimal::ZERO,
            authorized_count: 0,
            canceled_count: 0,
            regular_count: 0,
            return_count: 0,
        };

        for inv in invoices {
            if inv.status == Status::Canceled {
                s.canceled_count += 1;
                continue;
            }
            s.authorized_count += 1;
            match inv.purpose {
                Purpose::SalesReturn => {
                    s.return_count += 1;
                    s.tax_debit_total -= inv.icms_value;
                }
                Purpose::Normal => {
                    s.regular_count += 1;
                    s.tax_debit_total += inv.icms_value;
                }
            }
            s.tax_credit_total += inv.icms_value;

            if tables.is_sale(inv.cfop) {
                s.sale_total += inv.total_value;
            }
            if tables.is_purchase(inv.cfop) && inv.purpose != Purpose::SalesReturn {
                s.purchase_total += inv.total_value;
            }
        }

        s
    }
}

/// Accumulated amounts of one exact CFOP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CfopTotals {
    pub cfop: u16,
    pub total_value: Decimal,
    pub icms_base: Decimal,
    pub icms_value: Decimal,
}

/// Accumulated amounts of one counterpart state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UfTotals {
    pub uf: String,
    pub total_value: Decimal,
    pub icms_base: Decimal,
}

/// One leading-digit section of the CFOP summary, with its subtotal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CfopSection {
    pub range: CfopRange,
    pub rows: Vec<CfopTotals>,
    pub subtotal: CfopTotals,
}

/// Group Authorized invoices by exact CFOP, in ascending code order.
pub fn cfop_summary(invoices: &[Invoice]) -> Vec<CfopTotals> {
    let mut by_cfop: BTreeMap<u16, CfopTotals> = BTreeMap::new();
    for inv in authorized(invoices) {
        let entry = by_cfop.entry(inv.cfop).or_insert_with(|| CfopTotals {
            cfop: inv.cfop,
            total_value: Decimal::ZERO,
            icms_base: Decimal::ZERO,
            icms_value: Decimal::ZERO,
        });
        entry.total_value += inv.total_value;
        entry.icms_base += inv.icms_base;
        entry.icms_value += inv.icms_value;
    }
    by_cfop.into_values().collect()
}

/// Bucket the exact-CFOP summary into the direction's leading-digit report
/// sections. Sections with no rows are omitted; codes outside every section
/// of the direction do not appear. The bucketing only orders presentation —
/// row amounts are exactly those of [`cfop_summary`].
pub fn grouped_cfop_summary(invoices: &[Invoice], direction: LedgerDirection) -> Vec<CfopSection> {
    let rows = cfop_summary(invoices);
    CfopRange::for_direction(direction)
        .iter()
        .filter_map(|range| {
            let rows: Vec<CfopTotals> = rows
                .iter()
                .filter(|r| range.contains(r.cfop))
                .cloned()
                .collect();
            if rows.is_empty() {
                return None;
            }
            let mut subtotal = CfopTotals {
                cfop: 0,
                total_value: Decimal::ZERO,
                icms_base: Decimal::ZERO,
                icms_value: Decimal::ZERO,
            };
            for r in &rows {
                subtotal.total_value += r.total_value;
                subtotal.icms_base += r.icms_base;
                subtotal.icms_value += r.icms_value;
            }
            Some(CfopSection {
                range: *range,
                rows,
                subtotal,
            })
        })
        .collect()
}

/// Group Authorized invoices by the relevant counterpart's state: recipient
/// for the outgoing ledger, issuer for the incoming one. Alphabetical by UF.
pub fn uf_summary(invoices: &[Invoice], direction: LedgerDirection) -> Vec<UfTotals> {
    let mut by_uf: BTreeMap<&str, UfTotals> = BTreeMap::new();
    for inv in authorized(invoices) {
        let uf = match direction {
            LedgerDirection::Outgoing => inv.recipient.uf.as_str(),
            LedgerDirection::Incoming => inv.issuer.uf.as_str(),
        };
        let entry = by_uf.entry(uf).or_insert_with(|| UfTotals {
            uf: uf.to_string(),
            total_value: Decimal::ZERO,
            icms_base: Decimal::ZERO,
        });
        entry.total_value += inv.total_value;
        entry.icms_base += inv.icms_base;
    }
    by_uf.into_values().collect()
}

fn authorized(invoices: &[Invoice]) -> impl Iterator<Item = &Invoice> {
    invoices.iter().filter(|i| i.status == Status::Authorized)
}
