//! Filter evaluation: decides whether an invoice belongs to the working set
//! the summaries and the on-screen table are derived from. Every field is
//! independently optional and absence passes; present fields AND together.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{Invoice, LedgerDirection, Status};

/// Temporal constraint. The incoming ledger filters by exact month, the
/// outgoing one by inclusive date range; the two styles are mutually
/// exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodFilter {
    Month { year: i32, month: u32 },
    Range {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

/// Predicate specification over one invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceFilter {
    /// Case-insensitive substring of the relevant counterpart's name:
    /// recipient on the outgoing ledger, issuer on the incoming one.
    pub counterpart: Option<String>,
    /// Exact status; `None` is the "all" wildcard.
    pub status: Option<Status>,
    pub period: Option<PeriodFilter>,
    /// Digit prefix of the stringified CFOP (e.g. "5" or "51").
    pub cfop_prefix: Option<String>,
}

impl InvoiceFilter {
    /// True when every present field passes for `invoice`.
    pub fn matches(&self, invoice: &Invoice, direction: LedgerDirection) -> bool {
        let name_ok = match &self.counterpart {
            Some(needle) => {
                let name = match direction {
                    LedgerDirection::Outgoing => &invoice.recipient.name,
                    LedgerDirection::Incoming => &invoice.issuer.name,
                };
                name.to_lowercase().contains(&needle.to_lowercase())
            }
            None => true,
        };

        let status_ok = self.status.is_none_or(|s| invoice.status == s);

        let period_ok = match &self.period {
            Some(PeriodFilter::Month { year, month }) => {
                invoice.issue_date.year() == *year && invoice.issue_date.month() == *month
            }
            Some(PeriodFilter::Range { from, to }) => {
                from.is_none_or(|f| invoice.issue_date >= f)
                    && to.is_none_or(|t| invoice.issue_date <= t)
            }
            None => true,
        };

        let cfop_ok = self
            .cfop_prefix
            .as_deref()
            .filter(|p| !p.is_empty())
            .is_none_or(|p| invoice.cfop.to_string().starts_with(p));

        name_ok && status_ok && period_ok && cfop_ok
    }

    /// The invoices that pass, in collection order. The working set is
    /// re-derived in full on every filter change, so this clones rather
    /// than borrowing.
    pub fn apply(&self, invoices: &[Invoice], direction: LedgerDirection) -> Vec<Invoice> {
        invoices
            .iter()
            .filter(|inv| self.matches(inv, direction))
            .cloned()
            .collect()
    }
}
