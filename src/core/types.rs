use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical record of one NF-e fiscal document.
///
/// Identity is the 44-digit access key (`access_key`): two records carrying
/// the same key refer to the same legal invoice and are reconciled, never
/// duplicated. `number`/`series` identify the invoice only within the
/// issuer's numbering scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Chave de acesso — unique fiscal access key.
    pub access_key: String,
    /// nNF: invoice number within the issuer's series.
    pub number: u32,
    /// serie: numbering series.
    pub series: u32,
    /// Issue date, from dhEmi (date-time) or dEmi (date).
    pub issue_date: NaiveDate,
    /// emit: party that created the document.
    pub issuer: Issuer,
    /// dest: party that receives the goods or service.
    pub recipient: Recipient,
    /// CFOP of the first line item. Multi-item invoices are represented
    /// only by this first code — known limitation.
    pub cfop: u16,
    /// Authorization status. Mutated only by cancellation reconciliation.
    pub status: Status,
    /// Operation purpose, from ide/finNFe.
    pub purpose: Purpose,
    /// vNF: total document value.
    pub total_value: Decimal,
    /// vBC: ICMS calculation base.
    pub icms_base: Decimal,
    /// vICMS: ICMS tax amount.
    pub icms_value: Decimal,
    /// True when no access key could be found in the document and a
    /// process-unique placeholder was synthesized. Such records can never
    /// be matched by a later cancellation event.
    pub synthetic_key: bool,
}

impl Invoice {
    /// Apply a cancellation: status flips to Canceled and all monetary
    /// fields are zeroed. Idempotent.
    pub fn cancel(&mut self) {
        self.status = Status::Canceled;
        self.total_value = Decimal::ZERO;
        self.icms_base = Decimal::ZERO;
        self.icms_value = Decimal::ZERO;
    }
}

/// emit: issuing party of an NF-e.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    /// xNome, "Não identificado" when absent.
    pub name: String,
    /// CNPJ tax identifier, "N/A" when absent.
    pub cnpj: String,
    /// IE — state registration, "N/A" when absent.
    pub state_registration: String,
    /// enderEmit/UF — issuer state, "N/A" when absent. Groups the
    /// per-state summary of the incoming ledger.
    pub uf: String,
}

/// dest: receiving party of an NF-e.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// xNome, "Consumidor Final" when absent.
    pub name: String,
    /// enderDest/UF — destination state, "N/A" when absent.
    pub uf: String,
}

/// Which ledger a computation serves. Decides which counterpart's state and
/// name are "the" counterpart, and which CFOP range sections the report
/// prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerDirection {
    /// Registro de Saídas — documents issued by the user's own entity.
    Outgoing,
    /// Registro de Entradas — documents received from suppliers.
    Incoming,
}

/// Authorization status of a fiscal document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Accepted by the issuing authority's registry.
    Authorized,
    /// Voided by a confirmed cancellation event.
    Canceled,
}

/// Operation purpose (ide/finNFe). Affects aggregation sign and counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purpose {
    Normal,
    /// finNFe 4 — devolução. ICMS counts as credit on the outgoing ledger
    /// and the value is excluded from purchase totals.
    SalesReturn,
}

impl Purpose {
    /// Map an ide/finNFe code. Anything other than "4" is Normal.
    pub fn from_fin_nfe(code: &str) -> Self {
        match code {
            "4" => Self::SalesReturn,
            _ => Self::Normal,
        }
    }
}

/// Target of a cancellation-event document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationEvent {
    /// chNFe: access key of the invoice the event cancels.
    pub access_key: String,
    /// True when the event outcome code confirms the cancellation
    /// (cStat 135, 155, 101 or 151). Unconfirmed events are never applied.
    pub accepted: bool,
}
