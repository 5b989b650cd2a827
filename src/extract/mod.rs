//! XML record extraction: classifies a raw NF-e payload as an invoice
//! authorization or a cancellation event and lifts it into the canonical
//! model. Pure with respect to its input; errors are returned, never
//! panicked, so batch processing can skip bad files.

pub mod dom;

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::warn;

use crate::core::{
    CancellationEvent, ExtractError, Invoice, Issuer, Purpose, Recipient, Status,
};
use dom::Element;

/// tpEvento code of the cancellation event.
const CANCEL_EVENT_TYPE: &str = "110111";

/// cStat codes under which a cancellation is honored: evento registrado e
/// vinculado (135), evento registrado fora de prazo (155), and the
/// cancelamento homologado / fora de prazo pair (101, 151).
const CANCEL_ACCEPT_CODES: &[&str] = &["135", "155", "101", "151"];

/// Protocol cStat codes meaning the authorization was granted.
const AUTHORIZED_CODES: &[&str] = &["100", "150"];

static TEMP_KEY_SEQ: AtomicU64 = AtomicU64::new(1);

/// Outcome of extracting one XML document.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Invoice(Invoice),
    Cancellation(CancellationEvent),
}

/// Extract the canonical record from one NF-e XML payload.
///
/// A document carrying an `infEvento` whose tpEvento is the cancellation
/// code (or whose descEvento mentions "cancel") yields
/// [`Extracted::Cancellation`]; anything else must be an invoice
/// authorization rooted at `nfeProc` or `NFe`.
pub fn extract(xml: &str) -> Result<Extracted, ExtractError> {
    let doc = dom::parse(xml)?;

    if let Some(inf_evento) = doc.descendant("infEvento") {
        let tp_evento = inf_evento.text_of("tpEvento");
        let desc_evento = doc
            .descendant("detEvento")
            .and_then(|d| d.text_of("descEvento"))
            .map(str::to_lowercase);

        let is_cancel = tp_evento == Some(CANCEL_EVENT_TYPE)
            || desc_evento.as_deref().is_some_and(|d| d.contains("cancel"));
        if is_cancel {
            return extract_cancellation(&doc, inf_evento).map(Extracted::Cancellation);
        }
    }

    extract_invoice(&doc).map(Extracted::Invoice)
}

fn extract_cancellation(
    doc: &Element,
    inf_evento: &Element,
) -> Result<CancellationEvent, ExtractError> {
    // The authority's return protocol (retEvento) carries the outcome; the
    // event's own cStat is only a fallback for payloads without it.
    let c_stat = doc
        .descendant("retEvento")
        .and_then(|ret| ret.descendant("infEvento"))
        .and_then(|inf| inf.text_of("cStat"))
        .or_else(|| inf_evento.text_of("cStat"));

    let access_key = inf_evento
        .text_of("chNFe")
        .or_else(|| doc.descendant("infProt").and_then(|p| p.text_of("chNFe")))
        .ok_or(ExtractError::MissingReference)?;

    let accepted = c_stat.is_some_and(|c| CANCEL_ACCEPT_CODES.contains(&c));
    if !accepted {
        warn!(
            access_key,
            c_stat = c_stat.unwrap_or("?"),
            "cancellation event not confirmed by the registry, will not be applied"
        );
    }

    Ok(CancellationEvent {
        access_key: access_key.to_string(),
        accepted,
    })
}

fn extract_invoice(doc: &Element) -> Result<Invoice, ExtractError> {
    let root = doc
        .descendant("nfeProc")
        .or_else(|| doc.descendant("NFe"))
        .ok_or_else(|| ExtractError::UnrecognizedStructure("no nfeProc or NFe root".into()))?;
    let inf_nfe = root
        .descendant("infNFe")
        .ok_or_else(|| ExtractError::UnrecognizedStructure("no infNFe block".into()))?;

    let ide = inf_nfe
        .descendant("ide")
        .ok_or_else(|| ExtractError::UnrecognizedStructure("no ide block".into()))?;
    let icms_tot = inf_nfe
        .descendant("total")
        .and_then(|t| t.descendant("ICMSTot"))
        .ok_or_else(|| ExtractError::UnrecognizedStructure("no total/ICMSTot block".into()))?;

    let emit = inf_nfe.descendant("emit");
    let dest = inf_nfe.descendant("dest");
    let ender_emit = emit.and_then(|e| e.descendant("enderEmit"));
    let ender_dest = dest.and_then(|d| d.descendant("enderDest"));

    let (access_key, synthetic_key) = resolve_access_key(root, inf_nfe);

    // CFOP of the first line item; further det blocks are ignored.
    let cfop: u16 = inf_nfe
        .descendant("det")
        .and_then(|det| det.text_of("CFOP"))
        .map(parse_int)
        .unwrap_or(0);

    // Extraction never sets Canceled: cancellation is the reconciler's job.
    // A protocol status outside the authorized codes is surfaced as a
    // warning only, and the record still comes out Authorized.
    match doc.descendant("infProt").and_then(|p| p.text_of("cStat")) {
        Some(c_stat) if !AUTHORIZED_CODES.contains(&c_stat) => {
            warn!(
                %access_key,
                c_stat, "protocol status is not an authorization code, extracting as Authorized"
            );
        }
        _ => {}
    }

    Ok(Invoice {
        access_key,
        number: ide.text_of("nNF").map(parse_int).unwrap_or(0),
        series: ide.text_of("serie").map(parse_int).unwrap_or(0),
        issue_date: parse_issue_date(ide),
        issuer: Issuer {
            name: text_or(emit, "xNome", "Não identificado"),
            cnpj: text_or(emit, "CNPJ", "N/A"),
            state_registration: text_or(emit, "IE", "N/A"),
            uf: text_or(ender_emit, "UF", "N/A"),
        },
        recipient: Recipient {
            name: text_or(dest, "xNome", "Consumidor Final"),
            uf: text_or(ender_dest, "UF", "N/A"),
        },
        cfop,
        status: Status::Authorized,
        purpose: ide
            .text_of("finNFe")
            .map(Purpose::from_fin_nfe)
            .unwrap_or(Purpose::Normal),
        total_value: decimal_or_zero(icms_tot.text_of("vNF")),
        icms_base: decimal_or_zero(icms_tot.text_of("vBC")),
        icms_value: decimal_or_zero(icms_tot.text_of("vICMS")),
        synthetic_key,
    })
}

/// Access key from the infNFe Id attribute (minus the literal "NFe" prefix),
/// falling back to the protocol block, falling back to a process-unique
/// placeholder. Placeholder records can never be matched by a cancellation
/// event, so the condition is flagged.
fn resolve_access_key(root: &Element, inf_nfe: &Element) -> (String, bool) {
    if let Some(key) = inf_nfe.attr("Id").and_then(|id| id.strip_prefix("NFe")) {
        return (key.to_string(), false);
    }
    if let Some(key) = root.descendant("infProt").and_then(|p| p.text_of("chNFe")) {
        return (key.to_string(), false);
    }
    let key = format!("temp-{}", TEMP_KEY_SEQ.fetch_add(1, Ordering::Relaxed));
    warn!(
        %key,
        "document carries no access key, synthesized a non-reconcilable placeholder"
    );
    (key, true)
}

fn text_or(node: Option<&Element>, tag: &str, default: &str) -> String {
    node.and_then(|n| n.text_of(tag))
        .unwrap_or(default)
        .to_string()
}

fn parse_int<T: FromStr + Default>(text: &str) -> T {
    text.trim().parse().unwrap_or_default()
}

fn decimal_or_zero(text: Option<&str>) -> Decimal {
    text.and_then(|t| Decimal::from_str(t.trim()).ok())
        .unwrap_or(Decimal::ZERO)
}

/// dhEmi (RFC 3339 with offset) preferred, dEmi (plain date) next, today as
/// the last resort so a record with no date still sorts and filters.
fn parse_issue_date(ide: &Element) -> NaiveDate {
    if let Some(dt) = ide
        .text_of("dhEmi")
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
    {
        return dt.date_naive();
    }
    if let Some(d) = ide
        .text_of("dEmi")
        .and_then(|t| NaiveDate::parse_from_str(t, "%Y-%m-%d").ok())
    {
        return d;
    }
    warn!("document carries no parseable issue date, defaulting to today");
    Local::now().date_naive()
}
