use chrono::NaiveDate;
use livrofiscal::core::{Invoice, Issuer, LedgerDirection, Purpose, Recipient, Status};
use livrofiscal::filter::{InvoiceFilter, PeriodFilter};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn invoice(key: &str, recipient: &str, issued: NaiveDate) -> Invoice {
    Invoice {
        access_key: key.into(),
        number: 1,
        series: 1,
        issue_date: issued,
        issuer: Issuer {
            name: "Distribuidora Acme Ltda".into(),
            cnpj: "12345678000195".into(),
            state_registration: "110042490114".into(),
            uf: "SP".into(),
        },
        recipient: Recipient {
            name: recipient.into(),
            uf: "RJ".into(),
        },
        cfop: 5102,
        status: Status::Authorized,
        purpose: Purpose::Normal,
        total_value: dec!(100),
        icms_base: dec!(100),
        icms_value: dec!(12),
        synthetic_key: false,
    }
}

#[test]
fn empty_filter_passes_everything() {
    let inv = invoice("k1", "Mercado Azul", date(2024, 5, 10));
    let filter = InvoiceFilter::default();

    assert!(filter.matches(&inv, LedgerDirection::Outgoing));
    assert!(filter.matches(&inv, LedgerDirection::Incoming));
}

#[test]
fn fields_and_together() {
    let inv = invoice("k1", "Supermercado Acme Filial", date(2024, 5, 10));

    let both = InvoiceFilter {
        counterpart: Some("acme".into()),
        status: Some(Status::Authorized),
        ..InvoiceFilter::default()
    };
    assert!(both.matches(&inv, LedgerDirection::Outgoing));

    // Flipping either predicate alone removes the invoice.
    let wrong_name = InvoiceFilter {
        counterpart: Some("horizonte".into()),
        ..both.clone()
    };
    assert!(!wrong_name.matches(&inv, LedgerDirection::Outgoing));

    let wrong_status = InvoiceFilter {
        status: Some(Status::Canceled),
        ..both
    };
    assert!(!wrong_status.matches(&inv, LedgerDirection::Outgoing));
}

#[test]
fn counterpart_depends_on_direction() {
    let inv = invoice("k1", "Mercado Azul", date(2024, 5, 10));
    let filter = InvoiceFilter {
        counterpart: Some("acme".into()),
        ..InvoiceFilter::default()
    };

    // Issuer is "Distribuidora Acme Ltda": matches only the incoming ledger.
    assert!(!filter.matches(&inv, LedgerDirection::Outgoing));
    assert!(filter.matches(&inv, LedgerDirection::Incoming));
}

#[test]
fn name_match_is_case_insensitive_substring() {
    let inv = invoice("k1", "MERCADO AZUL ME", date(2024, 5, 10));
    let filter = InvoiceFilter {
        counterpart: Some("azul".into()),
        ..InvoiceFilter::default()
    };
    assert!(filter.matches(&inv, LedgerDirection::Outgoing));
}

#[test]
fn month_filter_requires_exact_month_and_year() {
    let filter = InvoiceFilter {
        period: Some(PeriodFilter::Month { year: 2024, month: 5 }),
        ..InvoiceFilter::default()
    };

    assert!(filter.matches(&invoice("k1", "A", date(2024, 5, 31)), LedgerDirection::Incoming));
    assert!(!filter.matches(&invoice("k2", "A", date(2024, 6, 1)), LedgerDirection::Incoming));
    assert!(!filter.matches(&invoice("k3", "A", date(2023, 5, 10)), LedgerDirection::Incoming));
}

#[test]
fn range_filter_is_inclusive_with_optional_bounds() {
    let from_only = InvoiceFilter {
        period: Some(PeriodFilter::Range {
            from: Some(date(2024, 5, 10)),
            to: None,
        }),
        ..InvoiceFilter::default()
    };
    assert!(from_only.matches(&invoice("k1", "A", date(2024, 5, 10)), LedgerDirection::Outgoing));
    assert!(!from_only.matches(&invoice("k2", "A", date(2024, 5, 9)), LedgerDirection::Outgoing));

    let bounded = InvoiceFilter {
        period: Some(PeriodFilter::Range {
            from: Some(date(2024, 5, 1)),
            to: Some(date(2024, 5, 31)),
        }),
        ..InvoiceFilter::default()
    };
    assert!(bounded.matches(&invoice("k3", "A", date(2024, 5, 31)), LedgerDirection::Outgoing));
    assert!(!bounded.matches(&invoice("k4", "A", date(2024, 6, 1)), LedgerDirection::Outgoing));
}

#[test]
fn cfop_prefix_matches_stringified_code() {
    let inv = invoice("k1", "A", date(2024, 5, 10)); // cfop 5102

    let hit = InvoiceFilter {
        cfop_prefix: Some("51".into()),
        ..InvoiceFilter::default()
    };
    assert!(hit.matches(&inv, LedgerDirection::Outgoing));

    let miss = InvoiceFilter {
        cfop_prefix: Some("6".into()),
        ..InvoiceFilter::default()
    };
    assert!(!miss.matches(&inv, LedgerDirection::Outgoing));

    // Empty prefix behaves like absence.
    let empty = InvoiceFilter {
        cfop_prefix: Some(String::new()),
        ..InvoiceFilter::default()
    };
    assert!(empty.matches(&inv, LedgerDirection::Outgoing));
}

#[test]
fn apply_preserves_collection_order() {
    let invoices = vec![
        invoice("k1", "Mercado Azul", date(2024, 5, 10)),
        invoice("k2", "Padaria Central", date(2024, 5, 11)),
        invoice("k3", "Mercado Verde", date(2024, 5, 12)),
    ];
    let filter = InvoiceFilter {
        counterpart: Some("mercado".into()),
        ..InvoiceFilter::default()
    };

    let passed = filter.apply(&invoices, LedgerDirection::Outgoing);

    assert_eq!(passed.len(), 2);
    assert_eq!(passed[0].access_key, "k1");
    assert_eq!(passed[1].access_key, "k3");
}
