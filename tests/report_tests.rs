use chrono::NaiveDate;
use livrofiscal::core::{CfopTables, Invoice, Issuer, LedgerDirection, Purpose, Recipient, Status};
use livrofiscal::report::LedgerReport;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn invoice(key: &str, number: u32, cfop: u16, total: Decimal) -> Invoice {
    Invoice {
        access_key: key.into(),
        number,
        series: 1,
        issue_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        issuer: Issuer {
            name: "Comercial Horizonte Ltda".into(),
            cnpj: "12345678000195".into(),
            state_registration: "110042490114".into(),
            uf: "SP".into(),
        },
        recipient: Recipient {
            name: "Mercado Azul ME".into(),
            uf: "RJ".into(),
        },
        cfop,
        status: Status::Authorized,
        purpose: Purpose::Normal,
        total_value: total,
        icms_base: total,
        icms_value: total * dec!(0.12),
        synthetic_key: false,
    }
}

#[test]
fn empty_collection_has_no_report() {
    assert!(LedgerReport::build(&[], LedgerDirection::Outgoing, &CfopTables::default()).is_none());
}

#[test]
fn header_comes_from_first_invoice() {
    let invoices = vec![invoice("k1", 201, 5102, dec!(100))];
    let report =
        LedgerReport::build(&invoices, LedgerDirection::Outgoing, &CfopTables::default()).unwrap();

    assert_eq!(report.header.title, "REGISTRO DE SAÍDAS");
    assert_eq!(report.header.firm, "Comercial Horizonte Ltda");
    assert_eq!(report.header.cnpj, "12345678000195");
    assert_eq!(report.header.state_registration, "110042490114");
    assert_eq!(report.header.period, "05/2024");
}

#[test]
fn rows_accumulate_book_value_in_collection_order() {
    let mut canceled = invoice("k2", 202, 5102, dec!(0));
    canceled.status = Status::Canceled;

    let invoices = vec![
        invoice("k1", 201, 5102, dec!(100)),
        canceled,
        invoice("k3", 203, 6108, dec!(50)),
    ];
    let report =
        LedgerReport::build(&invoices, LedgerDirection::Outgoing, &CfopTables::default()).unwrap();

    assert_eq!(report.rows.len(), 3);
    assert_eq!(report.rows[0].species, "NFE");
    assert_eq!(report.rows[0].day, "10/05/2024");
    assert_eq!(report.rows[0].accumulated_value, dec!(100));
    // Canceled rows stay visible, subtract their (zeroed) value and carry
    // the observation.
    assert_eq!(report.rows[1].observation, "CANCELADA");
    assert_eq!(report.rows[1].accumulated_value, dec!(100));
    assert_eq!(report.rows[2].observation, "");
    assert_eq!(report.rows[2].accumulated_value, dec!(150));
}

#[test]
fn uf_column_follows_direction() {
    let invoices = vec![invoice("k1", 201, 5102, dec!(100))];

    let outgoing =
        LedgerReport::build(&invoices, LedgerDirection::Outgoing, &CfopTables::default()).unwrap();
    assert_eq!(outgoing.rows[0].uf, "RJ");

    let incoming =
        LedgerReport::build(&invoices, LedgerDirection::Incoming, &CfopTables::default()).unwrap();
    assert_eq!(incoming.header.title, "REGISTRO DE ENTRADAS");
    assert_eq!(incoming.rows[0].uf, "SP");
}

#[test]
fn cfop_sections_and_grand_total_agree() {
    let invoices = vec![
        invoice("k1", 201, 5102, dec!(100)),
        invoice("k2", 202, 5405, dec!(40)),
        invoice("k3", 203, 6108, dec!(60)),
    ];
    let report =
        LedgerReport::build(&invoices, LedgerDirection::Outgoing, &CfopTables::default()).unwrap();

    assert_eq!(report.cfop_sections.len(), 2);
    let (value, base, icms) = report.cfop_grand_total;
    assert_eq!(value, dec!(200));
    assert_eq!(base, dec!(200));
    assert_eq!(icms, dec!(24));

    let subtotal_sum: Decimal = report
        .cfop_sections
        .iter()
        .map(|s| s.subtotal.total_value)
        .sum();
    assert_eq!(subtotal_sum, value);
}

#[test]
fn report_summary_matches_standalone_summary() {
    use livrofiscal::summary::Summary;

    let invoices = vec![
        invoice("k1", 201, 5102, dec!(100)),
        invoice("k2", 202, 5915, dec!(999)),
    ];
    let tables = CfopTables::default();
    let report = LedgerReport::build(&invoices, LedgerDirection::Outgoing, &tables).unwrap();

    assert_eq!(report.summary, Summary::compute(&invoices, &tables));
    assert_eq!(report.summary.sale_total, dec!(100));
}
