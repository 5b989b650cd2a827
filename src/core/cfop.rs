use std::collections::BTreeSet;

use super::types::LedgerDirection;

/// CFOPs that characterize a sale of goods or services. Keeping this as an
/// explicit membership list prevents remessas, devoluções de compra and the
/// like from being summed as revenue.
const SALE_CFOPS: &[u16] = &[
    // Vendas de produção do estabelecimento
    5101, 5102, 5103, 5104, 5105, 5106, 5109, 5110, //
    6101, 6102, 6103, 6104, 6105, 6106, 6107, 6108, 6109, 6110,
    // Vendas de mercadorias adquiridas ou recebidas de terceiros
    5111, 5112, 5113, 5114, 5115, 5116, 5117, 5118, 5119, 5120, 5122, 5123, 5124, 5125, //
    6111, 6112, 6113, 6114, 6115, 6116, 6117, 6118, 6119, 6120, 6122, 6123, 6124, 6125,
    // Vendas com substituição tributária
    5401, 5402, 5403, 5405, 6401, 6402, 6403, 6404,
    // Vendas de combustíveis ou lubrificantes
    5651, 5652, 5653, 5654, 5655, 5656, 6651, 6652, 6653, 6654, 6655, 6656,
    // Vendas para Zona Franca de Manaus
    7101, 7102, 7105, 7106, 7127,
];

/// CFOPs that characterize a purchase.
const PURCHASE_CFOPS: &[u16] = &[
    // Compras para industrialização, comercialização ou prestação de serviços
    1101, 1102, 1111, 1113, 1116, 1117, 1118, 1120, 1121, 1122, 1124, 1125, 1126, 1128, //
    2101, 2102, 2111, 2113, 2116, 2117, 2118, 2120, 2121, 2122, 2124, 2125, 2126, 2128,
    // Compras para ativo imobilizado e uso/consumo
    1551, 1556, 2551, 2556,
    // Compras com ST
    1401, 1403, 1407, 2401, 2403, 2407,
];

/// CFOP category membership used by the aggregation engine.
///
/// Codes outside both sets are transfers, remessas and other operations:
/// excluded from sale/purchase totals but still counted in invoice counts.
/// Injectable so tests (or a different fiscal profile) can substitute
/// alternate tables; [`CfopTables::default`] carries the curated lists.
#[derive(Debug, Clone)]
pub struct CfopTables {
    pub sale: BTreeSet<u16>,
    pub purchase: BTreeSet<u16>,
}

impl Default for CfopTables {
    fn default() -> Self {
        Self {
            sale: SALE_CFOPS.iter().copied().collect(),
            purchase: PURCHASE_CFOPS.iter().copied().collect(),
        }
    }
}

impl CfopTables {
    pub fn is_sale(&self, cfop: u16) -> bool {
        self.sale.contains(&cfop)
    }

    pub fn is_purchase(&self, cfop: u16) -> bool {
        self.purchase.contains(&cfop)
    }
}

/// One leading-digit section of the CFOP summary table. Purely a report
/// presentation grouping; it never changes totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CfopRange {
    /// Leading digit of every CFOP in the section.
    pub leading_digit: u8,
    /// Section header printed on the ledger.
    pub title: &'static str,
}

impl CfopRange {
    /// Section headers of the ledger for the given direction, in print order.
    pub fn for_direction(direction: LedgerDirection) -> &'static [CfopRange] {
        match direction {
            LedgerDirection::Outgoing => &[
                CfopRange {
                    leading_digit: 5,
                    title: "5000 - Saídas e/ou Prestação de serviços no estado",
                },
                CfopRange {
                    leading_digit: 6,
                    title: "6000 - Saídas e/ou Prestação de serviços de outros estados",
                },
            ],
            LedgerDirection::Incoming => &[
                CfopRange {
                    leading_digit: 1,
                    title: "1000 - Entradas e/ou Aquisições de Serviços do Estado",
                },
                CfopRange {
                    leading_digit: 2,
                    title: "2000 - Entradas e/ou Aquisições de Serviços de Outros Estados",
                },
                CfopRange {
                    leading_digit: 3,
                    title: "3000 - Entradas e/ou Aquisições de Serviços do Exterior",
                },
            ],
        }
    }

    pub fn contains(&self, cfop: u16) -> bool {
        cfop / 1000 == u16::from(self.leading_digit)
    }
}
