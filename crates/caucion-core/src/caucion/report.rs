use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculator::{CaucionCalculator, CaucionInput, CaucionOutput};
use crate::CaucionResult;

/// Row labels of the detailed report, in output order.
pub const REPORT_LABELS: [&str; 16] = [
    "Días",
    "TNA",
    "Importe Bruto",
    "Tasa Efectiva",
    "Tipo",
    "Tasa Arancel",
    "Interés",
    "Interés Neto",
    "Importe con Interés",
    "Arancel",
    "Derechos de Mercado",
    "Gastos de Garantía",
    "Gastos Totales",
    "IVA sobre Gastos",
    "Total Gastos con IVA",
    "Importe Neto",
];

/// A report cell. Only the side label is text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    Number(Decimal),
    Text(String),
}

impl std::fmt::Display for ReportValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportValue::Number(n) => write!(f, "{}", n),
            ReportValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One (label, value) line of the two-column report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub value: ReportValue,
}

impl CaucionOutput {
    /// Project every field into labelled rows, in [`REPORT_LABELS`] order.
    pub fn report_rows(&self) -> Vec<ReportRow> {
        let values = [
            ReportValue::Number(Decimal::from(self.term_days)),
            ReportValue::Number(self.annual_rate),
            ReportValue::Number(self.gross_amount),
            ReportValue::Number(self.effective_rate),
            ReportValue::Text(self.side.to_string()),
            ReportValue::Number(self.fee_rate),
            ReportValue::Number(self.interest),
            ReportValue::Number(self.net_interest),
            ReportValue::Number(self.amount_with_interest),
            ReportValue::Number(self.arancel),
            ReportValue::Number(self.market_dues),
            ReportValue::Number(self.guarantee_expense),
            ReportValue::Number(self.charges),
            ReportValue::Number(self.vat_on_charges),
            ReportValue::Number(self.total_charges),
            ReportValue::Number(self.net_amount),
        ];

        REPORT_LABELS
            .iter()
            .zip(values)
            .map(|(label, value)| ReportRow {
                label: (*label).to_string(),
                value,
            })
            .collect()
    }
}

impl CaucionCalculator {
    /// Detailed two-column report of a caución.
    pub fn report(&self, input: &CaucionInput) -> CaucionResult<Vec<ReportRow>> {
        Ok(self.compute(input)?.report_rows())
    }
}
