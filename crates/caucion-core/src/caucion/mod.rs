//! BYMA caución (collateralized repo financing) settlement.
//!
//! A negative term is a colocadora (the investor lends cash), a positive
//! term is a tomadora (the investor borrows cash). Both sides pay the
//! arancel and market dues on the amount-with-interest; only the tomadora
//! pays guarantee expenses. VAT applies to the sum of charges.

pub mod calculator;
pub mod report;

pub use calculator::{
    analyze_caucion, calculate_caucion, caucion_colocadora, caucion_net_amount, caucion_report,
    caucion_tomadora, term_days_from_decimal, CaucionCalculator, CaucionInput, CaucionOutput,
    CaucionSide,
};
pub use report::{ReportRow, ReportValue, REPORT_LABELS};
