//! Statutory and market fee rates applied to every caución.
//!
//! The defaults are the BYMA schedule. A schedule is an immutable value
//! handed to [`crate::caucion::CaucionCalculator`]; nothing here is global
//! or mutable.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CaucionError;
use crate::types::Rate;
use crate::CaucionResult;

/// Derechos de mercado: 0.045% per 90 days, pro-rated daily.
pub const MARKET_DUES_DAILY_RATE: Rate = dec!(0.000005);

/// Gastos de garantía: 0.045% per 90 days, pro-rated daily. Tomadora only.
pub const GUARANTEE_EXPENSE_DAILY_RATE: Rate = dec!(0.000005);

/// IVA applied on the sum of charges.
pub const VAT_RATE: Rate = dec!(0.21);

/// Arancel TNA charged to the colocadora when no override is given.
pub const DEFAULT_PLACER_FEE_RATE: Rate = dec!(0.015);

/// Arancel TNA charged to the tomadora when no override is given.
pub const DEFAULT_BORROWER_FEE_RATE: Rate = dec!(0.04);

/// Fee and tax rates used by the calculator.
///
/// Deserialization fills missing fields from the BYMA defaults, so a
/// config file only needs the rates it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    /// Daily market-dues rate applied to the amount with interest.
    pub market_dues_daily_rate: Rate,
    /// Daily guarantee-expense rate, charged to the borrowing side only.
    pub guarantee_expense_daily_rate: Rate,
    /// VAT on charges (decimal: 0.21 = 21%).
    pub vat_rate: Rate,
    /// Arancel TNA for the lending side.
    pub default_placer_fee_rate: Rate,
    /// Arancel TNA for the borrowing side.
    pub default_borrower_fee_rate: Rate,
}

impl FeeSchedule {
    /// The BYMA schedule.
    pub const fn byma() -> Self {
        FeeSchedule {
            market_dues_daily_rate: MARKET_DUES_DAILY_RATE,
            guarantee_expense_daily_rate: GUARANTEE_EXPENSE_DAILY_RATE,
            vat_rate: VAT_RATE,
            default_placer_fee_rate: DEFAULT_PLACER_FEE_RATE,
            default_borrower_fee_rate: DEFAULT_BORROWER_FEE_RATE,
        }
    }

    /// Reject schedules with negative rates.
    pub fn validate(&self) -> CaucionResult<()> {
        let fields = [
            ("market_dues_daily_rate", self.market_dues_daily_rate),
            ("guarantee_expense_daily_rate", self.guarantee_expense_daily_rate),
            ("vat_rate", self.vat_rate),
            ("default_placer_fee_rate", self.default_placer_fee_rate),
            ("default_borrower_fee_rate", self.default_borrower_fee_rate),
        ];
        for (field, rate) in fields {
            if rate < Decimal::ZERO {
                return Err(CaucionError::InvalidArgument {
                    field: field.into(),
                    reason: "Fee schedule rates must be non-negative.".into(),
                });
            }
        }
        Ok(())
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::byma()
    }
}
