//! Caución settlement calculator.
//!
//! Pipeline, run in fixed order for every call:
//! 1. **Effective rate** -- simple accrual `tna * days / 365`, no compounding.
//! 2. **Gross interest** -- `gross_amount * effective_rate`.
//! 3. **Fee-rate selection** -- colocadora or tomadora arancel TNA.
//! 4. **Market charges** -- arancel, derechos de mercado and gastos de
//!    garantía, all levied on the amount with interest.
//! 5. **Tax and net settlement** -- IVA on charges; charges reduce the
//!    colocadora payout and increase the tomadora repayment.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CaucionError;
use crate::fee_schedule::FeeSchedule;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::CaucionResult;

/// Day-count denominator for TNA accrual.
const DAYS_PER_YEAR: Decimal = dec!(365);

/// Annual rates above this are almost always a percentage typed as a fraction.
const SUSPICIOUS_ANNUAL_RATE: Rate = dec!(10);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which side of the caución the investor is on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CaucionSide {
    /// Lender: places cash and earns interest.
    Colocadora,
    /// Borrower: takes cash and pays interest.
    Tomadora,
}

impl std::fmt::Display for CaucionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaucionSide::Colocadora => write!(f, "Colocadora"),
            CaucionSide::Tomadora => write!(f, "Tomadora"),
        }
    }
}

/// Input for a caución calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaucionInput {
    /// Signed term in calendar days: negative = colocadora, positive = tomadora.
    /// Whole-number floats such as `7.0` are accepted.
    #[serde(deserialize_with = "deserialize_term_days")]
    pub term_days: i64,
    /// Nominal annual rate (TNA, decimal: 1.20 = 120%).
    pub annual_rate: Rate,
    /// Principal in local currency.
    pub gross_amount: Money,
    /// Arancel TNA override for the colocadora side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placer_fee_rate: Option<Rate>,
    /// Arancel TNA override for the tomadora side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrower_fee_rate: Option<Rate>,
}

impl CaucionInput {
    /// Input with no fee overrides.
    pub fn new(term_days: i64, annual_rate: Rate, gross_amount: Money) -> Self {
        CaucionInput {
            term_days,
            annual_rate,
            gross_amount,
            placer_fee_rate: None,
            borrower_fee_rate: None,
        }
    }
}

/// Every intermediate and final quantity of a caución, in report order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaucionOutput {
    /// Signed term as supplied.
    pub term_days: i64,
    /// TNA as supplied.
    pub annual_rate: Rate,
    /// Principal as supplied.
    pub gross_amount: Money,
    /// Period rate = annual_rate * |term| / 365.
    pub effective_rate: Rate,
    pub side: CaucionSide,
    /// Arancel TNA actually applied.
    pub fee_rate: Rate,
    /// Gross interest = gross_amount * effective_rate.
    pub interest: Money,
    /// Interest after charges: reduced for colocadora, increased for tomadora.
    pub net_interest: Money,
    /// gross_amount + interest. Base for every charge.
    pub amount_with_interest: Money,
    pub arancel: Money,
    pub market_dues: Money,
    /// Always zero for a colocadora.
    pub guarantee_expense: Money,
    /// arancel + market_dues + guarantee_expense.
    pub charges: Money,
    pub vat_on_charges: Money,
    pub total_charges: Money,
    /// Cash received (colocadora) or owed (tomadora) at settlement.
    pub net_amount: Money,
}

impl CaucionOutput {
    pub fn is_colocadora(&self) -> bool {
        self.side == CaucionSide::Colocadora
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Caución calculator bound to a validated fee schedule.
///
/// Holds no mutable state; a single instance may be shared freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaucionCalculator {
    schedule: FeeSchedule,
}

impl CaucionCalculator {
    /// Build a calculator, rejecting schedules with negative rates.
    pub fn new(schedule: FeeSchedule) -> CaucionResult<Self> {
        schedule.validate()?;
        Ok(CaucionCalculator { schedule })
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Run the full pipeline.
    pub fn compute(&self, input: &CaucionInput) -> CaucionResult<CaucionOutput> {
        validate_caucion_input(input)?;

        let side = if input.term_days < 0 {
            CaucionSide::Colocadora
        } else {
            CaucionSide::Tomadora
        };
        let days = Decimal::from(input.term_days.unsigned_abs());
        let schedule = &self.schedule;

        let effective_rate = effective_rate(input.annual_rate, days)?;
        let interest = checked(input.gross_amount.checked_mul(effective_rate), "interest")?;
        let amount_with_interest = checked(
            input.gross_amount.checked_add(interest),
            "amount_with_interest",
        )?;

        let fee_rate = self.fee_rate(side, input);
        let arancel = arancel(amount_with_interest, fee_rate, days)?;
        let market_dues = daily_charge(
            amount_with_interest,
            schedule.market_dues_daily_rate,
            days,
            "market_dues",
        )?;
        let guarantee_expense = match side {
            CaucionSide::Colocadora => Decimal::ZERO,
            CaucionSide::Tomadora => daily_charge(
                amount_with_interest,
                schedule.guarantee_expense_daily_rate,
                days,
                "guarantee_expense",
            )?,
        };

        let charges = checked(
            arancel
                .checked_add(market_dues)
                .and_then(|c| c.checked_add(guarantee_expense)),
            "charges",
        )?;
        let vat_on_charges = checked(charges.checked_mul(schedule.vat_rate), "vat_on_charges")?;
        let total_charges = checked(charges.checked_add(vat_on_charges), "total_charges")?;

        let (net_interest, net_amount) = match side {
            CaucionSide::Colocadora => (
                interest.checked_sub(total_charges),
                amount_with_interest.checked_sub(total_charges),
            ),
            CaucionSide::Tomadora => (
                interest.checked_add(total_charges),
                amount_with_interest.checked_add(total_charges),
            ),
        };
        let net_interest = checked(net_interest, "net_interest")?;
        let net_amount = checked(net_amount, "net_amount")?;

        tracing::debug!(
            side = %side,
            term_days = input.term_days,
            fee_rate = %fee_rate,
            net_amount = %net_amount,
            "caucion computed"
        );

        Ok(CaucionOutput {
            term_days: input.term_days,
            annual_rate: input.annual_rate,
            gross_amount: input.gross_amount,
            effective_rate,
            side,
            fee_rate,
            interest,
            net_interest,
            amount_with_interest,
            arancel,
            market_dues,
            guarantee_expense,
            charges,
            vat_on_charges,
            total_charges,
            net_amount,
        })
    }

    /// Net settlement amount only.
    pub fn net_amount(&self, input: &CaucionInput) -> CaucionResult<Money> {
        Ok(self.compute(input)?.net_amount)
    }

    /// Colocadora with a positive day count. The sign is applied here.
    pub fn colocadora(
        &self,
        days: i64,
        annual_rate: Rate,
        gross_amount: Money,
        fee_rate: Option<Rate>,
    ) -> CaucionResult<Money> {
        validate_positive_days(days, CaucionSide::Colocadora)?;
        let input = CaucionInput {
            placer_fee_rate: fee_rate,
            ..CaucionInput::new(-days, annual_rate, gross_amount)
        };
        self.net_amount(&input)
    }

    /// Tomadora with a positive day count.
    pub fn tomadora(
        &self,
        days: i64,
        annual_rate: Rate,
        gross_amount: Money,
        fee_rate: Option<Rate>,
    ) -> CaucionResult<Money> {
        validate_positive_days(days, CaucionSide::Tomadora)?;
        let input = CaucionInput {
            borrower_fee_rate: fee_rate,
            ..CaucionInput::new(days, annual_rate, gross_amount)
        };
        self.net_amount(&input)
    }

    /// Only `None` falls back to the schedule; an explicit zero is kept.
    fn fee_rate(&self, side: CaucionSide, input: &CaucionInput) -> Rate {
        match side {
            CaucionSide::Colocadora => input
                .placer_fee_rate
                .unwrap_or(self.schedule.default_placer_fee_rate),
            CaucionSide::Tomadora => input
                .borrower_fee_rate
                .unwrap_or(self.schedule.default_borrower_fee_rate),
        }
    }
}

fn effective_rate(annual_rate: Rate, days: Decimal) -> CaucionResult<Rate> {
    checked(
        annual_rate
            .checked_mul(days)
            .and_then(|r| r.checked_div(DAYS_PER_YEAR)),
        "effective_rate",
    )
}

fn arancel(amount_with_interest: Money, fee_rate: Rate, days: Decimal) -> CaucionResult<Money> {
    checked(
        amount_with_interest
            .checked_mul(fee_rate)
            .and_then(|a| a.checked_mul(days))
            .and_then(|a| a.checked_div(DAYS_PER_YEAR)),
        "arancel",
    )
}

fn daily_charge(
    amount_with_interest: Money,
    daily_rate: Rate,
    days: Decimal,
    field: &str,
) -> CaucionResult<Money> {
    checked(
        amount_with_interest
            .checked_mul(daily_rate)
            .and_then(|c| c.checked_mul(days)),
        field,
    )
}

/// Map an overflowed Decimal operation to an error naming the quantity.
fn checked(value: Option<Decimal>, field: &str) -> CaucionResult<Decimal> {
    value.ok_or_else(|| CaucionError::InvalidArgument {
        field: field.into(),
        reason: "Result overflows the decimal range; reduce the term, rate or amount.".into(),
    })
}

fn validate_caucion_input(input: &CaucionInput) -> CaucionResult<()> {
    if input.term_days == 0 {
        return Err(CaucionError::InvalidArgument {
            field: "term_days".into(),
            reason: "Term must be a non-zero number of days (negative = colocadora, positive = tomadora).".into(),
        });
    }
    if input.annual_rate < Decimal::ZERO {
        return Err(CaucionError::InvalidArgument {
            field: "annual_rate".into(),
            reason: "Annual rate must be non-negative.".into(),
        });
    }
    if input.gross_amount <= Decimal::ZERO {
        return Err(CaucionError::InvalidArgument {
            field: "gross_amount".into(),
            reason: "Gross amount must be positive.".into(),
        });
    }
    if input.placer_fee_rate.is_some_and(|r| r < Decimal::ZERO) {
        return Err(CaucionError::InvalidArgument {
            field: "placer_fee_rate".into(),
            reason: "Fee rate override must be non-negative.".into(),
        });
    }
    if input.borrower_fee_rate.is_some_and(|r| r < Decimal::ZERO) {
        return Err(CaucionError::InvalidArgument {
            field: "borrower_fee_rate".into(),
            reason: "Fee rate override must be non-negative.".into(),
        });
    }
    Ok(())
}

fn validate_positive_days(days: i64, side: CaucionSide) -> CaucionResult<()> {
    if days <= 0 {
        return Err(CaucionError::InvalidArgument {
            field: "term_days".into(),
            reason: format!("For a {} caución the term must be a positive number of days.", side),
        });
    }
    Ok(())
}

/// Convert a decimal day count into a whole signed term.
pub fn term_days_from_decimal(value: Decimal) -> CaucionResult<i64> {
    if !value.fract().is_zero() {
        return Err(CaucionError::InvalidArgument {
            field: "term_days".into(),
            reason: format!("Term must be a whole number of days, got {}.", value),
        });
    }
    value.to_i64().ok_or_else(|| CaucionError::InvalidArgument {
        field: "term_days".into(),
        reason: format!("Term {} is out of range.", value),
    })
}

fn deserialize_term_days<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <Decimal as Deserialize>::deserialize(deserializer)?;
    term_days_from_decimal(value).map_err(serde::de::Error::custom)
}

// ---------------------------------------------------------------------------
// Default-schedule entry points
// ---------------------------------------------------------------------------

/// Compute a caución with the BYMA fee schedule.
pub fn calculate_caucion(input: &CaucionInput) -> CaucionResult<CaucionOutput> {
    CaucionCalculator::default().compute(input)
}

/// Net settlement amount with the BYMA fee schedule.
pub fn caucion_net_amount(input: &CaucionInput) -> CaucionResult<Money> {
    CaucionCalculator::default().net_amount(input)
}

/// Detailed (label, value) rows with the BYMA fee schedule.
pub fn caucion_report(input: &CaucionInput) -> CaucionResult<Vec<super::report::ReportRow>> {
    CaucionCalculator::default().report(input)
}

/// Colocadora net amount with the BYMA fee schedule.
pub fn caucion_colocadora(
    days: i64,
    annual_rate: Rate,
    gross_amount: Money,
    fee_rate: Option<Rate>,
) -> CaucionResult<Money> {
    CaucionCalculator::default().colocadora(days, annual_rate, gross_amount, fee_rate)
}

/// Tomadora net amount with the BYMA fee schedule.
pub fn caucion_tomadora(
    days: i64,
    annual_rate: Rate,
    gross_amount: Money,
    fee_rate: Option<Rate>,
) -> CaucionResult<Money> {
    CaucionCalculator::default().tomadora(days, annual_rate, gross_amount, fee_rate)
}

/// Compute with `calculator` and wrap the result in the output envelope.
pub fn analyze_caucion(
    calculator: &CaucionCalculator,
    input: &CaucionInput,
) -> CaucionResult<ComputationOutput<CaucionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.annual_rate > SUSPICIOUS_ANNUAL_RATE {
        warnings.push(format!(
            "Annual rate {} exceeds 1000% -- TNA is expected as a decimal fraction (1.20 = 120%).",
            input.annual_rate
        ));
    }
    if input.term_days.unsigned_abs() > 365 {
        warnings.push("Term exceeds 365 days -- accrual is simple, not compounded.".into());
    }

    let result = calculator.compute(input)?;

    if result.is_colocadora() && result.net_interest < Decimal::ZERO {
        warnings.push("Charges exceed gross interest: net interest is negative.".into());
    }
    for w in &warnings {
        tracing::warn!(warning = %w, "caucion warning");
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let schedule = calculator.schedule();

    Ok(with_metadata(
        "BYMA Caución Settlement",
        &serde_json::json!({
            "side": result.side.to_string(),
            "day_count": "Actual/365",
            "accrual": "simple",
            "charge_base": "gross_amount + interest",
            "fee_schedule": schedule,
        }),
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Helper: true if two Decimals are within `eps` of each other.
    fn approx_eq(a: Decimal, b: Decimal, eps: Decimal) -> bool {
        (a - b).abs() < eps
    }

    fn expect_invalid(result: CaucionResult<CaucionOutput>, expected_field: &str) {
        match result {
            Err(CaucionError::InvalidArgument { field, .. }) => assert_eq!(field, expected_field),
            Ok(out) => panic!("expected InvalidArgument on {}, got {:?}", expected_field, out),
        }
    }

    #[test]
    fn test_colocadora_seven_days_120_tna() {
        let out = calculate_caucion(&CaucionInput::new(-7, dec!(1.20), dec!(1_000_000))).unwrap();
        assert_eq!(out.side, CaucionSide::Colocadora);
        assert!(approx_eq(out.effective_rate, dec!(0.023014), dec!(0.000001)));
        assert!(
            approx_eq(out.interest, dec!(23013.70), dec!(0.01)),
            "interest {} should be ~23013.70",
            out.interest
        );
        assert_eq!(out.fee_rate, dec!(0.015));
        assert!(approx_eq(out.arancel, dec!(294.29), dec!(0.01)));
        assert!(approx_eq(out.market_dues, dec!(35.81), dec!(0.01)));
        assert_eq!(out.guarantee_expense, Decimal::ZERO);
        assert!(approx_eq(out.total_charges, dec!(399.42), dec!(0.01)));
        assert!(approx_eq(out.net_amount, dec!(1_022_614.28), dec!(0.01)));
        assert!(out.net_amount < out.amount_with_interest);
    }

    #[test]
    fn test_tomadora_thirty_days_with_fee_override() {
        let input = CaucionInput {
            borrower_fee_rate: Some(dec!(0.035)),
            ..CaucionInput::new(30, dec!(1.50), dec!(500_000))
        };
        let out = calculate_caucion(&input).unwrap();
        assert_eq!(out.side, CaucionSide::Tomadora);
        assert_eq!(out.fee_rate, dec!(0.035));
        assert!(out.net_amount > out.amount_with_interest);
        assert!(approx_eq(out.arancel, dec!(1615.69), dec!(0.01)));
        assert!(approx_eq(out.net_amount, dec!(563_802.69), dec!(0.01)));

        let default_fee = calculate_caucion(&CaucionInput::new(30, dec!(1.50), dec!(500_000))).unwrap();
        assert_eq!(default_fee.fee_rate, dec!(0.04));
        assert!(default_fee.net_amount > out.net_amount);
    }

    #[test]
    fn test_charges_are_levied_on_amount_with_interest() {
        let out = calculate_caucion(&CaucionInput::new(30, dec!(1.50), dec!(500_000))).unwrap();
        assert_eq!(out.amount_with_interest, out.gross_amount + out.interest);
        assert_eq!(
            out.market_dues,
            out.amount_with_interest * dec!(0.000005) * dec!(30)
        );
    }

    #[test]
    fn test_guarantee_expense_only_for_tomadora() {
        let placer = calculate_caucion(&CaucionInput::new(-30, dec!(1.0), dec!(100_000))).unwrap();
        let borrower = calculate_caucion(&CaucionInput::new(30, dec!(1.0), dec!(100_000))).unwrap();
        assert_eq!(placer.guarantee_expense, Decimal::ZERO);
        assert!(borrower.guarantee_expense > Decimal::ZERO);
        assert_eq!(borrower.guarantee_expense, borrower.market_dues);
    }

    #[test]
    fn test_aggregation_identities() {
        let out = calculate_caucion(&CaucionInput::new(14, dec!(0.9), dec!(250_000))).unwrap();
        assert_eq!(out.charges, out.arancel + out.market_dues + out.guarantee_expense);
        assert_eq!(out.vat_on_charges, out.charges * dec!(0.21));
        assert_eq!(out.total_charges, out.charges + out.vat_on_charges);
        assert_eq!(out.net_interest, out.interest + out.total_charges);
        assert_eq!(out.net_amount, out.amount_with_interest + out.total_charges);
    }

    #[test]
    fn test_zero_rate_still_charges_fees() {
        let out = calculate_caucion(&CaucionInput::new(1, Decimal::ZERO, dec!(1_000_000))).unwrap();
        assert_eq!(out.interest, Decimal::ZERO);
        assert_eq!(out.market_dues, dec!(5));
        assert_eq!(out.guarantee_expense, dec!(5));
        assert!(approx_eq(out.net_amount, dec!(1_000_144.70), dec!(0.01)));
    }

    #[test]
    fn test_explicit_zero_override_is_honored() {
        let input = CaucionInput {
            placer_fee_rate: Some(Decimal::ZERO),
            ..CaucionInput::new(-10, dec!(1.0), dec!(100_000))
        };
        let out = calculate_caucion(&input).unwrap();
        assert_eq!(out.fee_rate, Decimal::ZERO);
        assert_eq!(out.arancel, Decimal::ZERO);
    }

    #[test]
    fn test_other_side_override_is_ignored() {
        let input = CaucionInput {
            borrower_fee_rate: Some(dec!(0.10)),
            ..CaucionInput::new(-10, dec!(1.0), dec!(100_000))
        };
        let out = calculate_caucion(&input).unwrap();
        assert_eq!(out.fee_rate, dec!(0.015));
    }

    #[test]
    fn test_zero_term_rejected() {
        expect_invalid(
            calculate_caucion(&CaucionInput::new(0, dec!(1.0), dec!(100))),
            "term_days",
        );
    }

    #[test]
    fn test_negative_rate_rejected() {
        expect_invalid(
            calculate_caucion(&CaucionInput::new(7, dec!(-0.01), dec!(100))),
            "annual_rate",
        );
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        expect_invalid(
            calculate_caucion(&CaucionInput::new(7, dec!(1.0), Decimal::ZERO)),
            "gross_amount",
        );
        expect_invalid(
            calculate_caucion(&CaucionInput::new(7, dec!(1.0), dec!(-5))),
            "gross_amount",
        );
    }

    #[test]
    fn test_negative_override_rejected() {
        let input = CaucionInput {
            borrower_fee_rate: Some(dec!(-0.01)),
            ..CaucionInput::new(7, dec!(1.0), dec!(100))
        };
        expect_invalid(calculate_caucion(&input), "borrower_fee_rate");
    }

    #[test]
    fn test_wrappers_apply_sign_internally() {
        let coloc = caucion_colocadora(7, dec!(1.20), dec!(1_000_000), None).unwrap();
        let direct = caucion_net_amount(&CaucionInput::new(-7, dec!(1.20), dec!(1_000_000))).unwrap();
        assert_eq!(coloc, direct);

        let tom = caucion_tomadora(30, dec!(1.50), dec!(500_000), Some(dec!(0.035))).unwrap();
        let direct = caucion_net_amount(&CaucionInput {
            borrower_fee_rate: Some(dec!(0.035)),
            ..CaucionInput::new(30, dec!(1.50), dec!(500_000))
        })
        .unwrap();
        assert_eq!(tom, direct);
    }

    #[test]
    fn test_wrappers_reject_non_positive_days() {
        assert!(caucion_colocadora(0, dec!(1.0), dec!(100), None).is_err());
        assert!(caucion_colocadora(-7, dec!(1.0), dec!(100), None).is_err());
        assert!(caucion_tomadora(0, dec!(1.0), dec!(100), None).is_err());
        assert!(caucion_tomadora(-30, dec!(1.0), dec!(100), None).is_err());
    }

    #[test]
    fn test_term_days_from_decimal() {
        assert_eq!(term_days_from_decimal(dec!(-7)).unwrap(), -7);
        assert_eq!(term_days_from_decimal(dec!(30.0)).unwrap(), 30);
        assert!(term_days_from_decimal(dec!(7.5)).is_err());
        assert!(term_days_from_decimal(dec!(100000000000000000000)).is_err());
    }

    #[test]
    fn test_custom_schedule_changes_vat() {
        let calc = CaucionCalculator::new(FeeSchedule {
            vat_rate: Decimal::ZERO,
            ..FeeSchedule::default()
        })
        .unwrap();
        let out = calc.compute(&CaucionInput::new(-7, dec!(1.20), dec!(1_000_000))).unwrap();
        assert_eq!(out.vat_on_charges, Decimal::ZERO);
        assert_eq!(out.total_charges, out.charges);
    }

    #[test]
    fn test_calculator_rejects_invalid_schedule() {
        let result = CaucionCalculator::new(FeeSchedule {
            vat_rate: dec!(-0.21),
            ..FeeSchedule::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_warns_on_negative_net_interest() {
        // Zero rate: no interest, but fees still apply to the colocadora.
        let out = analyze_caucion(
            &CaucionCalculator::default(),
            &CaucionInput::new(-1, Decimal::ZERO, dec!(1_000_000)),
        )
        .unwrap();
        assert!(out.result.net_interest < Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("net interest is negative")));
    }

    #[test]
    fn test_analyze_warns_on_percentage_rate() {
        let out = analyze_caucion(
            &CaucionCalculator::default(),
            &CaucionInput::new(7, dec!(120), dec!(1_000)),
        )
        .unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("1000%")));
        assert_eq!(out.methodology, "BYMA Caución Settlement");
    }

    #[test]
    fn test_analyze_clean_run_has_no_warnings() {
        let out = analyze_caucion(
            &CaucionCalculator::default(),
            &CaucionInput::new(-7, dec!(1.20), dec!(1_000_000)),
        )
        .unwrap();
        assert!(out.warnings.is_empty());
        assert_eq!(out.assumptions["side"], "Colocadora");
    }

    fn expect_overflow(result: CaucionResult<CaucionOutput>) {
        match result {
            Err(CaucionError::InvalidArgument { reason, .. }) => {
                assert!(reason.contains("overflows"), "unexpected reason: {}", reason)
            }
            Ok(out) => panic!("expected overflow error, got {:?}", out),
        }
    }

    #[test]
    fn test_huge_amount_returns_error_instead_of_panicking() {
        expect_overflow(calculate_caucion(&CaucionInput::new(
            365,
            dec!(2),
            Decimal::MAX / dec!(2),
        )));
    }

    #[test]
    fn test_extreme_term_returns_error_instead_of_panicking() {
        let result = calculate_caucion(&CaucionInput::new(
            i64::MIN,
            dec!(1.2),
            dec!(1_000_000_000_000),
        ));
        match result {
            Err(CaucionError::InvalidArgument { field, .. }) => assert_eq!(field, "arancel"),
            Ok(out) => panic!("expected overflow error, got {:?}", out),
        }
    }

    #[test]
    fn test_tomadora_at_decimal_max_reports_overflow() {
        expect_overflow(calculate_caucion(&CaucionInput::new(1, Decimal::ZERO, Decimal::MAX)));
    }
}
