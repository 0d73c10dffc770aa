use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use caucion_core::caucion::{self, term_days_from_decimal, CaucionInput, ReportValue};
use caucion_core::{CaucionError, Money};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Spreadsheet numbers arrive as f64; NaN, infinities and values beyond
/// the Decimal range are rejected.
fn to_decimal(field: &str, value: f64) -> Result<Decimal, CaucionError> {
    if !value.is_finite() {
        return Err(CaucionError::InvalidArgument {
            field: field.into(),
            reason: format!("{} is not a finite number.", value),
        });
    }
    Decimal::try_from(value).map_err(|_| CaucionError::InvalidArgument {
        field: field.into(),
        reason: format!("{} is out of range for a decimal amount.", value),
    })
}

fn to_optional_decimal(field: &str, value: Option<f64>) -> Result<Option<Decimal>, CaucionError> {
    value.map(|v| to_decimal(field, v)).transpose()
}

fn to_term_days(value: f64) -> Result<i64, CaucionError> {
    term_days_from_decimal(to_decimal("term_days", value)?)
}

fn to_f64(amount: Money) -> f64 {
    amount.to_f64().unwrap_or(f64::NAN)
}

fn build_input(
    dias: f64,
    tna: f64,
    importe_bruto: f64,
    arancel_colocadora: Option<f64>,
    arancel_tomadora: Option<f64>,
) -> Result<CaucionInput, CaucionError> {
    Ok(CaucionInput {
        term_days: to_term_days(dias)?,
        annual_rate: to_decimal("annual_rate", tna)?,
        gross_amount: to_decimal("gross_amount", importe_bruto)?,
        placer_fee_rate: to_optional_decimal("placer_fee_rate", arancel_colocadora)?,
        borrower_fee_rate: to_optional_decimal("borrower_fee_rate", arancel_tomadora)?,
    })
}

// ---------------------------------------------------------------------------
// JSON in / JSON out
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_caucion(input_json: String) -> NapiResult<String> {
    let input: CaucionInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = caucion::analyze_caucion(&caucion::CaucionCalculator::default(), &input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Spreadsheet call shapes
// ---------------------------------------------------------------------------

/// =caucion(dias; tna; importeBruto; [arancelColocadora]; [arancelTomadora])
#[napi(js_name = "caucion")]
pub fn caucion_net(
    dias: f64,
    tna: f64,
    importe_bruto: f64,
    arancel_colocadora: Option<f64>,
    arancel_tomadora: Option<f64>,
) -> NapiResult<f64> {
    let input = build_input(dias, tna, importe_bruto, arancel_colocadora, arancel_tomadora)
        .map_err(to_napi_error)?;
    let net = caucion::caucion_net_amount(&input).map_err(to_napi_error)?;
    Ok(to_f64(net))
}

/// =caucionDetallada(...) as `[[label, value], ...]`.
#[napi]
pub fn caucion_detallada(
    dias: f64,
    tna: f64,
    importe_bruto: f64,
    arancel_colocadora: Option<f64>,
    arancel_tomadora: Option<f64>,
) -> NapiResult<Value> {
    let input = build_input(dias, tna, importe_bruto, arancel_colocadora, arancel_tomadora)
        .map_err(to_napi_error)?;
    let rows = caucion::caucion_report(&input).map_err(to_napi_error)?;
    let grid: Vec<Value> = rows
        .into_iter()
        .map(|row| match row.value {
            ReportValue::Number(n) => json!([row.label, to_f64(n)]),
            ReportValue::Text(s) => json!([row.label, s]),
        })
        .collect();
    Ok(Value::Array(grid))
}

/// =caucionColocadora(dias; tna; importeBruto; [arancel])
#[napi]
pub fn caucion_colocadora(
    dias: f64,
    tna: f64,
    importe_bruto: f64,
    arancel: Option<f64>,
) -> NapiResult<f64> {
    let net = caucion::caucion_colocadora(
        to_term_days(dias).map_err(to_napi_error)?,
        to_decimal("annual_rate", tna).map_err(to_napi_error)?,
        to_decimal("gross_amount", importe_bruto).map_err(to_napi_error)?,
        to_optional_decimal("placer_fee_rate", arancel).map_err(to_napi_error)?,
    )
    .map_err(to_napi_error)?;
    Ok(to_f64(net))
}

/// =caucionTomadora(dias; tna; importeBruto; [arancel])
#[napi]
pub fn caucion_tomadora(
    dias: f64,
    tna: f64,
    importe_bruto: f64,
    arancel: Option<f64>,
) -> NapiResult<f64> {
    let net = caucion::caucion_tomadora(
        to_term_days(dias).map_err(to_napi_error)?,
        to_decimal("annual_rate", tna).map_err(to_napi_error)?,
        to_decimal("gross_amount", importe_bruto).map_err(to_napi_error)?,
        to_optional_decimal("borrower_fee_rate", arancel).map_err(to_napi_error)?,
    )
    .map_err(to_napi_error)?;
    Ok(to_f64(net))
}
