use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use caucion_core::caucion::{
    analyze_caucion, term_days_from_decimal, CaucionCalculator, CaucionInput, CaucionSide,
};
use caucion_core::FeeSchedule;

use crate::input;

/// Arguments shared by `calc`, `net` and `detail`
#[derive(Args)]
pub struct CaucionArgs {
    /// Path to JSON file with a full caución input
    #[arg(long)]
    pub input: Option<String>,

    /// Signed term in days: negative = colocadora, positive = tomadora
    #[arg(long, allow_hyphen_values = true)]
    pub days: Option<Decimal>,

    /// Nominal annual rate as a decimal (1.20 = 120% TNA)
    #[arg(long, allow_hyphen_values = true)]
    pub tna: Option<Decimal>,

    /// Gross amount in pesos
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<Decimal>,

    /// Colocadora arancel TNA override (default 0.015)
    #[arg(long, allow_hyphen_values = true)]
    pub placer_fee: Option<Decimal>,

    /// Tomadora arancel TNA override (default 0.04)
    #[arg(long, allow_hyphen_values = true)]
    pub borrower_fee: Option<Decimal>,

    /// JSON or YAML file overriding the BYMA fee schedule
    #[arg(long)]
    pub fee_schedule: Option<String>,
}

/// Arguments for the one-sided `colocadora` / `tomadora` commands
#[derive(Args)]
pub struct SideArgs {
    /// Term in days (positive; the side sets the sign)
    #[arg(long, allow_hyphen_values = true)]
    pub days: Decimal,

    /// Nominal annual rate as a decimal (1.20 = 120% TNA)
    #[arg(long, allow_hyphen_values = true)]
    pub tna: Decimal,

    /// Gross amount in pesos
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Decimal,

    /// Arancel TNA override for this side
    #[arg(long, allow_hyphen_values = true)]
    pub fee: Option<Decimal>,

    /// JSON or YAML file overriding the BYMA fee schedule
    #[arg(long)]
    pub fee_schedule: Option<String>,
}

fn build_calculator(
    fee_schedule: &Option<String>,
) -> Result<CaucionCalculator, Box<dyn std::error::Error>> {
    match fee_schedule {
        Some(path) => {
            let schedule: FeeSchedule = input::file::read_config(path)?;
            tracing::debug!(path = %path, "loaded fee schedule");
            Ok(CaucionCalculator::new(schedule)?)
        }
        None => Ok(CaucionCalculator::default()),
    }
}

fn input_from_flags(args: &CaucionArgs) -> Result<Option<CaucionInput>, Box<dyn std::error::Error>> {
    match (args.days, args.tna, args.amount) {
        (Some(days), Some(tna), Some(amount)) => Ok(Some(CaucionInput {
            term_days: term_days_from_decimal(days)?,
            annual_rate: tna,
            gross_amount: amount,
            placer_fee_rate: args.placer_fee,
            borrower_fee_rate: args.borrower_fee,
        })),
        (None, None, None) => Ok(None),
        _ => Err("--days, --tna and --amount must be given together".into()),
    }
}

fn resolve_input(args: &CaucionArgs) -> Result<CaucionInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        input::file::read_json(path)
    } else if let Some(from_flags) = input_from_flags(args)? {
        Ok(from_flags)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(data)
    } else {
        Err("Provide --days/--tna/--amount, --input <file.json>, or pipe JSON via stdin".into())
    }
}

pub fn run_calc(args: CaucionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calculator = build_calculator(&args.fee_schedule)?;
    let caucion_input = resolve_input(&args)?;
    let result = analyze_caucion(&calculator, &caucion_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_net(args: CaucionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calculator = build_calculator(&args.fee_schedule)?;
    let caucion_input = resolve_input(&args)?;
    let net_amount = calculator.net_amount(&caucion_input)?;
    Ok(json!({ "net_amount": net_amount }))
}

pub fn run_detail(args: CaucionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calculator = build_calculator(&args.fee_schedule)?;
    let caucion_input = resolve_input(&args)?;
    let rows = calculator.report(&caucion_input)?;
    Ok(serde_json::to_value(rows)?)
}

pub fn run_side(side: CaucionSide, args: SideArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calculator = build_calculator(&args.fee_schedule)?;
    let days = term_days_from_decimal(args.days)?;
    let net_amount = match side {
        CaucionSide::Colocadora => calculator.colocadora(days, args.tna, args.amount, args.fee)?,
        CaucionSide::Tomadora => calculator.tomadora(days, args.tna, args.amount, args.fee)?,
    };
    Ok(json!({ "side": side.to_string(), "net_amount": net_amount }))
}
