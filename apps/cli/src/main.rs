#![deny(warnings)]

//! Headless CLI for projecting UA campaign profitability.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use ua_advisor::{AdvisorClient, AdvisorConfig, AnalysisSession};
use ua_core::{validate_inputs, SimulationInputs};

struct CliArgs {
    inputs: SimulationInputs,
    json: bool,
    analyze: bool,
}

fn parse_flag(it: &mut impl Iterator<Item = String>) -> f64 {
    // Non-numeric entry is treated as zero; sanitization is owned here,
    // not by the projection core.
    it.next().and_then(|s| s.parse().ok()).unwrap_or(0.0)
}

fn parse_args() -> CliArgs {
    let mut inputs = SimulationInputs::default();
    let mut json = false;
    let mut analyze = false;
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--spend" => inputs = inputs.with_ad_spend(parse_flag(&mut it)),
            "--installs" => inputs = inputs.with_installs(parse_flag(&mut it)),
            "--arpdau" => inputs = inputs.with_arpdau(parse_flag(&mut it)),
            "--d1" => inputs = inputs.with_retention_d1(parse_flag(&mut it)),
            "--d7" => inputs = inputs.with_retention_d7(parse_flag(&mut it)),
            "--d30" => inputs = inputs.with_retention_d30(parse_flag(&mut it)),
            "--json" => json = true,
            "--analyze" => analyze = true,
            _ => {}
        }
    }
    CliArgs {
        inputs,
        json,
        analyze,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args();
    info!(git_sha = env!("GIT_SHA"), "starting CLI");
    validate_inputs(&args.inputs)?;

    let result = ua_sim::project(&args.inputs);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "Campaign | spend: ${:.2} | installs: {} | ARPDAU: ${:.2} | D1: {}% | D7: {}% | D30: {}%",
        args.inputs.ad_spend,
        args.inputs.installs,
        args.inputs.arpdau,
        args.inputs.retention_d1,
        args.inputs.retention_d7,
        args.inputs.retention_d30
    );
    let break_even = result
        .break_even_day
        .map(|d| format!("day {d}"))
        .unwrap_or_else(|| "not reached".to_string());
    println!(
        "KPI | CPI: ${:.2} | break-even: {} | ROAS D7: {:.1}% | ROAS D30: {:.1}% | LTV D90: ${:.2}",
        result.cpi, break_even, result.roas_d7, result.roas_d30, result.ltv_d90
    );

    if args.analyze {
        let client = AdvisorClient::new(AdvisorConfig::from_env()?);
        let session = AnalysisSession::default();
        let token = session.begin();
        let analysis = client.analyze(&args.inputs, &result).await?;
        if session.is_current(token) {
            println!("\n{analysis}");
        }
    }

    Ok(())
}
