use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::scenario::Scenario;
use crate::prelude::*;

impl Cli {
    /// Convenience constructor to avoid redundant `Parser` imports in main.
    pub fn new() -> Self {
        Cli::parse()
    }

    pub fn try_load_scenario(&self) -> AppResult<Scenario> {
        let raw = std::fs::read_to_string(&self.scenario)
            .map_err(|e| Error::ScenarioRead(self.scenario.display().to_string(), e))?;

        Scenario::from_json(&raw)
    }

    /// Validates the exchange rate before it gets anywhere near the math.
    /// A zero or negative rate would quietly wipe every money column.
    pub fn try_fx_rate(&self) -> AppResult<f64> {
        if self.fx_rate <= 0.0 {
            let error = Error::NonPositiveFxRate(self.fx_rate);

            return Err(error.into());
        }

        Ok(self.fx_rate)
    }
}

// Structs

#[derive(Parser, Debug)]
#[command(name = "costcast", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    //
    // Global args start here..
    //

    //
    /// Path to the scenario file (JSON).
    #[arg(long, default_value = "scenario.json", global = true)]
    pub scenario: PathBuf,

    /// No format.
    #[arg(long, default_value_t = false, global = true)]
    pub unformatted: bool,

    /// Reporting-currency units per one USD. Leave at 1.0 for USD.
    #[arg(long, env = "COSTCAST_FX_RATE", default_value_t = 1.0, global = true)]
    pub fx_rate: f64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate aggregated monthly usage (cost, tokens) for a scenario.
    Estimate(EstimateArgs),

    /// Retrieve the full, unaggregated cost report as JSON.
    ///
    /// This outputs every breakdown the estimator computes. Useful for
    /// piping into tools like `jq` or for building custom analysis scripts.
    ///
    /// Go build something fun on top of this!
    Raw,
}

#[derive(clap::Args, Debug)]
pub struct EstimateArgs {
    /// What to measure.
    #[arg(long, default_value = "cost")]
    pub metric: Metric,

    /// Optional. How to group results.
    #[arg(long)]
    pub group_by: Option<Grouping>,
}

#[derive(ValueEnum, Clone, Debug, Default)]
pub enum Metric {
    #[default]
    Cost,
    Tokens,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum Grouping {
    Task,
    Tier,
    ContentType,
}
