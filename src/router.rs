use crate::app::App;
use crate::calculation::aggregator::{
    Estimator, collapse_cost_by_content_type, collapse_cost_by_task, collapse_cost_by_tier,
    collapse_tokens_by_content_type, collapse_tokens_by_task, collapse_tokens_by_tier, fold,
};
use crate::calculation::report::Report;
use crate::cli::{Commands, EstimateArgs, Grouping, Metric};
use crate::config::scenario::Scenario;
use crate::config::{Catalog, policy::UsagePolicy};
use crate::prelude::*;

/// Runs the estimate once and shapes the output for the chosen command.
pub fn does_the_math(ctx: &App, scenario: &Scenario) -> AppResult<Report> {
    let catalog = Catalog::builtin();
    let policy = UsagePolicy::default();
    let rate = ctx.cli.try_fx_rate()?;
    let fx = move |usd: f64| usd * rate;

    let full_report = Estimator::new(&catalog, &policy).run(scenario, &fx)?;

    let output: Report = match &ctx.cli.command {
        // costcast estimate.
        Commands::Estimate(args) => match args {
            EstimateArgs {
                metric: Metric::Cost,
                group_by: None,
            } => Report::Money(fold(collapse_cost_by_task(&full_report))),

            EstimateArgs {
                metric: Metric::Tokens,
                group_by: None,
            } => Report::Tokens(fold(collapse_tokens_by_task(&full_report))),

            EstimateArgs {
                metric: Metric::Cost,
                group_by: Some(Grouping::Task),
            } => Report::money_map(collapse_cost_by_task(&full_report)),

            EstimateArgs {
                metric: Metric::Cost,
                group_by: Some(Grouping::Tier),
            } => Report::money_map(collapse_cost_by_tier(&full_report)),

            EstimateArgs {
                metric: Metric::Cost,
                group_by: Some(Grouping::ContentType),
            } => Report::money_map(collapse_cost_by_content_type(&full_report)),

            EstimateArgs {
                metric: Metric::Tokens,
                group_by: Some(Grouping::Task),
            } => Report::token_map(collapse_tokens_by_task(&full_report)),

            EstimateArgs {
                metric: Metric::Tokens,
                group_by: Some(Grouping::Tier),
            } => Report::token_map(collapse_tokens_by_tier(&full_report)),

            EstimateArgs {
                metric: Metric::Tokens,
                group_by: Some(Grouping::ContentType),
            } => Report::token_map(collapse_tokens_by_content_type(&full_report)),
        },

        // costcast raw.
        Commands::Raw => {
            let json = if ctx.cli.unformatted {
                serde_json::to_string(&full_report).into_diagnostic()?
            } else {
                serde_json::to_string_pretty(&full_report).into_diagnostic()?
            };

            Report::Raw(json)
        }
    };

    Ok(output)
}
