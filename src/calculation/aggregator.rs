use itertools::Itertools;
use std::collections::HashMap;

use crate::calculation::tiers::{ChatTiers, TierUsage, compute_all_tiers};
use crate::calculation::tokens::cost_for_request;
use crate::config::scenario::Scenario;
use crate::config::{Catalog, policy::UsagePolicy};
use crate::prelude::*;
use crate::types::{BillingMode, CostBreakdown, ModelRef, TaskKind, UsageRequest};

/// Embedding and summarization cost for one content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentTypeCost {
    pub name: String,
    pub embedding: CostBreakdown,
    pub summary: CostBreakdown,
}

/// Rollup across content types, one breakdown per task kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaskCosts {
    pub embedding: CostBreakdown,
    pub summary: CostBreakdown,
    pub chat: CostBreakdown,
}

/// The whole estimate. Money fields are in the reporting currency, token
/// fields are raw counts. The per-type and per-tier sections exist so a
/// surprising total can be audited without rerunning anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    pub total_cost: f64,
    pub total_tokens: f64,
    pub tasks: TaskCosts,
    pub content_types: Vec<ContentTypeCost>,
    pub tiers: ChatTiers,
}

/// The estimation engine. Pure: same catalog, policy and scenario in, same
/// report out, no state between runs.
pub struct Estimator<'a> {
    catalog: &'a Catalog<'a>,
    policy: &'a UsagePolicy,
}

impl<'a> Estimator<'a> {
    pub fn new(catalog: &'a Catalog<'a>, policy: &'a UsagePolicy) -> Self {
        Estimator { catalog, policy }
    }

    /// Runs the full estimate. `fx` converts USD into the reporting
    /// currency and is applied once, at assembly. Any configuration problem
    /// aborts the whole run, nothing partial ever comes back.
    pub fn run(&self, scenario: &Scenario, fx: &dyn Fn(f64) -> f64) -> AppResult<CostReport> {
        let mode = scenario.billing_mode();

        let mut content_types = Vec::with_capacity(scenario.content.len());
        for (name, volume) in &scenario.content {
            let embedding = cost_for_request(
                self.catalog,
                self.policy.chars_per_token,
                &self.embedding_request(volume.monthly_items, volume.chars.content, mode),
            )?;
            let summary = cost_for_request(
                self.catalog,
                self.policy.chars_per_token,
                &self.summary_request(volume.monthly_items, &volume.chars, mode),
            )?;

            content_types.push(ContentTypeCost {
                name: name.clone(),
                embedding,
                summary,
            });
        }

        // Paying customers are carved out of the MAU figure before the free
        // base is sized.
        let free_users = scenario
            .mau
            .saturating_sub(scenario.customers.pro + scenario.customers.expert);
        let tiers = compute_all_tiers(
            self.catalog,
            self.policy,
            free_users,
            scenario.customers.pro,
            scenario.customers.expert,
            mode,
        )?;

        Ok(assemble(content_types, tiers, fx))
    }

    fn embedding_request(&self, items: u64, content_chars: u64, mode: BillingMode) -> UsageRequest {
        UsageRequest {
            task: TaskKind::Embedding,
            model: ModelRef::Embedding(self.policy.embedding_model),
            mode,
            premium: true,
            item_count: items,
            chars_per_item: content_chars,
            chars_for_prompt: 0,
            chars_per_output: 0,
        }
    }

    fn summary_request(
        &self,
        items: u64,
        chars: &crate::config::scenario::CharCounts,
        mode: BillingMode,
    ) -> UsageRequest {
        UsageRequest {
            task: TaskKind::Summary,
            model: ModelRef::Chat(self.policy.summary_model),
            mode,
            premium: true,
            item_count: items,
            chars_per_item: chars.content,
            chars_for_prompt: chars.prompt,
            chars_per_output: chars.output,
        }
    }
}

/// Sums the pieces and applies the currency conversion in one place.
fn assemble(
    content_types: Vec<ContentTypeCost>,
    tiers: ChatTiers,
    fx: &dyn Fn(f64) -> f64,
) -> CostReport {
    let embedding = content_types
        .iter()
        .fold(CostBreakdown::default(), |acc, c| acc.plus(&c.embedding))
        .converted(fx);
    let summary = content_types
        .iter()
        .fold(CostBreakdown::default(), |acc, c| acc.plus(&c.summary))
        .converted(fx);
    let chat = tiers.combined().converted(fx);

    let content_types = content_types
        .into_iter()
        .map(|c| ContentTypeCost {
            embedding: c.embedding.converted(fx),
            summary: c.summary.converted(fx),
            ..c
        })
        .collect();

    let tiers = ChatTiers {
        free: converted_tier(tiers.free, fx),
        pro: converted_tier(tiers.pro, fx),
        expert: converted_tier(tiers.expert, fx),
        free_plan: tiers.free_plan,
    };

    CostReport {
        total_cost: embedding.total_cost + summary.total_cost + chat.total_cost,
        total_tokens: embedding.total_tokens + summary.total_tokens + chat.total_tokens,
        tasks: TaskCosts {
            embedding,
            summary,
            chat,
        },
        content_types,
        tiers,
    }
}

fn converted_tier(tier: TierUsage, fx: &dyn Fn(f64) -> f64) -> TierUsage {
    TierUsage {
        breakdown: tier.breakdown.converted(fx),
        ..tier
    }
}

// Collapse helpers for the renderer. Same vocabulary as the rest of the
// calculation: collapse folds columns into a keyed map, fold sums the rows.

pub fn collapse_cost_by_task(report: &CostReport) -> HashMap<String, f64> {
    task_pairs(report, |b| b.total_cost)
}

pub fn collapse_tokens_by_task(report: &CostReport) -> HashMap<String, f64> {
    task_pairs(report, |b| b.total_tokens)
}

pub fn collapse_cost_by_tier(report: &CostReport) -> HashMap<String, f64> {
    tier_pairs(report, |b| b.total_cost)
}

pub fn collapse_tokens_by_tier(report: &CostReport) -> HashMap<String, f64> {
    tier_pairs(report, |b| b.total_tokens)
}

pub fn collapse_cost_by_content_type(report: &CostReport) -> HashMap<String, f64> {
    content_pairs(report, |b| b.total_cost)
}

pub fn collapse_tokens_by_content_type(report: &CostReport) -> HashMap<String, f64> {
    content_pairs(report, |b| b.total_tokens)
}

/// Sums the pre-calculated products of each row into a single value.
pub fn fold<T>(some_map: HashMap<String, T>) -> T
where
    T: std::iter::Sum,
{
    some_map.into_values().sum()
}

fn task_pairs(report: &CostReport, pick: fn(&CostBreakdown) -> f64) -> HashMap<String, f64> {
    // Content types contribute to embedding and summary, chat comes in
    // whole. The grouping map merges the per-type rows per task.
    report
        .content_types
        .iter()
        .flat_map(|c| {
            [
                (TaskKind::Embedding.label().to_owned(), pick(&c.embedding)),
                (TaskKind::Summary.label().to_owned(), pick(&c.summary)),
            ]
        })
        .chain([(TaskKind::Chat.label().to_owned(), pick(&report.tasks.chat))])
        .into_grouping_map()
        .sum()
}

fn tier_pairs(report: &CostReport, pick: fn(&CostBreakdown) -> f64) -> HashMap<String, f64> {
    [&report.tiers.free, &report.tiers.pro, &report.tiers.expert]
        .into_iter()
        .map(|usage| (usage.tier.label().to_owned(), pick(&usage.breakdown)))
        .collect()
}

fn content_pairs(report: &CostReport, pick: fn(&CostBreakdown) -> f64) -> HashMap<String, f64> {
    report
        .content_types
        .iter()
        .map(|c| (c.name.clone(), pick(&c.embedding) + pick(&c.summary)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news_scenario() -> Scenario {
        Scenario::from_json(
            r#"{
                "mau": 10000,
                "customers": { "pro": 50, "expert": 10 },
                "batch": true,
                "content": {
                    "news": {
                        "monthly_items": 1000,
                        "chars": { "content": 2000, "prompt": 240, "output": 1000 }
                    }
                }
            }"#,
        )
        .unwrap()
    }

    fn usd(value: f64) -> f64 {
        value
    }

    #[test]
    fn the_reference_scenario_adds_up() {
        let catalog = Catalog::builtin();
        let policy = UsagePolicy::default();
        let report = Estimator::new(&catalog, &policy)
            .run(&news_scenario(), &usd)
            .unwrap();

        // Free base is mau minus the 60 paying customers.
        assert_eq!(report.tiers.free.requests, 248_500);
        assert_eq!(report.tiers.pro.requests, 7_500);
        assert_eq!(report.tiers.expert.requests, 3_000);

        // News embedding: 1000 items at 2000 chars is 500k tokens, batch
        // embedding price $0.075/M.
        let news = &report.content_types[0];
        assert_eq!(news.name, "news");
        assert_eq!(news.embedding.total_tokens, 500_000.0);
        assert!((news.embedding.total_cost - 0.0375).abs() < 1e-12);

        // News summary: (2000+240)/4 tokens in, 1000/4 out, per item, on
        // gemini-2.5-flash batch.
        assert_eq!(news.summary.input_tokens, 560_000.0);
        assert_eq!(news.summary.output_tokens, 250_000.0);
        let expected_summary = 0.56 * 0.15 + 0.25 * 1.25;
        assert!((news.summary.total_cost - expected_summary).abs() < 1e-9);

        // Chat tokens follow the request volumes and the policy sizes.
        let per_request_tokens = (500.0 + 1500.0) / 4.0;
        let expected_chat_tokens = (248_500.0 + 7_500.0 + 3_000.0) * per_request_tokens;
        assert!((report.tasks.chat.total_tokens - expected_chat_tokens).abs() < 1e-6);

        // And the totals are exactly the sum of the parts.
        let parts = report.tasks.embedding.total_cost
            + report.tasks.summary.total_cost
            + report.tasks.chat.total_cost;
        assert!((report.total_cost - parts).abs() < 1e-9);
        assert_eq!(report.tiers.free.breakdown.total_cost, 0.0);
        assert!(report.tiers.free.breakdown.total_tokens > 0.0);
    }

    #[test]
    fn currency_conversion_touches_money_and_not_tokens() {
        let catalog = Catalog::builtin();
        let policy = UsagePolicy::default();
        let estimator = Estimator::new(&catalog, &policy);

        let in_usd = estimator.run(&news_scenario(), &usd).unwrap();
        let in_inr = estimator
            .run(&news_scenario(), &|amount| amount * 83.0)
            .unwrap();

        assert!((in_inr.total_cost - in_usd.total_cost * 83.0).abs() < 1e-9);
        assert_eq!(in_inr.total_tokens, in_usd.total_tokens);
        assert!(
            (in_inr.tiers.pro.breakdown.total_cost - in_usd.tiers.pro.breakdown.total_cost * 83.0)
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn an_empty_content_config_still_reports_chat() {
        let catalog = Catalog::builtin();
        let policy = UsagePolicy::default();
        let scenario = Scenario::from_json(
            r#"{ "mau": 1000, "customers": { "pro": 5, "expert": 1 }, "content": {} }"#,
        )
        .unwrap();

        let report = Estimator::new(&catalog, &policy)
            .run(&scenario, &usd)
            .unwrap();

        assert!(report.content_types.is_empty());
        assert_eq!(report.tasks.embedding.total_cost, 0.0);
        assert!(report.tasks.chat.total_tokens > 0.0);
        assert_eq!(report.total_cost, report.tasks.chat.total_cost);
    }

    #[test]
    fn collapse_helpers_agree_with_the_report() {
        let catalog = Catalog::builtin();
        let policy = UsagePolicy::default();
        let report = Estimator::new(&catalog, &policy)
            .run(&news_scenario(), &usd)
            .unwrap();

        let by_task = collapse_cost_by_task(&report);
        assert_eq!(by_task.len(), 3);
        assert!((fold(by_task) - report.total_cost).abs() < 1e-9);

        let by_tier = collapse_tokens_by_tier(&report);
        assert!((fold(by_tier) - report.tasks.chat.total_tokens).abs() < 1e-6);

        let by_type = collapse_cost_by_content_type(&report);
        assert_eq!(by_type.len(), 1);
        let content_only =
            report.tasks.embedding.total_cost + report.tasks.summary.total_cost;
        assert!((fold(by_type) - content_only).abs() < 1e-9);
    }

    #[test]
    fn more_paying_customers_shrink_the_free_base() {
        let catalog = Catalog::builtin();
        let policy = UsagePolicy::default();
        let estimator = Estimator::new(&catalog, &policy);

        let small = Scenario::from_json(
            r#"{ "mau": 1000, "customers": { "pro": 0, "expert": 0 }, "content": {} }"#,
        )
        .unwrap();
        let large = Scenario::from_json(
            r#"{ "mau": 1000, "customers": { "pro": 400, "expert": 100 }, "content": {} }"#,
        )
        .unwrap();

        let small_report = estimator.run(&small, &usd).unwrap();
        let large_report = estimator.run(&large, &usd).unwrap();

        assert!(large_report.tiers.free.requests < small_report.tiers.free.requests);
    }

    #[test]
    fn paying_customers_beyond_mau_do_not_underflow() {
        let catalog = Catalog::builtin();
        let policy = UsagePolicy::default();
        let scenario = Scenario::from_json(
            r#"{ "mau": 10, "customers": { "pro": 50, "expert": 10 }, "content": {} }"#,
        )
        .unwrap();

        let report = Estimator::new(&catalog, &policy)
            .run(&scenario, &usd)
            .unwrap();

        assert_eq!(report.tiers.free.requests, 0);
        assert_eq!(report.tiers.free.breakdown.total_tokens, 0.0);
    }
}
