use crate::calculation::free_tier::{self, SelectedPlan};
use crate::calculation::tokens::cost_for_request;
use crate::config::{Catalog, policy::UsagePolicy};
use crate::prelude::*;
use crate::types::{BillingMode, ChatModel, CostBreakdown, ModelRef, TaskKind, Tier, UsageRequest};

/// One tier's projected chat month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierUsage {
    pub tier: Tier,
    pub model: ChatModel,
    pub requests: u64,
    pub breakdown: CostBreakdown,
}

/// All three tiers plus the free-plan capacity recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChatTiers {
    pub free: TierUsage,
    pub pro: TierUsage,
    pub expert: TierUsage,
    pub free_plan: SelectedPlan,
}

impl ChatTiers {
    pub fn combined(&self) -> CostBreakdown {
        self.free
            .breakdown
            .plus(&self.pro.breakdown)
            .plus(&self.expert.breakdown)
    }
}

/// Chat cost for one tier. Chat carries no content payload, only the policy
/// prompt, so `chars_per_item` stays zero.
pub fn tier_cost(
    catalog: &Catalog,
    policy: &UsagePolicy,
    request_count: u64,
    model: ChatModel,
    mode: BillingMode,
    premium: bool,
) -> AppResult<CostBreakdown> {
    let request = UsageRequest {
        task: TaskKind::Chat,
        model: ModelRef::Chat(model),
        mode,
        premium,
        item_count: request_count,
        chars_per_item: 0,
        chars_for_prompt: policy.chat_prompt_chars,
        chars_per_output: policy.chat_output_chars,
    };

    cost_for_request(catalog, policy.chars_per_token, &request)
}

/// Projects chat usage for the three tiers from head counts.
///
/// Request volumes are policy, not measurement: a share of free users at an
/// average monthly rate, and flat caps for pro and expert. The free tier is
/// costed at zero but its volume still drives the capacity plan.
pub fn compute_all_tiers(
    catalog: &Catalog,
    policy: &UsagePolicy,
    free_users: u64,
    pro_customers: u64,
    expert_customers: u64,
    mode: BillingMode,
) -> AppResult<ChatTiers> {
    let chatting_users = (free_users as f64 * policy.chat_adoption_rate).floor() as u64;
    let free_requests = chatting_users * policy.free_requests_per_user;
    let pro_requests = pro_customers * policy.pro_requests_per_customer;
    let expert_requests = expert_customers * policy.expert_requests_per_customer;

    let free_breakdown = tier_cost(
        catalog,
        policy,
        free_requests,
        policy.economy_chat_model,
        mode,
        false,
    )?;
    let pro_breakdown = tier_cost(
        catalog,
        policy,
        pro_requests,
        policy.premium_chat_model,
        mode,
        true,
    )?;
    let expert_breakdown = tier_cost(
        catalog,
        policy,
        expert_requests,
        policy.premium_chat_model,
        mode,
        true,
    )?;

    // Can the free plan carry a typical day of this load?
    let daily_requests = free_requests as f64 / policy.days_per_month;
    let daily_tokens = free_breakdown.total_tokens / policy.days_per_month;
    let (request_series, token_series) =
        free_tier::distribute_over_day(daily_requests, daily_tokens, &policy.quarters);
    let free_plan = free_tier::select_model(
        &request_series,
        &token_series,
        catalog.free_profiles,
        catalog.fallback,
    );

    Ok(ChatTiers {
        free: TierUsage {
            tier: Tier::Free,
            model: policy.economy_chat_model,
            requests: free_requests,
            breakdown: free_breakdown,
        },
        pro: TierUsage {
            tier: Tier::Pro,
            model: policy.premium_chat_model,
            requests: pro_requests,
            breakdown: pro_breakdown,
        },
        expert: TierUsage {
            tier: Tier::Expert,
            model: policy.premium_chat_model,
            requests: expert_requests,
            breakdown: expert_breakdown,
        },
        free_plan,
    })
}
