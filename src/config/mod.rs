pub mod policy;
pub mod pricing_table;
pub mod rate_limits;
pub mod scenario;

use crate::prelude::*;
use crate::types::{
    BillingMode, ChatModel, ChatPricing, EmbeddingModel, EmbeddingPricing, RateLimitProfile,
};

/// The static data an estimate runs against, bundled so tests can hand the
/// engine a synthetic table instead of the shipped one.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    pub chat: &'a [ChatPricing],
    pub embedding: &'a [EmbeddingPricing],

    /// Ordered. First profile that covers the free-tier peak wins.
    pub free_profiles: &'a [RateLimitProfile],

    /// Recommended when no free profile covers the peak.
    pub fallback: RateLimitProfile,
}

impl Catalog<'static> {
    /// The shipped catalogs. Loaded once, immutable, shared freely.
    pub fn builtin() -> Self {
        Catalog {
            chat: pricing_table::CHAT_PRICING,
            embedding: pricing_table::EMBEDDING_PRICING,
            free_profiles: rate_limits::FREE_PROFILES,
            fallback: rate_limits::FALLBACK_PROFILE,
        }
    }
}

impl Catalog<'_> {
    /// Exact-match price lookup. A missing row means the table and the
    /// calculators disagree, and that must surface, never default.
    pub fn find_chat_price(&self, model: ChatModel, mode: BillingMode) -> AppResult<&ChatPricing> {
        let row = self
            .chat
            .iter()
            .find(|row| row.model == model && row.mode == mode);

        let row = row.ok_or_else(|| Error::PricingNotFound {
            model: model.id().to_owned(),
            mode: mode.label().to_owned(),
        })?;

        Ok(row)
    }

    pub fn find_embedding_price(
        &self,
        model: EmbeddingModel,
        mode: BillingMode,
    ) -> AppResult<&EmbeddingPricing> {
        let row = self
            .embedding
            .iter()
            .find(|row| row.model == model && row.mode == mode);

        let row = row.ok_or_else(|| Error::PricingNotFound {
            model: model.id().to_owned(),
            mode: mode.label().to_owned(),
        })?;

        Ok(row)
    }
}
