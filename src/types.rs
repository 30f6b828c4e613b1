use crate::prelude::*;

/// The chat model family we can price.
///
/// A closed enum on purpose. An invalid model name can only come from a
/// config edit, and then it fails at the table boundary, not deep inside a
/// calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChatModel {
    #[serde(rename = "gemini-2.5-flash-lite")]
    FlashLite,
    #[serde(rename = "gemini-2.5-flash")]
    Flash,
    #[serde(rename = "gemini-2.5-pro")]
    Pro,
}

impl ChatModel {
    pub fn id(&self) -> &'static str {
        match self {
            ChatModel::FlashLite => "gemini-2.5-flash-lite",
            ChatModel::Flash => "gemini-2.5-flash",
            ChatModel::Pro => "gemini-2.5-pro",
        }
    }
}

/// The embedding model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmbeddingModel {
    #[serde(rename = "gemini-embedding-001")]
    GeminiEmbedding001,
}

impl EmbeddingModel {
    pub fn id(&self) -> &'static str {
        match self {
            EmbeddingModel::GeminiEmbedding001 => "gemini-embedding-001",
        }
    }
}

/// A model reference carried by a usage request.
///
/// The cost dispatch checks that the referenced family matches the task
/// kind. A mismatch is a hard error, see `Error::TaskModelMismatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ModelRef {
    Chat(ChatModel),
    Embedding(EmbeddingModel),
}

impl ModelRef {
    pub fn id(&self) -> &'static str {
        match self {
            ModelRef::Chat(model) => model.id(),
            ModelRef::Embedding(model) => model.id(),
        }
    }
}

/// Live is the interactive price column, batch the deferred discounted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BillingMode {
    Live,
    Batch,
}

impl BillingMode {
    pub fn label(&self) -> &'static str {
        match self {
            BillingMode::Live => "live",
            BillingMode::Batch => "batch",
        }
    }
}

/// What a usage request is paying for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    Embedding,
    Summary,
    Chat,
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Embedding => "embedding",
            TaskKind::Summary => "summary",
            TaskKind::Chat => "chat",
        }
    }
}

/// Customer segment. Free pays nothing, pro and expert are billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Free,
    Pro,
    Expert,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Pro => "pro",
            Tier::Expert => "expert",
        }
    }
}

// Catalog row types. The actual rows live in config.

/// One chat price row, USD per million tokens, for one billing mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChatPricing {
    pub model: ChatModel,
    pub mode: BillingMode,
    pub input_per_million: f64,
    pub output_per_million: f64,
}

/// One embedding price row. Embeddings only have an input side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmbeddingPricing {
    pub model: EmbeddingModel,
    pub mode: BillingMode,
    pub price_per_million: f64,
}

/// Throughput ceiling of one zero-cost model.
///
/// The id stays a plain string because the free catalog spans provider
/// models we never price. `requests_per_day` is carried as provider data
/// but selection only looks at the per-minute limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitProfile {
    pub model: &'static str,
    pub requests_per_minute: u64,
    pub requests_per_day: u64,
    pub tokens_per_minute: u64,
}

/// One quarter of the synthetic day used to shape free-tier traffic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiurnalQuarter {
    /// How many of the 24 hours this quarter covers.
    pub hours: u32,

    /// Fraction of the daily traffic that lands in this quarter.
    pub traffic_share: f64,
}

/// Input to a single cost computation. Built per call, never stored.
#[derive(Debug, Clone, Copy)]
pub struct UsageRequest {
    pub task: TaskKind,
    pub model: ModelRef,
    pub mode: BillingMode,

    /// Premium requests are billed, non-premium ones only count tokens.
    pub premium: bool,

    pub item_count: u64,
    pub chars_per_item: u64,
    pub chars_for_prompt: u64,
    pub chars_per_output: u64,
}

/// Cost and token totals for one computation.
///
/// Cost fields are in the reporting currency once the aggregator has applied
/// the conversion; before that they are USD. Token fields are estimates, so
/// they stay fractional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub total_cost: f64,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_tokens: f64,
    pub input_tokens: f64,
    pub output_tokens: f64,
}

impl CostBreakdown {
    /// Element-wise sum. Used when folding content types into task totals.
    pub fn plus(&self, other: &CostBreakdown) -> CostBreakdown {
        CostBreakdown {
            total_cost: self.total_cost + other.total_cost,
            input_cost: self.input_cost + other.input_cost,
            output_cost: self.output_cost + other.output_cost,
            total_tokens: self.total_tokens + other.total_tokens,
            input_tokens: self.input_tokens + other.input_tokens,
            output_tokens: self.output_tokens + other.output_tokens,
        }
    }

    /// Applies the currency conversion to the money side only.
    pub fn converted(&self, fx: &dyn Fn(f64) -> f64) -> CostBreakdown {
        CostBreakdown {
            total_cost: fx(self.total_cost),
            input_cost: fx(self.input_cost),
            output_cost: fx(self.output_cost),
            ..*self
        }
    }
}
