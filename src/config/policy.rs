use crate::types::{ChatModel, DiurnalQuarter, EmbeddingModel};

/// Product assumptions the estimate runs on.
///
/// None of these are derived from anything, they are the planning numbers
/// product settled on. Lifted into one struct so a what-if run can swap them
/// without touching the calculators.
#[derive(Debug, Clone)]
pub struct UsagePolicy {
    /// Rough chars-per-token ratio used everywhere we turn text into tokens.
    pub chars_per_token: f64,

    /// Average month length used to turn monthly volume into a daily figure.
    pub days_per_month: f64,

    /// Share of free users assumed to touch chat at all.
    pub chat_adoption_rate: f64,

    /// Monthly chat requests for an average free user who does chat.
    pub free_requests_per_user: u64,

    /// Flat monthly request cap per pro customer.
    pub pro_requests_per_customer: u64,

    /// Flat monthly request cap per expert customer.
    pub expert_requests_per_customer: u64,

    /// Average chat prompt and reply sizes, in characters.
    pub chat_prompt_chars: u64,
    pub chat_output_chars: u64,

    /// Shape of the synthetic day, in chronological order.
    /// Hours must sum to 24 and shares to 1.0.
    pub quarters: [DiurnalQuarter; 4],

    // Model roles. Substitutable, not hard-coded into the calculators.
    pub embedding_model: EmbeddingModel,
    pub summary_model: ChatModel,
    pub economy_chat_model: ChatModel,
    pub premium_chat_model: ChatModel,
}

impl Default for UsagePolicy {
    fn default() -> Self {
        UsagePolicy {
            chars_per_token: 4.0,
            days_per_month: 30.5,
            chat_adoption_rate: 0.5,
            free_requests_per_user: 50,
            pro_requests_per_customer: 150,
            expert_requests_per_customer: 300,
            chat_prompt_chars: 500,
            chat_output_chars: 1500,
            // A simple ramp-up curve: the day starts quiet and each quarter
            // carries more traffic than the last. An assumption, not a
            // measurement.
            quarters: [
                DiurnalQuarter {
                    hours: 6,
                    traffic_share: 0.10,
                },
                DiurnalQuarter {
                    hours: 6,
                    traffic_share: 0.20,
                },
                DiurnalQuarter {
                    hours: 6,
                    traffic_share: 0.30,
                },
                DiurnalQuarter {
                    hours: 6,
                    traffic_share: 0.40,
                },
            ],
            embedding_model: EmbeddingModel::GeminiEmbedding001,
            summary_model: ChatModel::Flash,
            economy_chat_model: ChatModel::FlashLite,
            premium_chat_model: ChatModel::Pro,
        }
    }
}
