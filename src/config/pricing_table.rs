use crate::types::{BillingMode, ChatModel, ChatPricing, EmbeddingModel, EmbeddingPricing};

// List prices in USD per million tokens, copied from the provider's public
// pricing page. Batch is the deferred column and is half of live across the
// board, which the integrity test below relies on staying true.

pub static CHAT_PRICING: &[ChatPricing] = &[
    ChatPricing {
        model: ChatModel::FlashLite,
        mode: BillingMode::Live,
        input_per_million: 0.10,
        output_per_million: 0.40,
    },
    ChatPricing {
        model: ChatModel::FlashLite,
        mode: BillingMode::Batch,
        input_per_million: 0.05,
        output_per_million: 0.20,
    },
    ChatPricing {
        model: ChatModel::Flash,
        mode: BillingMode::Live,
        input_per_million: 0.30,
        output_per_million: 2.50,
    },
    ChatPricing {
        model: ChatModel::Flash,
        mode: BillingMode::Batch,
        input_per_million: 0.15,
        output_per_million: 1.25,
    },
    ChatPricing {
        model: ChatModel::Pro,
        mode: BillingMode::Live,
        input_per_million: 1.25,
        output_per_million: 10.00,
    },
    ChatPricing {
        model: ChatModel::Pro,
        mode: BillingMode::Batch,
        input_per_million: 0.625,
        output_per_million: 5.00,
    },
];

pub static EMBEDDING_PRICING: &[EmbeddingPricing] = &[
    EmbeddingPricing {
        model: EmbeddingModel::GeminiEmbedding001,
        mode: BillingMode::Live,
        price_per_million: 0.15,
    },
    EmbeddingPricing {
        model: EmbeddingModel::GeminiEmbedding001,
        mode: BillingMode::Batch,
        price_per_million: 0.075,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_chat_model_has_both_billing_modes() {
        for model in [ChatModel::FlashLite, ChatModel::Flash, ChatModel::Pro] {
            for mode in [BillingMode::Live, BillingMode::Batch] {
                assert!(
                    CHAT_PRICING
                        .iter()
                        .any(|row| row.model == model && row.mode == mode),
                    "missing chat row for {:?} {:?}",
                    model,
                    mode
                );
            }
        }
    }

    #[test]
    fn every_embedding_model_has_both_billing_modes() {
        for mode in [BillingMode::Live, BillingMode::Batch] {
            assert!(
                EMBEDDING_PRICING
                    .iter()
                    .any(|row| row.model == EmbeddingModel::GeminiEmbedding001 && row.mode == mode)
            );
        }
    }

    #[test]
    fn batch_never_costs_more_than_live() {
        for live in CHAT_PRICING.iter().filter(|r| r.mode == BillingMode::Live) {
            let batch = CHAT_PRICING
                .iter()
                .find(|r| r.model == live.model && r.mode == BillingMode::Batch)
                .unwrap();
            assert!(batch.input_per_million <= live.input_per_million);
            assert!(batch.output_per_million <= live.output_per_million);
        }

        for live in EMBEDDING_PRICING
            .iter()
            .filter(|r| r.mode == BillingMode::Live)
        {
            let batch = EMBEDDING_PRICING
                .iter()
                .find(|r| r.model == live.model && r.mode == BillingMode::Batch)
                .unwrap();
            assert!(batch.price_per_million <= live.price_per_million);
        }
    }
}
