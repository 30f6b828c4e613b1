use crate::config::Catalog;
use crate::prelude::*;
use crate::types::{CostBreakdown, ModelRef, TaskKind, UsageRequest};

/// Chars-to-tokens at the policy ratio. No rounding on purpose, these are
/// estimates and fractional tokens are fine as intermediates.
pub fn estimate_tokens(chars: u64, chars_per_token: f64) -> f64 {
    chars as f64 / chars_per_token
}

/// Money for a token volume at a per-million list price.
pub fn cost_for_tokens(tokens: f64, price_per_million: f64) -> f64 {
    let tokens_in_millions = tokens / 1_000_000.0;

    tokens_in_millions * price_per_million
}

/// Prices one usage request, in USD.
///
/// This is the one place task kinds are dispatched on. A request whose model
/// family does not match its task kind aborts the whole estimate rather than
/// contributing a quiet zero.
pub fn cost_for_request(
    catalog: &Catalog,
    chars_per_token: f64,
    request: &UsageRequest,
) -> AppResult<CostBreakdown> {
    let items = request.item_count as f64;
    let input_tokens =
        items * estimate_tokens(request.chars_per_item + request.chars_for_prompt, chars_per_token);
    let output_tokens = items * estimate_tokens(request.chars_per_output, chars_per_token);

    // Non-premium usage is free of charge but still consumes capacity, so
    // token counts are reported either way. No price lookup happens here at
    // all, a free table row may legitimately not exist.
    if !request.premium {
        return Ok(CostBreakdown {
            total_tokens: input_tokens + output_tokens,
            input_tokens,
            output_tokens,
            ..CostBreakdown::default()
        });
    }

    let (input_cost, output_cost) = match (request.task, request.model) {
        (TaskKind::Embedding, ModelRef::Embedding(model)) => {
            let pricing = catalog.find_embedding_price(model, request.mode)?;

            (cost_for_tokens(input_tokens, pricing.price_per_million), 0.0)
        }

        (TaskKind::Summary | TaskKind::Chat, ModelRef::Chat(model)) => {
            let pricing = catalog.find_chat_price(model, request.mode)?;

            (
                cost_for_tokens(input_tokens, pricing.input_per_million),
                cost_for_tokens(output_tokens, pricing.output_per_million),
            )
        }

        (task, model) => {
            let error = Error::TaskModelMismatch {
                task: task.label().to_owned(),
                model: model.id().to_owned(),
            };

            return Err(error.into());
        }
    };

    Ok(CostBreakdown {
        total_cost: input_cost + output_cost,
        input_cost,
        output_cost,
        total_tokens: input_tokens + output_tokens,
        input_tokens,
        output_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BillingMode, ChatModel, EmbeddingModel};

    fn request(task: TaskKind, model: ModelRef, items: u64) -> UsageRequest {
        UsageRequest {
            task,
            model,
            mode: BillingMode::Batch,
            premium: true,
            item_count: items,
            chars_per_item: 2000,
            chars_for_prompt: 240,
            chars_per_output: 1000,
        }
    }

    #[test]
    fn zero_inputs_cost_nothing() {
        assert_eq!(estimate_tokens(0, 4.0), 0.0);
        assert_eq!(cost_for_tokens(0.0, 10.0), 0.0);
        assert_eq!(cost_for_tokens(0.0, 0.0), 0.0);
    }

    #[test]
    fn token_estimate_uses_the_ratio() {
        assert_eq!(estimate_tokens(2000, 4.0), 500.0);
        // Fractional intermediates are expected, not rounded away.
        assert_eq!(estimate_tokens(10, 4.0), 2.5);
    }

    #[test]
    fn cost_math_is_per_million() {
        // 500k tokens at $0.15/M.
        let cost = cost_for_tokens(500_000.0, 0.15);
        assert!((cost - 0.075).abs() < 1e-12);
    }

    #[test]
    fn cost_grows_with_items_and_chars() {
        let catalog = Catalog::builtin();
        let base = request(
            TaskKind::Summary,
            ModelRef::Chat(ChatModel::Flash),
            1000,
        );

        let mut more_items = base;
        more_items.item_count = 2000;

        let mut longer_items = base;
        longer_items.chars_per_item = 4000;

        let base_cost = cost_for_request(&catalog, 4.0, &base).unwrap();
        let items_cost = cost_for_request(&catalog, 4.0, &more_items).unwrap();
        let chars_cost = cost_for_request(&catalog, 4.0, &longer_items).unwrap();

        assert!(items_cost.total_cost >= base_cost.total_cost);
        assert!(chars_cost.total_cost >= base_cost.total_cost);
        assert!(items_cost.total_tokens >= base_cost.total_tokens);
        assert!(chars_cost.total_tokens >= base_cost.total_tokens);
    }

    #[test]
    fn embedding_request_prices_the_input_side_only() {
        let catalog = Catalog::builtin();
        let mut req = request(
            TaskKind::Embedding,
            ModelRef::Embedding(EmbeddingModel::GeminiEmbedding001),
            1000,
        );
        req.chars_for_prompt = 0;
        req.chars_per_output = 0;

        let breakdown = cost_for_request(&catalog, 4.0, &req).unwrap();

        // 1000 items * 500 tokens = 500k tokens at the batch price $0.075/M.
        assert_eq!(breakdown.input_tokens, 500_000.0);
        assert_eq!(breakdown.output_tokens, 0.0);
        assert_eq!(breakdown.output_cost, 0.0);
        assert!((breakdown.total_cost - 0.0375).abs() < 1e-12);
    }

    #[test]
    fn non_premium_requests_report_tokens_but_no_cost() {
        let catalog = Catalog::builtin();
        let mut req = request(TaskKind::Chat, ModelRef::Chat(ChatModel::FlashLite), 500);
        req.premium = false;
        req.chars_per_item = 0;

        let breakdown = cost_for_request(&catalog, 4.0, &req).unwrap();

        assert_eq!(breakdown.total_cost, 0.0);
        assert_eq!(breakdown.input_cost, 0.0);
        assert_eq!(breakdown.output_cost, 0.0);
        assert!(breakdown.total_tokens > 0.0);
    }

    #[test]
    fn a_task_model_mismatch_is_a_hard_error() {
        let catalog = Catalog::builtin();

        let chat_model_on_embedding = request(
            TaskKind::Embedding,
            ModelRef::Chat(ChatModel::Pro),
            10,
        );
        assert!(cost_for_request(&catalog, 4.0, &chat_model_on_embedding).is_err());

        let embedding_model_on_chat = request(
            TaskKind::Chat,
            ModelRef::Embedding(EmbeddingModel::GeminiEmbedding001),
            10,
        );
        assert!(cost_for_request(&catalog, 4.0, &embedding_model_on_chat).is_err());
    }
}
