use miette::Diagnostic;
use thiserror::Error;

// Naming scheme:
// costcast::parse -> cli argument parsing/validation.
// costcast::scenario -> scenario file loading.
// costcast::pricing -> price table lookups.
// costcast::estimate -> the calculation itself.

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Exchange rate must be positive, got '{0}'.")]
    #[diagnostic(
        code(costcast::parse::fx_rate),
        help("Pass --fx-rate with a value above zero, like '1.0' or '83.2'.")
    )]
    NonPositiveFxRate(f64),

    #[error("Could not read the scenario file at '{0}'.")]
    #[diagnostic(
        code(costcast::scenario::unreadable),
        help("Check the path passed via --scenario. The file must exist and be readable.")
    )]
    ScenarioRead(String, #[source] std::io::Error),

    #[error("The scenario file is not a valid scenario.")]
    #[diagnostic(
        code(costcast::scenario::invalid),
        help(
            "The scenario must be a JSON object with 'mau', 'customers' and 'content' keys.\n\
Unknown keys are rejected on purpose so a typo never silently drops a volume."
        )
    )]
    ScenarioParse(#[source] serde_json::Error),

    /// A price table without a row for a model we were asked to cost.
    /// This is a configuration bug, so the whole report run aborts.
    #[error("Pricing configuration is missing for model '{model}' in {mode} mode.")]
    #[diagnostic(
        code(costcast::pricing::missing_entry),
        help("Every model referenced by the calculators needs a row for both billing modes.")
    )]
    PricingNotFound { model: String, mode: String },

    #[error("Cannot run a '{task}' task against model '{model}'.")]
    #[diagnostic(
        code(costcast::estimate::task_model_mismatch),
        help(
            "Embedding tasks need an embedding model, chat and summary tasks need a chat model.\n\
A mismatched entry would understate the total, so nothing is computed."
        )
    )]
    TaskModelMismatch { task: String, model: String },
}
