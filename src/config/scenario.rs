use std::collections::BTreeMap;

use crate::prelude::*;
use crate::types::BillingMode;

/// One what-if input, usually loaded from a JSON file.
///
/// Unknown keys are rejected, see `Error::ScenarioParse`. A misspelled
/// content entry that silently dropped out would understate the total, and
/// nobody rereads a cost projection suspiciously enough to notice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Projected monthly active users, all tiers together.
    pub mau: u64,

    pub customers: Customers,

    /// Whether provider calls go through the discounted batch lane.
    #[serde(default = "default_batch")]
    pub batch: bool,

    /// Content-processing volume per content type name (news, research, ...).
    /// BTreeMap so the per-type breakdown renders in a stable order.
    pub content: BTreeMap<String, ContentVolume>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Customers {
    pub pro: u64,
    pub expert: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentVolume {
    /// How many pieces of this content type get processed per month.
    pub monthly_items: u64,

    pub chars: CharCounts,
}

/// Character-length assumptions for one content type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharCounts {
    /// The piece itself.
    pub content: u64,

    /// Instruction text prepended when summarizing.
    pub prompt: u64,

    /// Expected summary length.
    pub output: u64,
}

impl Scenario {
    pub fn from_json(raw: &str) -> AppResult<Scenario> {
        let scenario = serde_json::from_str(raw).map_err(Error::ScenarioParse)?;

        Ok(scenario)
    }

    pub fn billing_mode(&self) -> BillingMode {
        match self.batch {
            true => BillingMode::Batch,
            false => BillingMode::Live,
        }
    }
}

fn default_batch() -> bool {
    true
}
