//! Delivery report display settings.

use relay_core::report::{CostRate, DEFAULT_COST_PER_MILLION_TOKENS, DEFAULT_CURRENCY};
use serde::{Deserialize, Serialize};

const fn default_cost_per_million_tokens() -> f64 {
    DEFAULT_COST_PER_MILLION_TOKENS
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Price of one million consumed tokens.
    #[serde(default = "default_cost_per_million_tokens")]
    pub cost_per_million_tokens: f64,

    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            cost_per_million_tokens: default_cost_per_million_tokens(),
            currency: default_currency(),
        }
    }
}

impl ReportConfig {
    pub fn cost_rate(&self) -> CostRate {
        CostRate {
            per_million_tokens: self.cost_per_million_tokens,
            currency: self.currency.clone(),
        }
    }
}
