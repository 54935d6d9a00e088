//! Board view defaults.

use relay_core::window::{DateRangePreset, WeekStart};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoardConfig {
    /// Range used when no `--range` is given. Must not be `custom`.
    #[serde(default)]
    pub default_range: DateRangePreset,

    #[serde(default)]
    pub week_start: WeekStart,
}
