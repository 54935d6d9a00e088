use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The user on whose behalf an operation runs.
///
/// Passed explicitly into dispatch and board projection. Produced by the
/// caller from configuration or CLI flags; there is no process-wide current
/// user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: String,
    /// Display label, copied onto records at write time.
    pub user_name: String,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }
}

/// Actor plus the space the operation is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceContext {
    pub space_id: String,
    pub actor: Actor,
}
