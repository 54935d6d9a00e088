//! Entity structs for Relay domain objects.
//!
//! Each entity mirrors a record returned by the backend API. Field names
//! serialize as `camelCase` to match the wire format. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod conversation;
mod report;
mod requirement;
mod task;

pub use conversation::{ConversationTurn, NewTurn};
pub use report::{
    CodeChange, ConfigChange, DatabaseChange, DeliveryReport, ImpactAnalysis, MergeRequest,
};
pub use requirement::{AssigneeStatus, Requirement};
pub use task::{
    DERIVED_TITLE_MAX_CHARS, NewTask, Task, TaskGitRepo, derive_title, validate_git_repos,
};
