use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ReportStatus, Severity};

/// Terminal summary of a task's changes, produced once the agent finishes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReport {
    pub id: String,
    pub task_id: String,
    pub task_title: String,
    pub requirement_status: ReportStatus,
    /// Cost counter set by the backend; never recomputed here.
    #[serde(default)]
    pub token_consumed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement_url: Option<String>,
    #[serde(default)]
    pub impact_analysis: Vec<ImpactAnalysis>,
    #[serde(default)]
    pub merge_requests: Vec<MergeRequest>,
    #[serde(default)]
    pub code_changes: Vec<CodeChange>,
    #[serde(default)]
    pub database_changes: Vec<DatabaseChange>,
    #[serde(default)]
    pub config_changes: Vec<ConfigChange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    pub id: String,
    pub git_repo_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_repo_url: Option<String>,
    pub mr_url: String,
    /// `open`, `merged`, `closed`, or `pending_cr`.
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CodeChange {
    pub id: String,
    pub git_repo_name: String,
    pub file_path: String,
    /// `added`, `modified`, or `deleted`.
    pub change_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseChange {
    pub id: String,
    /// `DDL` or `DML`.
    pub change_type: String,
    pub sql_script: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigChange {
    pub id: String,
    /// `file` or `platform`.
    pub config_type: String,
    pub config_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    pub new_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// How a change affects one business module.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysis {
    pub module: String,
    pub description: String,
    pub severity: Severity,
    #[serde(default)]
    pub upstream_services: Vec<String>,
    #[serde(default)]
    pub downstream_services: Vec<String>,
}
