//! Delivery report aggregation.
//!
//! A pure, read-only view over a task's delivery report: cost estimate,
//! changes grouped for display, impact rows sorted by severity. Nothing here
//! mutates the report.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::entities::{
    CodeChange, ConfigChange, DatabaseChange, DeliveryReport, ImpactAnalysis, MergeRequest,
};
use crate::enums::{ReportStatus, TaskStatus};

pub const DEFAULT_COST_PER_MILLION_TOKENS: f64 = 27.0;
pub const DEFAULT_CURRENCY: &str = "CNY";

const TOKENS_PER_UNIT: f64 = 1_000_000.0;

/// Fixed price per million consumed tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRate {
    pub per_million_tokens: f64,
    pub currency: String,
}

impl Default for CostRate {
    fn default() -> Self {
        Self {
            per_million_tokens: DEFAULT_COST_PER_MILLION_TOKENS,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl CostRate {
    /// Linear estimate for `tokens`, rounded to cents.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn estimate(&self, tokens: u64) -> CostEstimate {
        let raw = tokens as f64 / TOKENS_PER_UNIT * self.per_million_tokens;
        CostEstimate {
            amount: (raw * 100.0).round() / 100.0,
            currency: self.currency.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub amount: f64,
    pub currency: String,
}

impl std::fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

/// Items sharing one grouping key, in report order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeGroup<T> {
    pub key: String,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub merge_requests: usize,
    pub code_changes: usize,
    pub database_changes: usize,
    pub config_changes: usize,
    pub impacted_modules: usize,
}

/// Display-ready summary of one delivery report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub report_id: String,
    pub task_id: String,
    pub task_title: String,
    pub status: ReportStatus,
    pub token_consumed: u64,
    pub cost: CostEstimate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement_url: Option<String>,
    pub merge_requests: Vec<MergeRequest>,
    /// Keyed by repository name.
    pub code_changes: Vec<ChangeGroup<CodeChange>>,
    /// Keyed by `DDL` / `DML`.
    pub database_changes: Vec<ChangeGroup<DatabaseChange>>,
    /// Keyed by `file` / `platform`.
    pub config_changes: Vec<ChangeGroup<ConfigChange>>,
    /// High severity first; equal severities keep report order.
    pub impact: Vec<ImpactAnalysis>,
    pub totals: ReportTotals,
}

impl ReportView {
    #[must_use]
    pub fn build(report: &DeliveryReport, rate: &CostRate) -> Self {
        let mut impact = report.impact_analysis.clone();
        impact.sort_by_key(|row| Reverse(row.severity));

        Self {
            report_id: report.id.clone(),
            task_id: report.task_id.clone(),
            task_title: report.task_title.clone(),
            status: report.requirement_status,
            token_consumed: report.token_consumed,
            cost: rate.estimate(report.token_consumed),
            requirement_url: report.requirement_url.clone(),
            merge_requests: report.merge_requests.clone(),
            code_changes: group_by(&report.code_changes, |c| &c.git_repo_name),
            database_changes: group_by(&report.database_changes, |c| &c.change_type),
            config_changes: group_by(&report.config_changes, |c| &c.config_type),
            totals: ReportTotals {
                merge_requests: report.merge_requests.len(),
                code_changes: report.code_changes.len(),
                database_changes: report.database_changes.len(),
                config_changes: report.config_changes.len(),
                impacted_modules: impact.len(),
            },
            impact,
        }
    }
}

/// Result of asking for a task's report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "availability", rename_all = "snake_case")]
pub enum ReportAvailability {
    /// The task is still running, or the report has not arrived yet.
    NotYetAvailable { status: TaskStatus },
    Available(Box<ReportView>),
}

impl ReportAvailability {
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Build the report view for a task in `status`.
///
/// An `in_progress` task never exposes its report, even an interim one.
#[must_use]
pub fn aggregate(
    status: TaskStatus,
    report: Option<&DeliveryReport>,
    rate: &CostRate,
) -> ReportAvailability {
    match report {
        Some(report) if status.has_report() => {
            ReportAvailability::Available(Box::new(ReportView::build(report, rate)))
        }
        _ => ReportAvailability::NotYetAvailable { status },
    }
}

fn group_by<T: Clone>(items: &[T], key: impl Fn(&T) -> &String) -> Vec<ChangeGroup<T>> {
    let mut groups: Vec<ChangeGroup<T>> = Vec::new();
    for item in items {
        let k = key(item);
        match groups.iter_mut().find(|g| &g.key == k) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(ChangeGroup {
                key: k.clone(),
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::enums::Severity;

    fn code(id: &str, repo: &str) -> CodeChange {
        CodeChange {
            id: id.into(),
            git_repo_name: repo.into(),
            file_path: format!("src/{id}.rs"),
            change_type: "modified".into(),
            content: None,
            created_at: Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
        }
    }

    fn impact(module: &str, severity: Severity) -> ImpactAnalysis {
        ImpactAnalysis {
            module: module.into(),
            description: String::new(),
            severity,
            upstream_services: vec![],
            downstream_services: vec![],
        }
    }

    fn sample() -> DeliveryReport {
        let ts = Utc.with_ymd_and_hms(2026, 10, 2, 0, 0, 0).unwrap();
        DeliveryReport {
            id: "rpt-1".into(),
            task_id: "tsk-1".into(),
            task_title: "Export orders".into(),
            requirement_status: ReportStatus::AiCompleted,
            token_consumed: 2_345_678,
            requirement_url: None,
            impact_analysis: vec![
                impact("billing", Severity::Low),
                impact("orders", Severity::High),
                impact("search", Severity::Medium),
                impact("audit", Severity::High),
            ],
            merge_requests: vec![],
            code_changes: vec![code("a", "web"), code("b", "api"), code("c", "web")],
            database_changes: vec![
                DatabaseChange {
                    id: "d1".into(),
                    change_type: "DDL".into(),
                    sql_script: "ALTER TABLE orders ADD COLUMN exported_at TIMESTAMP".into(),
                    description: None,
                    created_at: ts,
                },
                DatabaseChange {
                    id: "d2".into(),
                    change_type: "DML".into(),
                    sql_script: "UPDATE orders SET exported_at = NULL".into(),
                    description: None,
                    created_at: ts,
                },
            ],
            config_changes: vec![],
            created_at: ts,
            updated_at: ts,
        }
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(1_000_000, 27.0)]
    #[case(2_345_678, 63.33)]
    #[case(100, 0.0)]
    fn cost_is_linear_and_rounded_to_cents(#[case] tokens: u64, #[case] expected: f64) {
        let cost = CostRate::default().estimate(tokens);
        assert!((cost.amount - expected).abs() < f64::EPSILON);
        assert_eq!(cost.currency, "CNY");
    }

    #[test]
    fn cost_display_has_two_decimals() {
        assert_eq!(CostRate::default().estimate(1_000_000).to_string(), "27.00 CNY");
    }

    #[test]
    fn changes_group_in_first_seen_order() {
        let view = ReportView::build(&sample(), &CostRate::default());
        let repos: Vec<(&str, usize)> = view
            .code_changes
            .iter()
            .map(|g| (g.key.as_str(), g.items.len()))
            .collect();
        assert_eq!(repos, vec![("web", 2), ("api", 1)]);
        assert_eq!(view.database_changes.len(), 2);
        assert!(view.config_changes.is_empty());
        assert_eq!(view.totals.code_changes, 3);
    }

    #[test]
    fn impact_is_sorted_high_first_and_stable() {
        let view = ReportView::build(&sample(), &CostRate::default());
        let modules: Vec<&str> = view.impact.iter().map(|i| i.module.as_str()).collect();
        assert_eq!(modules, vec!["orders", "audit", "search", "billing"]);
    }

    #[test]
    fn running_task_has_no_report() {
        let report = sample();
        let view = aggregate(TaskStatus::InProgress, Some(&report), &CostRate::default());
        assert_eq!(
            view,
            ReportAvailability::NotYetAvailable {
                status: TaskStatus::InProgress
            }
        );
        assert!(!aggregate(TaskStatus::PendingConfirm, None, &CostRate::default()).is_available());
        assert!(aggregate(TaskStatus::PendingConfirm, Some(&report), &CostRate::default()).is_available());
    }

    #[test]
    fn aggregate_leaves_report_untouched() {
        let report = sample();
        let before = report.clone();
        let _ = aggregate(TaskStatus::Completed, Some(&report), &CostRate::default());
        assert_eq!(report, before);
    }
}
