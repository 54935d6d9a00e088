//! Serde roundtrip and JsonSchema validation tests for wire entities.

use chrono::{TimeZone, Utc};
use relay_core::content::*;
use relay_core::dispatch::DispatchRequest;
use relay_core::entities::*;
use relay_core::enums::*;
use relay_core::expansion::ExpansionState;
use relay_core::lifecycle::StatusChange;
use relay_core::render::render_turn;
use relay_core::responses::*;
use schemars::schema_for;
use serde_json::json;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn ts() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 12, 9, 30, 0).unwrap()
}

fn turn_with(content: StructuredContent) -> ConversationTurn {
    ConversationTurn {
        id: "cnv-00000001".into(),
        task_id: "tsk-00000001".into(),
        role: Role::Assistant,
        content: "Agent output; plain text is kept verbatim.".into(),
        structured_content: Some(content.into()),
        step: Some("Implementation".into()),
        created_at: ts(),
    }
}

roundtrip_and_validate!(
    requirement_roundtrip,
    Requirement,
    Requirement {
        id: "req-1a2b3c4d".into(),
        space_id: "spc-1".into(),
        title: "Speed up home page".into(),
        description: "Home page takes 6s to render".into(),
        priority: Priority::High,
        source: "Jira".into(),
        source_url: Some("https://jira.example.com/browse/WEB-12".into()),
        image_url: None,
        document_url: None,
        created_by: "pm".into(),
        created_at: ts(),
        assignees: vec![
            AssigneeStatus {
                user_id: "u1".into(),
                user_name: "Ada".into(),
                status: AssigneeState::Dispatched,
                dispatched_at: Some(ts()),
                resulting_task_id: Some("tsk-00000001".into()),
            },
            AssigneeStatus::pending("u2", "Grace"),
        ],
    }
);

roundtrip_and_validate!(
    task_roundtrip,
    Task,
    Task {
        id: "tsk-00000001".into(),
        space_id: "spc-1".into(),
        requirement_id: Some("req-1a2b3c4d".into()),
        title: "Speed up home page".into(),
        description: "Home page takes 6s to render".into(),
        status: TaskStatus::PendingConfirm,
        created_by: "u1".into(),
        created_at: ts(),
        updated_at: ts(),
        completed_at: None,
        git_repos: vec![TaskGitRepo {
            git_repo_id: "g1".into(),
            git_repo_name: "web".into(),
            base_branch: "main".into(),
        }],
    }
);

roundtrip_and_validate!(
    new_task_roundtrip,
    NewTask,
    NewTask {
        space_id: "spc-1".into(),
        title: None,
        description: "Export orders as CSV".into(),
        git_repos: vec![],
    }
);

roundtrip_and_validate!(
    dispatch_request_roundtrip,
    DispatchRequest,
    DispatchRequest {
        user_id: "u1".into(),
        supplemental_text: Some("Focus on images".into()),
        git_repos: vec![],
    }
);

roundtrip_and_validate!(
    report_roundtrip,
    DeliveryReport,
    DeliveryReport {
        id: "rpt-00000001".into(),
        task_id: "tsk-00000001".into(),
        task_title: "Speed up home page".into(),
        requirement_status: ReportStatus::AiCompleted,
        token_consumed: 1_250_000,
        requirement_url: None,
        impact_analysis: vec![ImpactAnalysis {
            module: "home".into(),
            description: "Lazy-loads hero images".into(),
            severity: Severity::Medium,
            upstream_services: vec!["cdn".into()],
            downstream_services: vec![],
        }],
        merge_requests: vec![MergeRequest {
            id: "mr-1".into(),
            git_repo_name: "web".into(),
            git_repo_url: None,
            mr_url: "https://git.example.com/web/-/merge_requests/7".into(),
            status: "open".into(),
            created_at: ts(),
        }],
        code_changes: vec![CodeChange {
            id: "cc-1".into(),
            git_repo_name: "web".into(),
            file_path: "src/home.tsx".into(),
            change_type: "modified".into(),
            content: None,
            created_at: ts(),
        }],
        database_changes: vec![],
        config_changes: vec![ConfigChange {
            id: "cfg-1".into(),
            config_type: "platform".into(),
            config_key: "cdn.cache_ttl".into(),
            old_value: Some("60".into()),
            new_value: "600".into(),
            file_path: None,
            platform: Some("apollo".into()),
            created_at: ts(),
        }],
        created_at: ts(),
        updated_at: ts(),
    }
);

roundtrip_and_validate!(
    text_turn_roundtrip,
    ConversationTurn,
    turn_with(StructuredContent::Text {
        text: "Analysis finished".into()
    })
);

roundtrip_and_validate!(
    tree_turn_roundtrip,
    ConversationTurn,
    turn_with(StructuredContent::Tree {
        tree: vec![TreeNode {
            key: "web".into(),
            title: "web".into(),
            icon: Some("folder".into()),
            status: Some(WorkStatus::InProgress),
            children: vec![TreeNode {
                key: "web/src".into(),
                title: "src".into(),
                icon: None,
                status: None,
                children: vec![],
            }],
        }],
    })
);

roundtrip_and_validate!(
    todo_turn_roundtrip,
    ConversationTurn,
    turn_with(StructuredContent::Todo {
        todos: vec![TodoItem {
            id: "t1".into(),
            content: "Update home page".into(),
            status: WorkStatus::InProgress,
            kind: TodoKind::File,
            active_form: Some("Updating home page".into()),
            code: None,
            children: vec![TodoItem {
                id: "t1.1".into(),
                content: "Lazy-load hero".into(),
                status: WorkStatus::Pending,
                kind: TodoKind::Code,
                active_form: None,
                code: Some(Snippet {
                    language: "tsx".into(),
                    content: "<img loading=\"lazy\" />".into(),
                }),
                children: vec![],
            }],
        }],
    })
);

roundtrip_and_validate!(
    code_turn_roundtrip,
    ConversationTurn,
    turn_with(StructuredContent::Code {
        code: CodeBlock {
            language: "rust".into(),
            content: "fn main() {}".into(),
            file_name: Some("main.rs".into()),
        },
    })
);

roundtrip_and_validate!(
    progress_turn_roundtrip,
    ConversationTurn,
    turn_with(StructuredContent::Progress {
        progress: Progress {
            current: 3,
            total: 3,
            message: "done".into(),
        },
    })
);

roundtrip_and_validate!(
    analysis_turn_roundtrip,
    ConversationTurn,
    turn_with(StructuredContent::Analysis {
        analysis: vec![AnalysisRow {
            label: "Coverage".into(),
            value: "87%".into(),
            level: AnalysisLevel::Success,
        }],
    })
);

roundtrip_and_validate!(
    status_change_roundtrip,
    StatusChange,
    StatusChange {
        from: TaskStatus::InProgress,
        to: TaskStatus::PendingConfirm,
        at: ts(),
    }
);

#[test]
fn wire_names_are_camel_case() {
    let value = serde_json::to_value(AssigneeStatus {
        user_id: "u1".into(),
        user_name: "Ada".into(),
        status: AssigneeState::Dispatched,
        dispatched_at: Some(ts()),
        resulting_task_id: Some("tsk-1".into()),
    })
    .unwrap();
    assert_eq!(value["userId"], "u1");
    assert_eq!(value["taskId"], "tsk-1");
    assert_eq!(value["status"], "dispatched");
    assert!(value["dispatchedAt"].is_string());
}

#[test]
fn progress_payload_uses_variant_key() {
    let turn = turn_with(StructuredContent::Progress {
        progress: Progress::new(1, 4, "scanning").unwrap(),
    });
    let value = serde_json::to_value(&turn).unwrap();
    assert_eq!(
        value["structuredContent"],
        json!({"type": "progress", "progress": {"current": 1, "total": 4, "message": "scanning"}})
    );
}

#[test]
fn todo_type_defaults_to_task() {
    let item: TodoItem = serde_json::from_value(json!({
        "id": "t1", "content": "c", "status": "pending"
    }))
    .unwrap();
    assert_eq!(item.kind, TodoKind::Task);
}

#[test]
fn unknown_variant_survives_roundtrip_verbatim() {
    let raw = json!({
        "id": "cnv-9",
        "taskId": "tsk-1",
        "role": "assistant",
        "content": "Rendered as text",
        "structuredContent": {"type": "chart", "series": [1, 2, 3]},
        "createdAt": "2026-10-12T09:30:00Z"
    });
    let turn: ConversationTurn = serde_json::from_value(raw.clone()).unwrap();
    assert!(matches!(
        turn.structured_content,
        Some(ContentPayload::Unrecognized(_))
    ));
    assert_eq!(serde_json::to_value(&turn).unwrap(), raw);
}

#[test]
fn roundtrip_renders_identically() {
    let state = ExpansionState::new();
    for content in [
        StructuredContent::Text { text: "x".into() },
        StructuredContent::Progress {
            progress: Progress::new(2, 5, "halfway").unwrap(),
        },
        StructuredContent::Analysis {
            analysis: vec![AnalysisRow {
                label: "Risk".into(),
                value: "low".into(),
                level: AnalysisLevel::Info,
            }],
        },
    ] {
        let turn = turn_with(content);
        let json_str = serde_json::to_string(&turn).unwrap();
        let recovered: ConversationTurn = serde_json::from_str(&json_str).unwrap();
        assert_eq!(render_turn(&recovered, &state), render_turn(&turn, &state));
        assert_eq!(recovered.content, turn.content);
    }
}

#[test]
fn envelope_unwraps_requirement_list() {
    let env: ApiEnvelope<Vec<Requirement>> =
        serde_json::from_value(json!({"success": true, "data": []})).unwrap();
    assert!(env.into_data().unwrap().is_empty());
}
