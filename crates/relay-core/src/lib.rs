//! # relay-core
//!
//! Core types and pure domain logic for Relay, a dashboard that tracks
//! AI-executed delivery tasks from requirement intake to delivery-report
//! confirmation.
//!
//! This crate performs no I/O. It provides:
//! - Entity structs for requirements, tasks, conversation turns, and reports
//! - Status enums with state machine transitions
//! - The structured content model attached to conversation turns
//! - The append-only conversation log and per-viewer expansion state
//! - The assignee dispatch ledger
//! - The task lifecycle state machine
//! - The delivery report aggregator
//! - The board projection and board statistics
//! - Date windows, poll policy, ID generation, and the error taxonomy
//! - Backend response envelope types

pub mod board;
pub mod content;
pub mod dispatch;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod expansion;
pub mod identity;
pub mod ids;
pub mod lifecycle;
pub mod log;
pub mod poll;
pub mod render;
pub mod report;
pub mod responses;
pub mod window;
