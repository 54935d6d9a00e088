//! ID prefixes and generation.
//!
//! IDs are `{prefix}-{8 hex chars}`, e.g. `tsk-a3f8b2c1`. Generation sits
//! behind [`IdGenerator`] so dispatch and submission can be exercised with a
//! predictable sequence in tests.

use std::sync::atomic::{AtomicU64, Ordering};

pub const PREFIX_REQUIREMENT: &str = "req";
pub const PREFIX_TASK: &str = "tsk";
pub const PREFIX_TURN: &str = "cnv";
pub const PREFIX_REPORT: &str = "rpt";

/// Produces unique identifiers for new records.
pub trait IdGenerator: Send + Sync {
    /// Generate a new ID carrying `prefix`.
    fn generate_id(&self, prefix: &str) -> String;
}

/// Random 32-bit suffixes from the OS entropy source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate_id(&self, prefix: &str) -> String {
        let mut bytes = [0u8; 4];
        if getrandom::fill(&mut bytes).is_err() {
            // Entropy source unavailable: derive the suffix from the clock.
            let nanos = chrono::Utc::now().timestamp_subsec_nanos();
            bytes = nanos.to_le_bytes();
        }
        let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        format!("{prefix}-{suffix}")
    }
}

/// Deterministic `{prefix}-{n:08x}` sequence.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    #[must_use]
    pub const fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate_id(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{n:08x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_have_expected_shape() {
        let id = RandomIds.generate_id(PREFIX_TASK);
        assert!(id.starts_with("tsk-"));
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn random_ids_differ() {
        let a = RandomIds.generate_id(PREFIX_TURN);
        let b = RandomIds.generate_id(PREFIX_TURN);
        assert_ne!(a, b);
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIds::starting_at(1);
        assert_eq!(ids.generate_id(PREFIX_TASK), "tsk-00000001");
        assert_eq!(ids.generate_id(PREFIX_TASK), "tsk-00000002");
    }
}
