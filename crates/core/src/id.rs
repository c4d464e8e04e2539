// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ID generation abstractions

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generates unique identifiers
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> String;
}

/// UUID-based ID generator for production use
#[derive(Clone, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Sequential ID generator for testing
#[derive(Clone)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("run")
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn uuid_ids_do_not_collide() {
        let id_gen = UuidIdGen;
        let ids: BTreeSet<String> = (0..16).map(|_| id_gen.next()).collect();
        assert_eq!(ids.len(), 16);
        assert!(ids.iter().all(|id| uuid::Uuid::parse_str(id).is_ok()));
    }

    #[test]
    fn sequential_ids_carry_the_prefix_in_order() {
        let id_gen = SequentialIdGen::new("audit");
        assert_eq!(id_gen.next(), "audit-1");
        assert_eq!(id_gen.next(), "audit-2");
    }

    #[test]
    fn default_sequential_prefix_is_run() {
        assert_eq!(SequentialIdGen::default().next(), "run-1");
    }

    #[test]
    fn clones_draw_from_a_shared_counter() {
        let id_gen = SequentialIdGen::new("shared");
        let clone = id_gen.clone();
        clone.next();
        assert_eq!(id_gen.next(), "shared-2");
    }
}
