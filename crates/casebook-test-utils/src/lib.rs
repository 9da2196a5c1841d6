//! Testing utilities for the casebook workspace
//!
//! Shared fixtures and an in-memory casebook.

#![allow(missing_docs)]

use casebook_core::{Casebook, Clock, FixedClock, Stores};
use casebook_model::{Case, Fields, Submission, Timestamp, User};
use casebook_store::MemoryStore;
use serde_json::Value;
use std::sync::Arc;

pub const ALICE_KEY: &str = "alice|a@x.com|2024-01-01T00:00:00Z";

pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn submission(username: &str, email: &str, submitted_at: &str) -> Submission {
    Submission::new(username, email, Timestamp::from_raw(submitted_at))
}

pub fn alice_submission() -> Submission {
    submission("alice", "a@x.com", "2024-01-01T00:00:00Z").with_cases(vec![Case::new("Group A")
        .with_value("Fairness", "everyone plays by the same rules")
        .with_tension("Privacy vs. Transparency", "from the kit")
        .with_tension("Speed vs. Care", "ship fast or ship right")])
}

/// Casebook over memory stores, with the stores kept for inspection
pub struct MemoryCasebook {
    pub casebook: Casebook,
    pub individual: Arc<MemoryStore<Submission>>,
    pub focus_group: Arc<MemoryStore<Submission>>,
    pub users: Arc<MemoryStore<User>>,
}

impl MemoryCasebook {
    pub fn new(individual: Vec<Submission>, focus_group: Vec<Submission>) -> Self {
        Self::with_clock(
            individual,
            focus_group,
            Arc::new(FixedClock(Timestamp::from_raw("2024-06-01T12:00:00.000Z"))),
        )
    }

    pub fn with_clock(
        individual: Vec<Submission>,
        focus_group: Vec<Submission>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::from_stores(
            Arc::new(MemoryStore::with_records(individual)),
            Arc::new(MemoryStore::with_records(focus_group)),
            Arc::new(MemoryStore::new()),
            clock,
        )
    }

    pub fn from_stores(
        individual: Arc<MemoryStore<Submission>>,
        focus_group: Arc<MemoryStore<Submission>>,
        users: Arc<MemoryStore<User>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let stores = Stores {
            individual: individual.clone(),
            focus_group: focus_group.clone(),
            users: users.clone(),
        };
        Self {
            casebook: Casebook::with_clock(stores, clock),
            individual,
            focus_group,
            users,
        }
    }
}
