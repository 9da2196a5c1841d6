//! Individual case studies
//!
//! Individual submissions get a generated `id` and start out `pending`.
//! Only pending case studies accept updates.

use crate::clock::Clock;
use crate::draft::accept_draft;
use crate::error::CasebookError;
use casebook_model::{Fields, ReviewStatus, Submission};
use casebook_store::RecordStore;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// CRUD over individual case studies
#[derive(Clone)]
pub struct CaseStudyService {
    store: Arc<dyn RecordStore<Submission>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for CaseStudyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseStudyService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl CaseStudyService {
    /// Service over `store`
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore<Submission>>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Store a new case study and return its id
    pub async fn submit(&self, draft: Fields) -> Result<String, CasebookError> {
        let mut fields = accept_draft(draft)?;
        let id = Uuid::new_v4().to_string();
        fields.insert("id".into(), Value::String(id.clone()));
        fields.insert("submittedAt".into(), Value::String(self.clock.now().to_string()));
        fields.insert(
            "status".into(),
            Value::String(ReviewStatus::Pending.as_str().to_string()),
        );
        let submission = Submission::from_fields(fields)?;

        let mut records = self.store.load().await;
        records.push(submission);
        self.store.save(&records).await?;

        tracing::info!(id = %id, "case study stored");
        Ok(id)
    }

    /// Every case study
    pub async fn list(&self) -> Vec<Submission> {
        self.store.load().await
    }

    /// One case study by id
    pub async fn get(&self, id: &str) -> Result<Submission, CasebookError> {
        self.store
            .load()
            .await
            .into_iter()
            .find(|s| s.id.as_deref() == Some(id))
            .ok_or_else(|| CasebookError::not_found(format!("case study {id}")))
    }

    /// Overlay `patch` on a pending case study
    ///
    /// The id cannot be changed. Fails with `Conflict` once the case study
    /// has left the pending state.
    pub async fn update(&self, id: &str, patch: &Fields) -> Result<Submission, CasebookError> {
        let mut records = self.store.load().await;
        let idx = position(&records, id)?;

        let current = &records[idx];
        if current.review_status() != Some(ReviewStatus::Pending) {
            return Err(CasebookError::Conflict(format!(
                "case study {id} is {} and can no longer be edited",
                current.status.as_deref().unwrap_or("unknown")
            )));
        }

        let mut pinned = Fields::new();
        pinned.insert("id".into(), Value::String(id.to_string()));
        let updated = current.merged([patch, &pinned])?;
        records[idx] = updated.clone();
        self.store.save(&records).await?;

        tracing::info!(id, "case study updated");
        Ok(updated)
    }

    /// Remove a case study, returning it
    pub async fn delete(&self, id: &str) -> Result<Submission, CasebookError> {
        let mut records = self.store.load().await;
        let idx = position(&records, id)?;
        let removed = records.remove(idx);
        self.store.save(&records).await?;

        tracing::info!(id, "case study deleted");
        Ok(removed)
    }
}

fn position(records: &[Submission], id: &str) -> Result<usize, CasebookError> {
    records
        .iter()
        .position(|s| s.id.as_deref() == Some(id))
        .ok_or_else(|| CasebookError::not_found(format!("case study {id}")))
}
