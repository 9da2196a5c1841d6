//! Focus-group submissions
//!
//! Group submissions have no id; they are addressed by [`SubmissionKey`].
//! Every call reloads the collection, so nothing is cached between requests.

use crate::clock::Clock;
use crate::draft::accept_draft;
use crate::edit::{reconcile_edit, EditOutcome, EditRequest};
use crate::error::CasebookError;
use casebook_model::{Fields, Submission, SubmissionKey};
use casebook_store::RecordStore;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Create, query and edit focus-group submissions
#[derive(Clone)]
pub struct FocusGroupService {
    store: Arc<dyn RecordStore<Submission>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for FocusGroupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusGroupService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl FocusGroupService {
    /// Service over `store`
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore<Submission>>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record a new focus-group submission
    ///
    /// Returns the identity key of the stored record.
    pub async fn submit(&self, draft: Fields) -> Result<SubmissionKey, CasebookError> {
        let mut fields = accept_draft(draft)?;
        fields.insert("submittedAt".into(), Value::String(self.clock.now().to_string()));
        fields.insert("isEditedVersion".into(), Value::Bool(false));
        let submission = Submission::from_fields(fields)?;
        let key = submission.key();

        let mut records = self.store.load().await;
        records.push(submission);
        self.store.save(&records).await?;

        tracing::info!(submission = %key, "focus-group submission stored");
        Ok(key)
    }

    /// Every stored submission, edited versions included
    pub async fn list(&self) -> Vec<Submission> {
        self.store.load().await
    }

    /// Submissions with a case for `group`, one per identity key
    pub async fn by_group(&self, group: &str) -> Result<Vec<Submission>, CasebookError> {
        if group.trim().is_empty() {
            return Err(CasebookError::validation("group is required"));
        }

        let mut seen = HashSet::new();
        let matching: Vec<Submission> = self
            .store
            .load()
            .await
            .into_iter()
            .filter(|sub| sub.has_group(group))
            .filter(|sub| seen.insert(sub.key()))
            .collect();

        tracing::debug!(group, count = matching.len(), "group submissions resolved");
        Ok(matching)
    }

    /// Reconcile and persist a facilitator edit
    ///
    /// The facilitator comment, if any, is part of the saved record.
    pub async fn edit(&self, request: &EditRequest) -> Result<EditOutcome, CasebookError> {
        let mut records = self.store.load().await;
        let outcome = reconcile_edit(&mut records, request, &self.clock.now())?;
        self.store.save(&records).await?;
        Ok(outcome)
    }
}
