//! Edit reconciliation for focus-group submissions
//!
//! A facilitator edits a submission by naming it with its identity key. The
//! engine decides where the edit lands:
//!
//! 1. an edited version of that original already exists: merge over it and
//!    replace it where it stands
//! 2. the key names an edited version itself: merge over it in place
//! 3. otherwise: derive a new edited version from the original and append it
//!
//! Each original therefore has at most one edited version in the collection.
//!
//! [`reconcile_edit`] works on a loaded snapshot and is free of I/O; the
//! service in [`crate::focus_groups`] wraps it in load and save.

use crate::error::CasebookError;
use casebook_model::{Fields, Submission, SubmissionKey, Timestamp};
use serde::Deserialize;
use serde_json::Value;

/// A facilitator's edit of one submission
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    /// Identity key of the submission being edited
    pub original_submission_id: String,
    /// Fields to overlay; absent fields are left alone
    #[serde(default)]
    pub edited_data: Fields,
    /// Optional note attached to the resulting record
    #[serde(default)]
    pub facilitator_comment: Option<String>,
    /// Who made the edit
    #[serde(default)]
    pub edited_by: String,
}

impl EditRequest {
    /// Edit of `original_submission_id` by `edited_by`
    #[must_use]
    pub fn new(original_submission_id: impl Into<String>, edited_by: impl Into<String>) -> Self {
        Self {
            original_submission_id: original_submission_id.into(),
            edited_data: Fields::new(),
            facilitator_comment: None,
            edited_by: edited_by.into(),
        }
    }

    /// Set the fields to overlay
    #[must_use]
    pub fn with_data(mut self, edited_data: Fields) -> Self {
        self.edited_data = edited_data;
        self
    }

    /// Attach a facilitator comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.facilitator_comment = Some(comment.into());
        self
    }
}

/// Where an edit landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPlacement {
    /// Merged over the existing edited version of the original
    ReplacedEditedVersion,
    /// Merged over the edited version the key named directly
    UpdatedInPlace,
    /// Appended as a new edited version
    AppendedNewVersion,
}

/// Result of a reconciled edit
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    /// The record as stored
    pub record: Submission,
    /// Index of the record in the collection
    pub index: usize,
    /// Branch taken
    pub placement: EditPlacement,
}

impl EditOutcome {
    /// `submittedAt` of the stored record, returned to clients as its id
    #[inline]
    #[must_use]
    pub fn new_submission_id(&self) -> &Timestamp {
        &self.record.submitted_at
    }

    /// Whether a new record was appended
    #[inline]
    #[must_use]
    pub fn is_new_version(&self) -> bool {
        self.placement == EditPlacement::AppendedNewVersion
    }
}

/// Apply `request` to `records` as of `now`
///
/// On error `records` is left untouched.
pub fn reconcile_edit(
    records: &mut Vec<Submission>,
    request: &EditRequest,
    now: &Timestamp,
) -> Result<EditOutcome, CasebookError> {
    let editor = request.edited_by.trim();
    if editor.is_empty() {
        return Err(CasebookError::validation("editedBy is required"));
    }

    let target: SubmissionKey = request
        .original_submission_id
        .parse()
        .map_err(|_| CasebookError::not_found(format!("submission {}", request.original_submission_id)))?;

    let original = records
        .iter()
        .find(|s| s.key() == target)
        .ok_or_else(|| CasebookError::not_found(format!("submission {target}")))?;

    let existing_edited = records.iter().position(|s| s.is_edit_of(&target));
    let editing_an_edit = records
        .iter()
        .position(|s| s.is_edited_version && s.key() == target);

    let stamp = edit_stamp(editor, now);

    let (mut record, placement, index) = if let Some(idx) = existing_edited {
        let previous = records[idx].to_fields()?;
        let link = version_link(&request.original_submission_id);
        let record = original.merged([&previous, &request.edited_data, &stamp, &link])?;
        (record, EditPlacement::ReplacedEditedVersion, idx)
    } else if let Some(idx) = editing_an_edit {
        let record = records[idx].merged([&request.edited_data, &stamp])?;
        (record, EditPlacement::UpdatedInPlace, idx)
    } else {
        let mut fresh = version_link(&request.original_submission_id);
        fresh.insert("submittedAt".into(), Value::String(now.to_string()));
        let record = original.merged([&request.edited_data, &stamp, &fresh])?;
        (record, EditPlacement::AppendedNewVersion, records.len())
    };

    if let Some(comment) = request
        .facilitator_comment
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        record.facilitator_comment = Some(comment.to_string());
        record.facilitator_comment_timestamp = Some(now.clone());
        record.facilitator_comment_by = Some(editor.to_string());
    }

    if placement == EditPlacement::AppendedNewVersion {
        records.push(record.clone());
    } else {
        records[index] = record.clone();
    }

    tracing::info!(
        submission = %target,
        editor,
        placement = ?placement,
        "edit reconciled"
    );

    Ok(EditOutcome {
        record,
        index,
        placement,
    })
}

fn edit_stamp(editor: &str, now: &Timestamp) -> Fields {
    let mut stamp = Fields::new();
    stamp.insert("editedBy".into(), Value::String(editor.to_string()));
    stamp.insert("editTimestamp".into(), Value::String(now.to_string()));
    stamp
}

fn version_link(original_id: &str) -> Fields {
    let mut link = Fields::new();
    link.insert("isEditedVersion".into(), Value::Bool(true));
    link.insert(
        "originalSubmissionId".into(),
        Value::String(original_id.to_string()),
    );
    link
}
