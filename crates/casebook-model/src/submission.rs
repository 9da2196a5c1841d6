//! Case study submissions
//!
//! One shape serves both collections. Individual case studies carry an `id`
//! and a review `status`; focus-group submissions are identified by their
//! [`SubmissionKey`] and may have a single edited version.
//!
//! Unknown JSON keys are kept in `extra` and written back unchanged. Fields
//! stored as `null` read as empty rather than failing the record.

use crate::error::ModelError;
use crate::key::SubmissionKey;
use crate::lenient;
use crate::merge::{shallow_merge, Fields};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Review state of an individual case study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    /// Awaiting review; the only state in which updates are accepted
    Pending,
    /// Accepted by a reviewer
    Approved,
    /// Declined by a reviewer
    Rejected,
}

impl ReviewStatus {
    /// Wire label
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A value or tension named by a participant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Label, also the deduplication key in history reports
    #[serde(default, deserialize_with = "lenient::text")]
    pub value: String,
    /// Participant's definition
    #[serde(default, deserialize_with = "lenient::text")]
    pub definition: String,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Entry {
    /// New entry with no extra fields
    #[must_use]
    pub fn new(value: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            definition: definition.into(),
            extra: Fields::new(),
        }
    }
}

/// One group's worth of values and tensions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Case {
    #[serde(default, deserialize_with = "lenient::text")]
    pub group: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub values: Vec<Entry>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub tensions: Vec<Entry>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Case {
    /// Empty case for `group`
    #[must_use]
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            ..Self::default()
        }
    }

    /// Add a value entry
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>, definition: impl Into<String>) -> Self {
        self.values.push(Entry::new(value, definition));
        self
    }

    /// Add a tension entry
    #[must_use]
    pub fn with_tension(mut self, value: impl Into<String>, definition: impl Into<String>) -> Self {
        self.tensions.push(Entry::new(value, definition));
        self
    }
}

/// A case study record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(default)]
    pub submitted_at: Timestamp,
    #[serde(default, deserialize_with = "lenient::list")]
    pub cases: Vec<Case>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_edited_version: bool,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub original_submission_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub edited_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_timestamp: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub facilitator_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facilitator_comment_timestamp: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub facilitator_comment_by: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Submission {
    /// New unedited submission
    #[must_use]
    pub fn new(username: impl Into<String>, email: impl Into<String>, submitted_at: Timestamp) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            submitted_at,
            ..Self::default()
        }
    }

    /// Replace the cases
    #[must_use]
    pub fn with_cases(mut self, cases: Vec<Case>) -> Self {
        self.cases = cases;
        self
    }

    /// Composite identity of this record
    #[must_use]
    pub fn key(&self) -> SubmissionKey {
        SubmissionKey::new(
            self.username.clone(),
            self.email.clone(),
            self.submitted_at.clone(),
        )
    }

    /// Whether this record is the edited version of `original`
    #[must_use]
    pub fn is_edit_of(&self, original: &SubmissionKey) -> bool {
        self.is_edited_version
            && self
                .original_submission_id
                .as_deref()
                .and_then(|raw| raw.parse::<SubmissionKey>().ok())
                .is_some_and(|key| &key == original)
    }

    /// Whether `email` submitted this record
    #[inline]
    #[must_use]
    pub fn belongs_to(&self, email: &str) -> bool {
        self.email == email
    }

    /// Whether any case was recorded for `group`
    #[must_use]
    pub fn has_group(&self, group: &str) -> bool {
        self.cases.iter().any(|case| case.group == group)
    }

    /// Review status; records without one are treated as pending
    #[must_use]
    pub fn review_status(&self) -> Option<ReviewStatus> {
        match self.status.as_deref() {
            None | Some("pending") => Some(ReviewStatus::Pending),
            Some("approved") => Some(ReviewStatus::Approved),
            Some("rejected") => Some(ReviewStatus::Rejected),
            Some(_) => None,
        }
    }

    /// Top-level fields as a JSON object
    pub fn to_fields(&self) -> Result<Fields, ModelError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(ModelError::NotAnObject),
        }
    }

    /// Read a record back from its fields
    pub fn from_fields(fields: Fields) -> Result<Self, ModelError> {
        Ok(serde_json::from_value(Value::Object(fields))?)
    }

    /// Overlay `patches` on this record, later patches winning
    pub fn merged<'a, I>(&self, patches: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = &'a Fields>,
    {
        let base = self.to_fields()?;
        let mut layers = vec![&base];
        for patch in patches {
            layers.push(patch);
        }
        Self::from_fields(shallow_merge(layers))
    }
}
